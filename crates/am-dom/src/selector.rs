//! Selector matching
//!
//! The subset of CSS selectors the menu defaults need: type selectors,
//! `#id`, `.class`, compounds of those, and `:has()` with a nested
//! compound list (for defaults like `li:has(ul)`). No combinators - menu
//! element caches are scoped to direct children, so descent is expressed
//! by the query, not the selector.

use crate::tree::DomTree;
use crate::NodeId;

/// A parsed compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compound: Compound,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    /// `:has(...)` inner selectors; node matches if any descendant matches
    /// any of them.
    has: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string. `None` means the selector is invalid -
    /// this is the oracle the valid-query-selector guard consults.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let (compound, rest) = parse_compound(s, true)?;
        if !rest.is_empty() {
            return None;
        }
        Some(Self { compound })
    }

    /// Check whether a node matches this selector.
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        matches_compound(&self.compound, tree, id)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c| !is_ident_char(c)).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((&s[..end], &s[end..]))
}

/// Parse one compound selector, returning it and the unconsumed tail.
/// `allow_has` is false inside `:has(...)` - nesting is not supported.
fn parse_compound(s: &str, allow_has: bool) -> Option<(Compound, &str)> {
    let mut compound = Compound::default();
    let mut rest = s;
    let mut matched = false;

    if let Some((ident, tail)) = take_ident(rest) {
        compound.tag = Some(ident.to_ascii_lowercase());
        rest = tail;
        matched = true;
    }

    loop {
        if let Some(tail) = rest.strip_prefix('#') {
            let (ident, tail) = take_ident(tail)?;
            if compound.id.is_some() {
                return None;
            }
            compound.id = Some(ident.to_string());
            rest = tail;
            matched = true;
        } else if let Some(tail) = rest.strip_prefix('.') {
            let (ident, tail) = take_ident(tail)?;
            compound.classes.push(ident.to_string());
            rest = tail;
            matched = true;
        } else if let Some(tail) = rest.strip_prefix(":has(") {
            if !allow_has {
                return None;
            }
            let close = tail.find(')')?;
            let inner = &tail[..close];
            for part in inner.split(',') {
                let part = part.trim();
                let (inner_compound, inner_rest) = parse_compound(part, false)?;
                if !inner_rest.is_empty() {
                    return None;
                }
                compound.has.push(inner_compound);
            }
            if compound.has.is_empty() {
                return None;
            }
            rest = &tail[close + 1..];
            matched = true;
        } else {
            break;
        }
    }

    if !matched {
        return None;
    }
    Some((compound, rest))
}

fn matches_compound(compound: &Compound, tree: &DomTree, id: NodeId) -> bool {
    let Some(elem) = tree.element(id) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if &elem.tag != tag {
            return false;
        }
    }
    if let Some(want) = &compound.id {
        if elem.id.as_deref() != Some(want.as_str()) {
            return false;
        }
    }
    for class in &compound.classes {
        if !elem.has_class(class) {
            return false;
        }
    }
    if !compound.has.is_empty() {
        let found = tree
            .descendants(id)
            .into_iter()
            .any(|d| compound.has.iter().any(|inner| matches_compound(inner, tree, d)));
        if !found {
            return false;
        }
    }
    true
}

/// Query the direct children of `base` matching `selector`.
///
/// An element matches only if its immediate parent is `base` - the scoped
/// matching rule that keeps a menu from claiming items of its nested
/// submenus.
pub fn query_direct_children(tree: &DomTree, base: NodeId, selector: &Selector) -> Vec<NodeId> {
    tree.children(base)
        .filter(|&child| selector.matches(tree, child))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert!(Selector::parse("li").is_some());
        assert!(Selector::parse("a").is_some());
        assert!(Selector::parse("li:has(ul)").is_some());
        assert!(Selector::parse("li:has(ul, button)").is_some());
        assert!(Selector::parse("button.toggle").is_some());
        assert!(Selector::parse("#main-nav").is_some());
        assert!(Selector::parse(".show").is_some());

        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("li > ul").is_none());
        assert!(Selector::parse("li ul").is_none());
        assert!(Selector::parse(":has()").is_none());
        assert!(Selector::parse("..bad").is_none());
    }

    #[test]
    fn test_direct_child_scoping() {
        let mut tree = DomTree::new();
        let nav = tree.create_element("ul");
        let li = tree.create_element("li");
        let sub = tree.create_element("ul");
        let sub_li = tree.create_element("li");
        tree.append_child(tree.root(), nav);
        tree.append_child(nav, li);
        tree.append_child(li, sub);
        tree.append_child(sub, sub_li);

        let sel = Selector::parse("li").unwrap();
        // Only the direct child; the nested submenu's item is not claimed.
        assert_eq!(query_direct_children(&tree, nav, &sel), vec![li]);
        assert_eq!(query_direct_children(&tree, sub, &sel), vec![sub_li]);
    }

    #[test]
    fn test_has_matching() {
        let mut tree = DomTree::new();
        let nav = tree.create_element("ul");
        let plain = tree.create_element("li");
        let submenu_item = tree.create_element("li");
        let sub = tree.create_element("ul");
        tree.append_child(tree.root(), nav);
        tree.append_child(nav, plain);
        tree.append_child(nav, submenu_item);
        tree.append_child(submenu_item, sub);

        let sel = Selector::parse("li:has(ul)").unwrap();
        assert_eq!(query_direct_children(&tree, nav, &sel), vec![submenu_item]);
    }

    #[test]
    fn test_class_and_id() {
        let mut tree = DomTree::new();
        let button = tree.create_element("button");
        tree.append_child(tree.root(), button);
        tree.element_mut(button).unwrap().set_attr("id", "menu-button");
        tree.element_mut(button).unwrap().set_attr("class", "toggle wide");

        assert!(Selector::parse("#menu-button").unwrap().matches(&tree, button));
        assert!(Selector::parse("button.toggle").unwrap().matches(&tree, button));
        assert!(!Selector::parse("button.open").unwrap().matches(&tree, button));
    }
}
