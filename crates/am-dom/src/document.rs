//! Document - High-level document API
//!
//! Owns the DOM tree plus the document-level focus slot the menu engine
//! drives (`active_element`), and the style helper used for the CSS
//! custom-property contract.

use crate::node::Node;
use crate::tree::DomTree;
use crate::NodeId;

/// Document errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found")]
    NotFound,

    #[error("Node is not an element")]
    NotAnElement,
}

/// A document: DOM tree plus focus state
#[derive(Debug, Default)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Currently focused element, if any
    active_element: Option<NodeId>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            active_element: None,
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move document focus to an element
    pub fn focus(&mut self, id: NodeId) -> Result<(), DomError> {
        let node = self.tree.get(id).ok_or(DomError::NotFound)?;
        if !node.is_element() {
            return Err(DomError::NotAnElement);
        }
        self.active_element = Some(id);
        Ok(())
    }

    /// Remove document focus from an element. No-op if the element is not
    /// the active one.
    pub fn blur(&mut self, id: NodeId) {
        if self.active_element == Some(id) {
            self.active_element = None;
        }
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element_with_id(self.tree.root(), id)
    }

    fn find_element_with_id(&self, start: NodeId, target: &str) -> Option<NodeId> {
        for child in self.tree.children(start) {
            if let Some(elem) = self.tree.get(child).and_then(Node::as_element) {
                if elem.id.as_deref() == Some(target) {
                    return Some(child);
                }
            }
            if let Some(found) = self.find_element_with_id(child, target) {
                return Some(found);
            }
        }
        None
    }

    /// Set one property inside the element's inline `style` attribute,
    /// replacing any existing declaration of the same property.
    pub fn set_style_property(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let elem = self.tree.element_mut(id).ok_or(DomError::NotAnElement)?;

        let mut declarations: Vec<(String, String)> = elem
            .get_attr("style")
            .map(parse_style)
            .unwrap_or_default();

        if let Some(decl) = declarations.iter_mut().find(|(n, _)| n == name) {
            decl.1 = value.to_string();
        } else {
            declarations.push((name.to_string(), value.to_string()));
        }

        let serialized = declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ");
        elem.set_attr("style", &serialized);
        Ok(())
    }

    /// Read one property back from the inline `style` attribute.
    pub fn get_style_property(&self, id: NodeId, name: &str) -> Option<String> {
        let style = self.tree.element(id)?.get_attr("style")?;
        parse_style(style)
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_slot() {
        let mut doc = Document::new();
        let a = doc.tree_mut().create_element("a");
        let root = doc.tree().root();
        doc.tree_mut().append_child(root, a);

        assert!(doc.focus(a).is_ok());
        assert_eq!(doc.active_element(), Some(a));

        doc.blur(a);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_focus_rejects_non_element() {
        let mut doc = Document::new();
        let text = doc.tree_mut().create_text("hello");
        assert_eq!(doc.focus(text), Err(DomError::NotAnElement));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let nav = doc.tree_mut().create_element("nav");
        let root = doc.tree().root();
        doc.tree_mut().append_child(root, nav);
        doc.tree_mut()
            .element_mut(nav)
            .unwrap()
            .set_attr("id", "main-nav");

        assert_eq!(doc.get_element_by_id("main-nav"), Some(nav));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_style_property() {
        let mut doc = Document::new();
        let ul = doc.tree_mut().create_element("ul");
        let root = doc.tree().root();
        doc.tree_mut().append_child(root, ul);

        doc.set_style_property(ul, "--am-transition-duration", "250ms")
            .unwrap();
        doc.set_style_property(ul, "--am-open-transition-duration", "250ms")
            .unwrap();
        doc.set_style_property(ul, "--am-transition-duration", "100ms")
            .unwrap();

        assert_eq!(
            doc.get_style_property(ul, "--am-transition-duration"),
            Some("100ms".to_string())
        );
        assert_eq!(
            doc.get_style_property(ul, "--am-open-transition-duration"),
            Some("250ms".to_string())
        );
    }
}
