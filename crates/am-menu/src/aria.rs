//! ARIA wiring helpers
//!
//! Id generation for toggles and their controlled menus, plus the small
//! attribute vocabulary the patterns set (`aria-expanded`,
//! `aria-controls`, `aria-labelledby`, `aria-haspopup`, roles).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use am_dom::{Document, NodeId};

static COUNTER: AtomicU64 = AtomicU64::new(0x9e37_79b9_7f4a_7c15);

fn entropy() -> u64 {
    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.subsec_nanos() as u64) ^ d.as_secs())
        .unwrap_or(0);
    let count = COUNTER.fetch_add(0x9e37_79b9_7f4a_7c15, Ordering::Relaxed);
    let mut x = time ^ count.rotate_left(17) ^ 0x5851_f42d_4c95_7f2d;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    x.wrapping_mul(0x2545_f491_4f6c_dd1d)
}

/// A short random base-36 string, used to de-collide generated ids.
pub(crate) fn random_base36(len: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut x = entropy();
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        if x == 0 {
            x = entropy();
        }
        out.push(DIGITS[(x % 36) as usize] as char);
        x /= 36;
    }
    out
}

/// Sanitize visible text into an id slug: lowercase, alphanumeric runs
/// joined by single dashes.
pub(crate) fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// The label an element's generated id derives from: `aria-label` when
/// present, otherwise its visible text.
pub(crate) fn label_for(dom: &Document, node: NodeId) -> String {
    if let Some(label) = dom
        .tree()
        .element(node)
        .and_then(|e| e.get_attr("aria-label"))
    {
        return label.to_string();
    }
    dom.tree().text_content(node).trim().to_string()
}

/// Return the element's id, generating and assigning
/// `<prefix>-<slug>-<rand>` if it has none. The slug derives from the
/// element's own label.
pub(crate) fn ensure_id(dom: &mut Document, node: NodeId, prefix: &str) -> String {
    let label = label_for(dom, node);
    ensure_id_labeled(dom, node, prefix, &label)
}

/// Like [`ensure_id`], but the slug derives from a caller-supplied label.
/// A controlled menu's id is generated from its toggle's label.
pub(crate) fn ensure_id_labeled(
    dom: &mut Document,
    node: NodeId,
    prefix: &str,
    label: &str,
) -> String {
    if let Some(id) = dom.tree().element(node).and_then(|e| e.id.clone()) {
        return id;
    }
    let slug = slugify(label);
    let id = if slug.is_empty() {
        format!("{prefix}-{}", random_base36(10))
    } else {
        format!("{prefix}-{slug}-{}", random_base36(10))
    };
    if let Some(elem) = dom.tree_mut().element_mut(node) {
        elem.set_attr("id", &id);
    }
    id
}

/// Set a plain attribute on an element, ignoring non-elements.
pub(crate) fn set_attr(dom: &mut Document, node: NodeId, name: &str, value: &str) {
    if let Some(elem) = dom.tree_mut().element_mut(node) {
        elem.set_attr(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About Us"), "about-us");
        assert_eq!(slugify("  Products & Services  "), "products-services");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_random_base36_charset() {
        let s = random_base36(10);
        assert_eq!(s.len(), 10);
        assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_ensure_id() {
        let mut dom = Document::new();
        let button = dom.tree_mut().create_element("button");
        let root = dom.tree().root();
        dom.tree_mut().append_child(root, button);
        let text = dom.tree_mut().create_text("Main Menu");
        dom.tree_mut().append_child(button, text);

        let id = ensure_id(&mut dom, button, "menu-button");
        assert!(id.starts_with("menu-button-main-menu-"));

        // Second call returns the id already assigned.
        assert_eq!(ensure_id(&mut dom, button, "menu-button"), id);
    }

    #[test]
    fn test_ensure_id_prefers_aria_label() {
        let mut dom = Document::new();
        let button = dom.tree_mut().create_element("button");
        let root = dom.tree().root();
        dom.tree_mut().append_child(root, button);
        dom.tree_mut()
            .element_mut(button)
            .unwrap()
            .set_attr("aria-label", "Site Navigation");

        let id = ensure_id(&mut dom, button, "menu-button");
        assert!(id.starts_with("menu-button-site-navigation-"));
    }
}
