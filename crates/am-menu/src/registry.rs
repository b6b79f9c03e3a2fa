//! Menu registry
//!
//! Host-owned lookup of live menu trees by the root element's DOM id.
//! Nothing global: the host constructs a registry, initializes menus
//! into it, and drops it when the page goes away.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::aria;
use crate::menu::MenuTree;
use crate::options::MenuOptions;
use crate::MenuError;
use am_dom::Document;

/// Live menu trees, keyed by root element id.
#[derive(Default)]
pub struct MenuRegistry {
    menus: HashMap<String, MenuTree>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a tree from `options` and register it under its root
    /// element's id, generating one when the element has none.
    pub fn initialize_menu(
        &mut self,
        dom: &mut Document,
        options: MenuOptions,
    ) -> Result<&mut MenuTree, MenuError> {
        let mut tree = MenuTree::new(dom, options)?;
        let key = match tree.dom_id() {
            Some(id) => id.to_string(),
            None => {
                let node = tree.menu_element(tree.root());
                let id = aria::ensure_id_labeled(dom, node, "menu", "");
                tree.dom_id = Some(id.clone());
                id
            }
        };
        debug!(id = %key, "menu registered");
        match self.menus.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(tree);
                Ok(slot.into_mut())
            }
            Entry::Vacant(slot) => Ok(slot.insert(tree)),
        }
    }

    /// Register an already-built tree under an explicit id.
    pub fn register(&mut self, id: &str, tree: MenuTree) {
        self.menus.insert(id.to_string(), tree);
    }

    pub fn lookup(&self, id: &str) -> Option<&MenuTree> {
        self.menus.get(id)
    }

    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut MenuTree> {
        self.menus.get_mut(id)
    }

    /// Detach a tree, returning it to the caller.
    pub fn remove(&mut self, id: &str) -> Option<MenuTree> {
        self.menus.remove(id)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Registered ids, in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.menus.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_dom::NodeId;

    fn menu_dom() -> (Document, NodeId) {
        let mut dom = Document::new();
        let root = dom.tree().root();
        let ul = dom.tree_mut().create_element("ul");
        dom.tree_mut().append_child(root, ul);
        let li = dom.tree_mut().create_element("li");
        dom.tree_mut().append_child(ul, li);
        let a = dom.tree_mut().create_element("a");
        dom.tree_mut().append_child(li, a);
        let text = dom.tree_mut().create_text("Home");
        dom.tree_mut().append_child(a, text);
        (dom, ul)
    }

    #[test]
    fn test_register_by_existing_id() {
        let (mut dom, ul) = menu_dom();
        dom.tree_mut().element_mut(ul).unwrap().set_attr("id", "main-nav");

        let mut registry = MenuRegistry::new();
        registry
            .initialize_menu(&mut dom, MenuOptions::new(ul))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("main-nav").is_some());
    }

    #[test]
    fn test_register_generates_missing_id() {
        let (mut dom, ul) = menu_dom();
        let mut registry = MenuRegistry::new();
        registry
            .initialize_menu(&mut dom, MenuOptions::new(ul))
            .unwrap();

        let id = registry.ids().next().unwrap().to_string();
        assert!(id.starts_with("menu-"));
        // The generated id landed on the element too.
        assert_eq!(dom.get_element_by_id(&id), Some(ul));
        assert_eq!(registry.lookup(&id).unwrap().dom_id(), Some(id.as_str()));
    }

    #[test]
    fn test_remove_detaches() {
        let (mut dom, ul) = menu_dom();
        dom.tree_mut().element_mut(ul).unwrap().set_attr("id", "nav");

        let mut registry = MenuRegistry::new();
        registry
            .initialize_menu(&mut dom, MenuOptions::new(ul))
            .unwrap();
        let tree = registry.remove("nav").unwrap();
        assert_eq!(tree.dom_id(), Some("nav"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_initialize_propagates_validation() {
        let mut dom = Document::new();
        let mut registry = MenuRegistry::new();
        let err = registry
            .initialize_menu(&mut dom, MenuOptions::new(NodeId::NONE))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("menuElement must be an instance of HTMLElement."));
        assert!(registry.is_empty());
    }
}
