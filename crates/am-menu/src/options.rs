//! Construction options
//!
//! The recognized configuration surface of a menu tree, with the defaults
//! each pattern ships. Durations and hover delays use -1 to mean "inherit
//! from the more general value" (`transition_duration` / `hover_delay`).

use crate::state::{HoverType, MenuPattern};
use am_dom::NodeId;

/// Options accepted when constructing a [`crate::MenuTree`].
#[derive(Debug, Clone)]
pub struct MenuOptions {
    /// The root container to scan. Required.
    pub menu_element: Option<NodeId>,
    /// Selects item elements as direct children of the scanned container.
    pub menu_item_selector: String,
    /// Selects the link within each item.
    pub menu_link_selector: String,
    /// Selects items that own a nested menu.
    pub submenu_item_selector: String,
    /// Selects the toggle control within a submenu item.
    pub submenu_toggle_selector: String,
    /// Selects the nested menu within a submenu item.
    pub submenu_selector: String,
    /// External control button; top level only, requires `container_element`.
    pub controller_element: Option<NodeId>,
    /// Containing element for the controller; required with it.
    pub container_element: Option<NodeId>,
    /// CSS classes applied while open.
    pub open_class: Vec<String>,
    /// CSS classes applied while closed.
    pub close_class: Vec<String>,
    /// CSS classes applied during the staged transition.
    pub transition_class: Vec<String>,
    /// Transition duration in milliseconds.
    pub transition_duration: i64,
    /// Open duration; -1 means use `transition_duration`.
    pub open_duration: i64,
    /// Close duration; -1 means use `transition_duration`.
    pub close_duration: i64,
    /// Hover policy.
    pub hover_type: HoverType,
    /// Hover delay in milliseconds.
    pub hover_delay: i64,
    /// Pointer-enter delay; -1 means use `hover_delay`.
    pub enter_delay: i64,
    /// Pointer-leave delay; -1 means use `hover_delay`.
    pub leave_delay: i64,
    /// Enables arrow/Home/End navigation in Disclosure and TopLink menus.
    pub optional_key_support: bool,
    /// Prefix for the emitted CSS custom properties.
    pub prefix: String,
    /// Which widget pattern the tree implements.
    pub pattern: MenuPattern,
}

impl MenuOptions {
    /// Options for a disclosure menu over `menu_element`.
    pub fn new(menu_element: NodeId) -> Self {
        Self::for_pattern(menu_element, MenuPattern::Disclosure)
    }

    /// Options for the given pattern, with that pattern's default
    /// selectors.
    pub fn for_pattern(menu_element: NodeId, pattern: MenuPattern) -> Self {
        let submenu_toggle_selector = match pattern {
            MenuPattern::TopLink => "button",
            _ => "a",
        };
        Self {
            menu_element: Some(menu_element),
            menu_item_selector: "li".to_string(),
            menu_link_selector: "a".to_string(),
            submenu_item_selector: "li:has(ul)".to_string(),
            submenu_toggle_selector: submenu_toggle_selector.to_string(),
            submenu_selector: "ul".to_string(),
            controller_element: None,
            container_element: None,
            open_class: vec!["show".to_string()],
            close_class: vec!["hide".to_string()],
            transition_class: vec!["transitioning".to_string()],
            transition_duration: 250,
            open_duration: -1,
            close_duration: -1,
            hover_type: HoverType::Off,
            hover_delay: 250,
            enter_delay: -1,
            leave_delay: -1,
            optional_key_support: false,
            prefix: "am-".to_string(),
            pattern,
        }
    }

    /// Attach an external controller button and its container.
    pub fn with_controller(mut self, controller: NodeId, container: NodeId) -> Self {
        self.controller_element = Some(controller);
        self.container_element = Some(container);
        self
    }
}
