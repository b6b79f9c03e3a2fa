//! Menu tree core
//!
//! The arena holding every menu, item, and toggle of one widget, plus
//! the coordination logic: focus-state and modality cascades, the
//! current-child pointer, event entry points, and the scheduler that
//! sequences deferred focus moves, hover timers, and transition steps.

use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::aria;
use crate::item::ItemNode;
use crate::key::MenuKey;
use crate::options::MenuOptions;
use crate::pattern::{self, KeyAction, KeyContext};
use crate::scheduler::{Scheduler, TaskAction};
use crate::state::{EventModality, FocusState, HoverType, MenuPattern};
use crate::toggle::{ToggleNode, ToggleState};
use crate::validate::{self, Validator};
use crate::{ItemId, MenuError, MenuId, ToggleId};
use am_dom::{
    query_direct_children, Document, FocusEvent, KeyboardEvent, NodeId, PointerEvent,
    PointerKind, PointerType, Selector,
};

/// One menu (root or submenu) in the arena.
#[derive(Debug)]
pub(crate) struct MenuNode {
    /// The menu container element.
    pub node: NodeId,
    pub parent: Option<MenuId>,
    pub root: MenuId,
    pub is_top_level: bool,
    pub items: Vec<ItemId>,
    /// Toggles whose control lives in this menu.
    pub toggles: Vec<ToggleId>,
    pub focus_state: FocusState,
    pub current_event: EventModality,
    /// Index of the current item; -1 means none.
    pub current_child: i32,
    /// Invalidates pending hover timers when bumped.
    pub hover_generation: u32,
}

/// Tree-wide configuration, resolved from [`MenuOptions`].
#[derive(Debug)]
pub(crate) struct TreeConfig {
    pub pattern: MenuPattern,
    pub open_class: Vec<String>,
    pub close_class: Vec<String>,
    pub transition_class: Vec<String>,
    pub transition_duration: i64,
    pub open_duration: i64,
    pub close_duration: i64,
    pub hover_type: HoverType,
    pub hover_delay: i64,
    pub enter_delay: i64,
    pub leave_delay: i64,
    pub optional_key_support: bool,
    pub prefix: String,
    /// Sticky: set once any toggle has opened. Gates dynamic hover at the
    /// top level.
    pub has_opened: bool,
}

impl TreeConfig {
    pub fn open_duration_ms(&self) -> i64 {
        if self.open_duration < 0 {
            self.transition_duration
        } else {
            self.open_duration
        }
    }

    pub fn close_duration_ms(&self) -> i64 {
        if self.close_duration < 0 {
            self.transition_duration
        } else {
            self.close_duration
        }
    }

    pub fn enter_delay_ms(&self) -> i64 {
        if self.enter_delay < 0 {
            self.hover_delay
        } else {
            self.enter_delay
        }
    }

    pub fn leave_delay_ms(&self) -> i64 {
        if self.leave_delay < 0 {
            self.hover_delay
        } else {
            self.leave_delay
        }
    }
}

/// What a signal announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Expand,
    Collapse,
    /// A plain item's link was activated while the engine held the key's
    /// default. The host performs the navigation.
    Activate,
}

/// State-change notification, drained by the host via
/// [`MenuTree::take_signals`].
#[derive(Debug, Clone, Copy)]
pub struct MenuSignal {
    pub kind: SignalKind,
    /// The announcing toggle; `None` for link activation.
    pub toggle: Option<ToggleId>,
    /// The toggle's control element, or the activated link.
    pub node: NodeId,
}

/// Parsed selector set, produced by validation.
struct Selectors {
    item: Selector,
    link: Selector,
    submenu_item: Selector,
    submenu_toggle: Selector,
    submenu: Selector,
}

/// The whole widget: menus, items, and toggles addressed by handle.
#[derive(Debug)]
pub struct MenuTree {
    pub(crate) menus: Vec<MenuNode>,
    pub(crate) items: Vec<ItemNode>,
    pub(crate) toggles: Vec<ToggleNode>,
    pub(crate) config: TreeConfig,
    pub(crate) scheduler: Scheduler,
    pub(crate) signals: Vec<MenuSignal>,
    root: MenuId,
    controller: Option<ToggleId>,
    container: Option<NodeId>,
    node_to_item: HashMap<NodeId, ItemId>,
    node_to_toggle: HashMap<NodeId, ToggleId>,
    pub(crate) dom_id: Option<String>,
}

impl MenuTree {
    /// Build a menu tree over `options.menu_element`, validating the
    /// options, discovering nested menus, and wiring ARIA attributes.
    /// Every validation failure is reported at once, one per line.
    pub fn new(dom: &mut Document, options: MenuOptions) -> Result<Self, MenuError> {
        let selectors = Self::validate(dom, &options)?;
        let menu_element = options.menu_element.ok_or_else(|| {
            MenuError::Validation(vec![
                "menuElement must be an instance of HTMLElement. \"undefined\" given.".to_string(),
            ])
        })?;

        let mut tree = MenuTree {
            menus: Vec::new(),
            items: Vec::new(),
            toggles: Vec::new(),
            config: TreeConfig {
                pattern: options.pattern,
                open_class: options.open_class.clone(),
                close_class: options.close_class.clone(),
                transition_class: options.transition_class.clone(),
                transition_duration: options.transition_duration,
                open_duration: options.open_duration,
                close_duration: options.close_duration,
                hover_type: options.hover_type,
                hover_delay: options.hover_delay,
                enter_delay: options.enter_delay,
                leave_delay: options.leave_delay,
                optional_key_support: options.optional_key_support,
                prefix: options.prefix.clone(),
                has_opened: false,
            },
            scheduler: Scheduler::new(),
            signals: Vec::new(),
            root: MenuId(0),
            controller: None,
            container: None,
            node_to_item: HashMap::new(),
            node_to_toggle: HashMap::new(),
            dom_id: None,
        };

        let root = tree.build_menu(dom, &selectors, menu_element, None);
        tree.root = root;
        for index in 0..tree.menus.len() {
            let resolved = tree.resolve_root(MenuId(index as u32))?;
            tree.menus[index].root = resolved;
        }

        if let (Some(controller), Some(container)) =
            (options.controller_element, options.container_element)
        {
            let toggle = ToggleId(tree.toggles.len() as u32);
            tree.toggles.push(ToggleNode {
                node: controller,
                parent_node: container,
                controlled: root,
                parent_menu: None,
                is_open: false,
                state: ToggleState::Closed,
                generation: 0,
            });
            tree.node_to_toggle.insert(controller, toggle);
            tree.controller = Some(toggle);
            tree.container = Some(container);
        }

        for index in 0..tree.toggles.len() {
            tree.init_toggle(dom, ToggleId(index as u32));
        }
        if tree.config.pattern == MenuPattern::Menubar {
            tree.apply_menubar_roles(dom);
        }
        tree.apply_css_properties(dom);

        tree.dom_id = dom.tree().element(menu_element).and_then(|e| e.id.clone());
        debug!(
            menus = tree.menus.len(),
            items = tree.items.len(),
            toggles = tree.toggles.len(),
            pattern = tree.config.pattern.as_str(),
            "menu tree initialized"
        );
        Ok(tree)
    }

    /// Like [`MenuTree::new`], but logs the failure and returns `None`
    /// instead of propagating it. Matches hosts that treat a broken menu
    /// as progressive enhancement.
    pub fn new_or_log(dom: &mut Document, options: MenuOptions) -> Option<Self> {
        match Self::new(dom, options) {
            Ok(tree) => Some(tree),
            Err(err) => {
                error!(error = %err, "menu initialization failed");
                None
            }
        }
    }

    fn validate(dom: &Document, options: &MenuOptions) -> Result<Selectors, MenuError> {
        let mut v = Validator::new();
        v.check_element(dom, "menuElement", options.menu_element);
        v.check_controller_pair(dom, options.controller_element, options.container_element);

        let parse = |v: &mut Validator, field: &str, value: &str| -> Option<Selector> {
            v.check_selector(field, value);
            Selector::parse(value)
        };
        let item = parse(&mut v, "menuItemSelector", &options.menu_item_selector);
        let link = parse(&mut v, "menuLinkSelector", &options.menu_link_selector);
        let submenu_item = parse(&mut v, "submenuItemSelector", &options.submenu_item_selector);
        let submenu_toggle = parse(
            &mut v,
            "submenuToggleSelector",
            &options.submenu_toggle_selector,
        );
        let submenu = parse(&mut v, "submenuSelector", &options.submenu_selector);

        v.check_class_list("openClass", &options.open_class);
        v.check_class_list("closeClass", &options.close_class);
        v.check_class_list("transitionClass", &options.transition_class);
        v.check_duration("transitionDuration", options.transition_duration);
        v.check_duration("openDuration", options.open_duration);
        v.check_duration("closeDuration", options.close_duration);
        v.check_duration("hoverDelay", options.hover_delay);
        v.check_duration("enterDelay", options.enter_delay);
        v.check_duration("leaveDelay", options.leave_delay);
        v.finish()?;

        let (Some(item), Some(link), Some(submenu_item), Some(submenu_toggle), Some(submenu)) =
            (item, link, submenu_item, submenu_toggle, submenu)
        else {
            unreachable!("unparsable selectors fail validation above");
        };
        Ok(Selectors {
            item,
            link,
            submenu_item,
            submenu_toggle,
            submenu,
        })
    }

    /// Recursively discover one menu level: its items, their links, and
    /// nested submenus behind their toggles.
    fn build_menu(
        &mut self,
        dom: &Document,
        selectors: &Selectors,
        element: NodeId,
        parent: Option<MenuId>,
    ) -> MenuId {
        let menu = MenuId(self.menus.len() as u32);
        self.menus.push(MenuNode {
            node: element,
            parent,
            root: menu,
            is_top_level: parent.is_none(),
            items: Vec::new(),
            toggles: Vec::new(),
            focus_state: FocusState::None,
            current_event: EventModality::None,
            current_child: -1,
            hover_generation: 0,
        });

        for item_element in query_direct_children(dom.tree(), element, &selectors.item) {
            if selectors.submenu_item.matches(dom.tree(), item_element) {
                self.build_submenu_item(dom, selectors, menu, item_element);
            } else {
                self.build_plain_item(dom, selectors, menu, item_element);
            }
        }
        menu
    }

    fn build_plain_item(
        &mut self,
        dom: &Document,
        selectors: &Selectors,
        menu: MenuId,
        item_element: NodeId,
    ) {
        let Some(link) = query_direct_children(dom.tree(), item_element, &selectors.link)
            .into_iter()
            .next()
        else {
            warn!(node = ?item_element, "item without a link skipped");
            return;
        };
        self.push_item(menu, item_element, link, None, None);
    }

    fn build_submenu_item(
        &mut self,
        dom: &Document,
        selectors: &Selectors,
        menu: MenuId,
        item_element: NodeId,
    ) {
        let toggle_element =
            query_direct_children(dom.tree(), item_element, &selectors.submenu_toggle)
                .into_iter()
                .next();
        let submenu_element = query_direct_children(dom.tree(), item_element, &selectors.submenu)
            .into_iter()
            .next();
        let (Some(toggle_element), Some(submenu_element)) = (toggle_element, submenu_element)
        else {
            warn!(
                node = ?item_element,
                "submenu item missing toggle or submenu, treated as plain"
            );
            self.build_plain_item(dom, selectors, menu, item_element);
            return;
        };

        let child_menu = self.build_menu(dom, selectors, submenu_element, Some(menu));
        let toggle = ToggleId(self.toggles.len() as u32);
        self.toggles.push(ToggleNode {
            node: toggle_element,
            parent_node: item_element,
            controlled: child_menu,
            parent_menu: Some(menu),
            is_open: false,
            state: ToggleState::Closed,
            generation: 0,
        });
        self.menus[menu.0 as usize].toggles.push(toggle);
        self.node_to_toggle.insert(toggle_element, toggle);

        if self.config.pattern == MenuPattern::TopLink {
            // The top link keeps its navigation default; the adjacent
            // button is a separate item that owns the submenu.
            let link = query_direct_children(dom.tree(), item_element, &selectors.link)
                .into_iter()
                .next();
            if let Some(link) = link {
                let link_item = self.push_item(menu, item_element, link, None, None);
                let toggle_item =
                    self.push_item(menu, item_element, toggle_element, Some(child_menu), Some(toggle));
                self.items[link_item.0 as usize].companion = Some(toggle_item);
                self.items[toggle_item.0 as usize].companion = Some(link_item);
                return;
            }
        }
        self.push_item(menu, item_element, toggle_element, Some(child_menu), Some(toggle));
    }

    fn push_item(
        &mut self,
        menu: MenuId,
        node: NodeId,
        link: NodeId,
        child_menu: Option<MenuId>,
        toggle: Option<ToggleId>,
    ) -> ItemId {
        let item = ItemId(self.items.len() as u32);
        self.items.push(ItemNode {
            node,
            link,
            parent_menu: menu,
            is_submenu_item: child_menu.is_some(),
            child_menu,
            toggle,
            companion: None,
        });
        self.menus[menu.0 as usize].items.push(item);
        self.node_to_item.entry(node).or_insert(item);
        self.node_to_item.insert(link, item);
        item
    }

    fn resolve_root(&self, menu: MenuId) -> Result<MenuId, MenuError> {
        let mut current = menu;
        let mut hops = 0;
        loop {
            let node = self.menu(current);
            if node.is_top_level {
                return Ok(current);
            }
            match node.parent {
                Some(parent) => {
                    current = parent;
                    hops += 1;
                    if hops > self.menus.len() {
                        return Err(MenuError::NoRootMenu);
                    }
                }
                None => return Err(MenuError::NoRootMenu),
            }
        }
    }

    /// Wire one toggle's ARIA attributes and force its closed state.
    fn init_toggle(&mut self, dom: &mut Document, t: ToggleId) {
        let node = self.toggle_node(t).node;
        let is_controller = self.toggle_node(t).parent_menu.is_none();
        let menu_node = self.menu(self.toggle_node(t).controlled).node;

        let label = aria::label_for(dom, node);
        let toggle_id = aria::ensure_id(dom, node, "menu-button");
        let menu_id = aria::ensure_id_labeled(dom, menu_node, "menu", &label);
        aria::set_attr(dom, node, "aria-controls", &menu_id);
        aria::set_attr(dom, menu_node, "aria-labelledby", &toggle_id);
        if self.config.pattern == MenuPattern::Menubar {
            aria::set_attr(dom, node, "aria-haspopup", "true");
        }
        if is_controller {
            let tag = dom.tree().element(node).map(|e| e.tag.clone());
            if tag.as_deref() != Some("button") {
                aria::set_attr(dom, node, "role", "button");
            }
        }
        self.collapse_immediate(dom, t);
    }

    /// Menubar role vocabulary plus the initial roving tab index: every
    /// link starts at -1 except the first top-level one.
    fn apply_menubar_roles(&mut self, dom: &mut Document) {
        for index in 0..self.menus.len() {
            let node = self.menus[index].node;
            let role = if self.menus[index].is_top_level {
                "menubar"
            } else {
                "menu"
            };
            aria::set_attr(dom, node, "role", role);
        }
        for index in 0..self.items.len() {
            let node = self.items[index].node;
            let link = self.items[index].link;
            aria::set_attr(dom, node, "role", "none");
            aria::set_attr(dom, link, "role", "menuitem");
            aria::set_attr(dom, link, "tabindex", "-1");
        }
        let root = self.root;
        if let Some(&first) = self.menu(root).items.first() {
            let link = self.item(first).link;
            aria::set_attr(dom, link, "tabindex", "0");
        }
    }

    /// Publish the resolved durations as CSS custom properties on every
    /// menu container, suffixed "ms".
    fn apply_css_properties(&self, dom: &mut Document) {
        let prefix = self.config.prefix.clone();
        let props = [
            (
                format!("--{prefix}transition-duration"),
                self.config.transition_duration,
            ),
            (
                format!("--{prefix}open-transition-duration"),
                self.config.open_duration_ms(),
            ),
            (
                format!("--{prefix}close-transition-duration"),
                self.config.close_duration_ms(),
            ),
        ];
        for menu in &self.menus {
            for (name, value) in &props {
                if let Err(err) = dom.set_style_property(menu.node, name, &format!("{value}ms")) {
                    warn!(error = %err, "failed to set menu style property");
                }
            }
        }
    }

    // -- arena access ----------------------------------------------------

    pub(crate) fn menu(&self, m: MenuId) -> &MenuNode {
        &self.menus[m.0 as usize]
    }

    pub(crate) fn menu_mut(&mut self, m: MenuId) -> &mut MenuNode {
        &mut self.menus[m.0 as usize]
    }

    pub(crate) fn item(&self, i: ItemId) -> &ItemNode {
        &self.items[i.0 as usize]
    }

    pub(crate) fn toggle_node(&self, t: ToggleId) -> &ToggleNode {
        &self.toggles[t.0 as usize]
    }

    pub(crate) fn toggle_node_mut(&mut self, t: ToggleId) -> &mut ToggleNode {
        &mut self.toggles[t.0 as usize]
    }

    // -- state coordination ----------------------------------------------

    /// Whether focusing the current child of `m` should move DOM focus:
    /// always under keyboard or character interaction, and under mouse
    /// only when hover is dynamic.
    pub fn should_focus(&self, m: MenuId) -> bool {
        match self.menu(m).current_event {
            EventModality::Keyboard | EventModality::Character => true,
            EventModality::Mouse => self.config.hover_type == HoverType::Dynamic,
            EventModality::None => false,
        }
    }

    /// Set a menu's focus state. `none` and `self` clear every descendant
    /// menu; `self` and `child` mark every ancestor as `child`.
    pub fn set_focus_state(&mut self, m: MenuId, value: FocusState) {
        self.menu_mut(m).focus_state = value;
        if matches!(value, FocusState::None | FocusState::Self_) {
            for toggle in self.menu(m).toggles.clone() {
                let controlled = self.toggle_node(toggle).controlled;
                if self.menu(controlled).focus_state != FocusState::None {
                    self.set_focus_state(controlled, FocusState::None);
                }
            }
        }
        if matches!(value, FocusState::Self_ | FocusState::Child) {
            if let Some(parent) = self.menu(m).parent {
                if self.menu(parent).focus_state != FocusState::Child {
                    self.set_focus_state(parent, FocusState::Child);
                }
            }
        }
    }

    /// Set a menu's interaction modality and cascade it to every
    /// descendant menu.
    pub fn set_current_event(&mut self, m: MenuId, value: EventModality) {
        self.menu_mut(m).current_event = value;
        for toggle in self.menu(m).toggles.clone() {
            let controlled = self.toggle_node(toggle).controlled;
            self.set_current_event(controlled, value);
        }
    }

    /// Set a menu's current-child index, clamped to [-1, len - 1]. Under
    /// mouse or character interaction a change also repoints the parent
    /// at the item containing this menu, keeping the ancestor chain
    /// consistent with where the pointer actually is.
    pub fn set_current_child(&mut self, m: MenuId, value: i32) {
        let count = self.menu(m).items.len() as i32;
        let clamped = value.clamp(-1, count - 1);
        let changed = clamped != self.menu(m).current_child;
        self.menu_mut(m).current_child = clamped;

        if changed
            && matches!(
                self.menu(m).current_event,
                EventModality::Mouse | EventModality::Character
            )
        {
            let modality = self.menu(m).current_event;
            if let Some(parent) = self.menu(m).parent {
                let position = self
                    .menu(parent)
                    .items
                    .iter()
                    .position(|&i| self.item(i).child_menu == Some(m));
                if let Some(position) = position {
                    self.set_current_event(parent, modality);
                    self.set_current_child(parent, position as i32);
                }
            }
        }
    }

    /// String-facing focus-state setter for hosts that mirror attribute
    /// values. Rejects unknown values with the enum-membership message.
    pub fn set_focus_state_value(&mut self, m: MenuId, value: &str) -> Result<(), MenuError> {
        validate::is_valid_state("focusState", value)
            .map_err(|msg| MenuError::Validation(vec![msg]))?;
        if let Some(state) = FocusState::parse(value) {
            self.set_focus_state(m, state);
        }
        Ok(())
    }

    /// String-facing modality setter.
    pub fn set_current_event_value(&mut self, m: MenuId, value: &str) -> Result<(), MenuError> {
        validate::is_valid_event("currentEvent", value)
            .map_err(|msg| MenuError::Validation(vec![msg]))?;
        if let Some(modality) = EventModality::parse(value) {
            self.set_current_event(m, modality);
        }
        Ok(())
    }

    /// String-facing hover-policy setter.
    pub fn set_hover_type_value(&mut self, value: &str) -> Result<(), MenuError> {
        validate::is_valid_hover_type("hoverType", value)
            .map_err(|msg| MenuError::Validation(vec![msg]))?;
        if let Some(hover) = HoverType::parse(value) {
            self.config.hover_type = hover;
        }
        Ok(())
    }

    // -- navigation ------------------------------------------------------

    /// Blur the old current child, repoint, and focus the new one.
    pub fn focus_child(&mut self, dom: &mut Document, m: MenuId, index: i32) {
        self.blur_current_child(m);
        self.set_current_child(m, index);
        self.focus_current_child(dom, m);
    }

    pub fn focus_first_child(&mut self, dom: &mut Document, m: MenuId) {
        self.focus_child(dom, m, 0);
    }

    pub fn focus_last_child(&mut self, dom: &mut Document, m: MenuId) {
        let last = self.menu(m).items.len() as i32 - 1;
        self.focus_child(dom, m, last);
    }

    /// Whether two item indices represent the same logical entry (the
    /// top-link link/toggle pair shares one item element).
    fn same_entry(&self, m: MenuId, a: i32, b: i32) -> bool {
        if a < 0 || b < 0 {
            return false;
        }
        let items = &self.menu(m).items;
        match (items.get(a as usize), items.get(b as usize)) {
            (Some(&ia), Some(&ib)) => self.item(ia).node == self.item(ib).node,
            _ => false,
        }
    }

    /// Focus the next child. Menubars wrap; disclosure menus stop at the
    /// last item. A top-link pair counts as one step.
    pub fn focus_next_child(&mut self, dom: &mut Document, m: MenuId) {
        let count = self.menu(m).items.len() as i32;
        if count == 0 {
            return;
        }
        let current = self.menu(m).current_child;
        let mut next = current + 1;
        if self.same_entry(m, current, next) {
            next += 1;
        }
        if next < count {
            self.focus_child(dom, m, next);
        } else if self.config.pattern.wraps() {
            self.focus_child(dom, m, 0);
        }
    }

    /// Focus the previous child, wrapping under the same rule.
    pub fn focus_previous_child(&mut self, dom: &mut Document, m: MenuId) {
        let count = self.menu(m).items.len() as i32;
        if count == 0 {
            return;
        }
        let current = self.menu(m).current_child;
        let mut prev = if current < 0 { -1 } else { current - 1 };
        if self.same_entry(m, current, prev) {
            prev -= 1;
        }
        if prev >= 0 {
            self.focus_child(dom, m, prev);
        } else if self.config.pattern.wraps() {
            self.focus_child(dom, m, count - 1);
        }
    }

    /// Mark the menu focused and focus its current item.
    pub fn focus_current_child(&mut self, dom: &mut Document, m: MenuId) {
        self.set_focus_state(m, FocusState::Self_);
        let current = self.menu(m).current_child;
        if current >= 0 {
            let item = self.menu(m).items[current as usize];
            self.focus_item(dom, item);
        }
    }

    /// Mark the menu unfocused and blur its current item.
    pub fn blur_current_child(&mut self, m: MenuId) {
        self.set_focus_state(m, FocusState::None);
        let current = self.menu(m).current_child;
        if current >= 0 {
            let item = self.menu(m).items[current as usize];
            self.blur_item(item);
        }
    }

    /// Move DOM focus to the controller button, if one exists.
    pub fn focus_controller(&mut self, dom: &mut Document) {
        let Some(controller) = self.controller else {
            return;
        };
        let node = self.toggle_node(controller).node;
        if let Err(err) = dom.focus(node) {
            warn!(error = %err, "controller focus failed");
        }
        let root = self.root;
        self.set_focus_state(root, FocusState::None);
    }

    /// Move DOM focus to the container element, if one exists.
    pub fn focus_container(&mut self, dom: &mut Document) {
        let Some(container) = self.container else {
            return;
        };
        if let Err(err) = dom.focus(container) {
            warn!(error = %err, "container focus failed");
        }
        let root = self.root;
        self.set_focus_state(root, FocusState::None);
    }

    /// Close every open toggle registered in `m`.
    pub fn close_children(&mut self, dom: &mut Document, m: MenuId) {
        for toggle in self.menu(m).toggles.clone() {
            self.close_toggle(dom, toggle);
        }
    }

    /// Blur every item of `m` and of every descendant menu.
    pub fn blur_children(&mut self, m: MenuId) {
        for item in self.menu(m).items.clone() {
            self.blur_item(item);
            if let Some(child) = self.item(item).child_menu {
                self.blur_children(child);
            }
        }
    }

    /// Typeahead: focus the next item (after the current one, no wrap)
    /// whose link text starts with `c`, case-insensitively.
    pub fn focus_child_matching(&mut self, dom: &mut Document, m: MenuId, c: char) {
        let start = (self.menu(m).current_child + 1).max(0) as usize;
        let items = self.menu(m).items.clone();
        let needle = c.to_ascii_lowercase();
        for (offset, &item) in items.iter().enumerate().skip(start) {
            let link = self.item(item).link;
            let text = dom.tree().text_content(link);
            if text.trim().to_lowercase().starts_with(needle) {
                self.set_current_event(m, EventModality::Character);
                self.focus_child(dom, m, offset as i32);
                return;
            }
        }
    }

    /// Focus the root menu's current child (keyboard entry point for
    /// hosts that manage focus externally).
    pub fn focus(&mut self, dom: &mut Document) {
        let root = self.root;
        self.focus_current_child(dom, root);
    }

    /// Blur the root menu's current child.
    pub fn blur(&mut self) {
        let root = self.root;
        self.blur_current_child(root);
    }

    // -- event entry points ----------------------------------------------

    fn item_for_node(&self, dom: &Document, target: NodeId) -> Option<ItemId> {
        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(&item) = self.node_to_item.get(&node) {
                return Some(item);
            }
            current = dom.tree().parent(node);
        }
        None
    }

    fn item_index(&self, m: MenuId, item: ItemId) -> Option<usize> {
        self.menu(m).items.iter().position(|&i| i == item)
    }

    fn controller_node(&self) -> Option<NodeId> {
        self.controller.map(|t| self.toggle_node(t).node)
    }

    fn bump_hover(&mut self, m: MenuId) -> u32 {
        let node = self.menu_mut(m);
        node.hover_generation = node.hover_generation.wrapping_add(1);
        node.hover_generation
    }

    /// Feed one pointer event to the tree.
    pub fn handle_pointer(&mut self, dom: &mut Document, event: &mut PointerEvent) {
        match event.kind {
            PointerKind::Down => self.pointer_down(dom, event.target),
            PointerKind::Up => self.pointer_up(dom, event),
            PointerKind::Enter if event.pointer_type == PointerType::Mouse => {
                self.pointer_enter(dom, event.target)
            }
            PointerKind::Leave if event.pointer_type == PointerType::Mouse => {
                self.pointer_leave(dom, event.target)
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, dom: &mut Document, target: NodeId) {
        let Some(item) = self.item_for_node(dom, target) else {
            return;
        };
        let menu = self.item(item).parent_menu;
        let root = self.root;
        self.set_current_event(root, EventModality::Mouse);
        self.blur_children(root);
        self.bump_hover(menu);
        if let Some(index) = self.item_index(menu, item) {
            self.focus_child(dom, menu, index as i32);
        }
    }

    fn pointer_up(&mut self, dom: &mut Document, event: &mut PointerEvent) {
        if let Some(toggle) = self.toggle_for_node(dom, event.target) {
            event.suppress();
            self.toggle(dom, toggle);
            if self.toggle_node(toggle).is_open {
                if let Some(parent) = self.toggle_node(toggle).parent_menu {
                    self.set_focus_state(parent, FocusState::Self_);
                }
                let controlled = self.toggle_node(toggle).controlled;
                self.set_focus_state(controlled, FocusState::None);
            }
            return;
        }

        let root_node = self.menu(self.root).node;
        let inside = dom.tree().contains(root_node, event.target)
            || self
                .container
                .is_some_and(|c| dom.tree().contains(c, event.target));
        if !inside {
            self.close_on_outside(dom);
        }
    }

    fn toggle_for_node(&self, dom: &Document, target: NodeId) -> Option<ToggleId> {
        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(&toggle) = self.node_to_toggle.get(&node) {
                return Some(toggle);
            }
            if self.node_to_item.contains_key(&node) {
                // Crossed into the surrounding item: the click hit the
                // item's link, not a toggle control.
                return None;
            }
            current = dom.tree().parent(node);
        }
        None
    }

    /// A click outside the widget closes and blurs the whole tree.
    fn close_on_outside(&mut self, dom: &mut Document) {
        let root = self.root;
        self.close_children(dom, root);
        self.blur_children(root);
        self.set_focus_state(root, FocusState::None);
        self.set_current_event(root, EventModality::None);
        if let Some(controller) = self.controller {
            self.close_toggle(dom, controller);
        }
        debug!("pointer outside menu, tree closed");
    }

    fn pointer_enter(&mut self, dom: &mut Document, target: NodeId) {
        if self.config.hover_type == HoverType::Off {
            return;
        }
        let Some(item) = self.item_for_node(dom, target) else {
            return;
        };
        let menu = self.item(item).parent_menu;
        let Some(index) = self.item_index(menu, item) else {
            return;
        };

        match self.config.hover_type {
            HoverType::On => {
                self.set_current_event(menu, EventModality::Mouse);
                let root = self.root;
                self.blur_children(root);
                self.focus_child(dom, menu, index as i32);
                if let Some(toggle) = self.hover_toggle_of(item) {
                    let delay = self.config.enter_delay_ms();
                    if delay > 0 {
                        let generation = self.bump_hover(menu);
                        self.scheduler.after(
                            delay,
                            TaskAction::HoverPreview {
                                menu,
                                item,
                                generation,
                            },
                        );
                    } else {
                        self.preview_toggle(dom, toggle);
                    }
                }
            }
            HoverType::Dynamic => {
                self.set_current_event(menu, EventModality::Mouse);
                if self.menu(menu).focus_state == FocusState::None {
                    self.set_current_child(menu, index as i32);
                } else {
                    self.focus_child(dom, menu, index as i32);
                }
                // Top-level hover stays inert until a first interaction
                // has opened something; submenus always react.
                let awake = self.config.has_opened || !self.menu(menu).is_top_level;
                if !awake {
                    return;
                }
                let delay = self.config.enter_delay_ms();
                if self.hover_toggle_of(item).is_some() {
                    if delay > 0 {
                        let generation = self.bump_hover(menu);
                        self.scheduler.after(
                            delay,
                            TaskAction::HoverPreview {
                                menu,
                                item,
                                generation,
                            },
                        );
                    } else if let Some(toggle) = self.hover_toggle_of(item) {
                        self.preview_toggle(dom, toggle);
                    }
                } else if delay > 0 {
                    let generation = self.bump_hover(menu);
                    self.scheduler.after(
                        delay,
                        TaskAction::HoverCloseSiblings { menu, generation },
                    );
                } else {
                    self.close_children(dom, menu);
                }
            }
            HoverType::Off => {}
        }
    }

    fn pointer_leave(&mut self, dom: &mut Document, target: NodeId) {
        if self.config.hover_type == HoverType::Off {
            return;
        }
        let Some(item) = self.item_for_node(dom, target) else {
            return;
        };
        let menu = self.item(item).parent_menu;

        match self.config.hover_type {
            HoverType::On => {
                let Some(toggle) = self.hover_toggle_of(item) else {
                    return;
                };
                if !self.toggle_node(toggle).is_open {
                    return;
                }
                let delay = self.config.leave_delay_ms();
                if delay > 0 {
                    let generation = self.bump_hover(menu);
                    self.scheduler.after(
                        delay,
                        TaskAction::HoverClose {
                            menu,
                            item,
                            generation,
                        },
                    );
                } else {
                    self.set_current_event(menu, EventModality::Mouse);
                    self.close_toggle(dom, toggle);
                }
            }
            HoverType::Dynamic => {
                let delay = self.config.leave_delay_ms();
                if delay > 0 {
                    let generation = self.bump_hover(menu);
                    self.scheduler
                        .after(delay, TaskAction::HoverModality { menu, generation });
                } else {
                    self.set_current_event(menu, EventModality::Mouse);
                }
            }
            HoverType::Off => {}
        }
    }

    /// Focus entering an item's link from outside (Tab, programmatic
    /// focus) syncs the menu's state to it.
    pub fn handle_focus_in(&mut self, dom: &mut Document, event: &FocusEvent) {
        let Some(item) = self.item_for_node(dom, event.target) else {
            return;
        };
        let menu = self.item(item).parent_menu;
        self.set_focus_state(menu, FocusState::Self_);
        if let Some(index) = self.item_index(menu, item) {
            self.set_current_child(menu, index as i32);
        }
    }

    /// Keydown decides suppression and flips the modality to keyboard;
    /// behavior waits for keyup.
    pub fn handle_keydown(&mut self, dom: &mut Document, event: &mut KeyboardEvent) {
        let Some(key) = MenuKey::identify(event) else {
            return;
        };
        let Some(target) = dom.active_element() else {
            return;
        };
        if Some(target) == self.controller_node() {
            if matches!(key, MenuKey::Space | MenuKey::Enter) {
                event.suppress();
            }
            return;
        }
        let Some(item) = self.item_for_node(dom, target) else {
            return;
        };
        let menu = self.item(item).parent_menu;
        self.set_current_event(menu, EventModality::Keyboard);
        let ctx = self.key_context(menu, item);
        if pattern::keydown_suppresses(self.config.pattern, key, &ctx) {
            event.suppress();
        }
    }

    /// Keyup resolves the key through the pattern table and executes the
    /// resulting action.
    pub fn handle_keyup(&mut self, dom: &mut Document, event: &mut KeyboardEvent) {
        let Some(key) = MenuKey::identify(event) else {
            return;
        };
        let Some(target) = dom.active_element() else {
            return;
        };
        if Some(target) == self.controller_node() {
            if matches!(key, MenuKey::Space | MenuKey::Enter) {
                event.suppress();
                let Some(controller) = self.controller else {
                    return;
                };
                let root = self.root;
                self.set_current_event(root, EventModality::Keyboard);
                self.toggle(dom, controller);
                if self.toggle_node(controller).is_open {
                    self.focus_first_child(dom, root);
                }
            }
            return;
        }

        let Some(item) = self.item_for_node(dom, target) else {
            return;
        };
        let menu = self.item(item).parent_menu;
        let ctx = self.key_context(menu, item);
        let action = pattern::keyup_action(self.config.pattern, key, &ctx);

        let passthrough = action == KeyAction::None
            || (action == KeyAction::Activate
                && !self.item(item).is_submenu_item
                && self.config.pattern != MenuPattern::Menubar);
        if !passthrough {
            event.suppress();
        }
        if !matches!(action, KeyAction::None | KeyAction::Typeahead(_)) {
            self.set_current_event(menu, EventModality::Keyboard);
        }
        self.apply_key_action(dom, menu, item, action);
    }

    fn key_context(&self, menu: MenuId, item: ItemId) -> KeyContext {
        let node = self.menu(menu);
        KeyContext {
            in_top_level: node.is_top_level,
            is_submenu_item: self.item(item).is_submenu_item,
            has_open_child: node
                .toggles
                .iter()
                .any(|&t| self.toggle_node(t).is_open),
            parent_is_root: node.parent == Some(self.root),
            controller_open: self
                .controller
                .is_some_and(|c| self.toggle_node(c).is_open),
            optional_keys: self.config.optional_key_support,
        }
    }

    fn apply_key_action(
        &mut self,
        dom: &mut Document,
        menu: MenuId,
        item: ItemId,
        action: KeyAction,
    ) {
        match action {
            KeyAction::None => {}
            KeyAction::FocusNext => self.focus_next_child(dom, menu),
            KeyAction::FocusPrevious => self.focus_previous_child(dom, menu),
            KeyAction::FocusFirst => self.focus_first_child(dom, menu),
            KeyAction::FocusLast => self.focus_last_child(dom, menu),
            KeyAction::OpenSubmenuFocusFirst => self.open_into_submenu(dom, item, true),
            KeyAction::OpenSubmenuFocusLast => self.open_into_submenu(dom, item, false),
            KeyAction::Activate => {
                if self.item(item).is_submenu_item {
                    self.open_into_submenu(dom, item, true);
                } else if self.config.pattern == MenuPattern::Menubar {
                    // Keydown already blocked the key's default; tell the
                    // host to follow the link.
                    self.signals.push(MenuSignal {
                        kind: SignalKind::Activate,
                        toggle: None,
                        node: self.item(item).link,
                    });
                }
            }
            KeyAction::EscapeClose => self.escape_close(dom, menu),
            KeyAction::CloseRefocusParent => self.close_refocus_parent(dom, menu),
            KeyAction::CrossNext => self.cross_move(dom, true),
            KeyAction::CrossPrevious => self.cross_move(dom, false),
            KeyAction::OpenAllSubmenus => {
                let root = self.root;
                for toggle in self.menu(root).toggles.clone() {
                    self.open_toggle_keep_siblings(dom, toggle);
                }
            }
            KeyAction::Typeahead(c) => self.focus_child_matching(dom, menu, c),
        }
    }

    fn open_into_submenu(&mut self, dom: &mut Document, item: ItemId, first: bool) {
        let Some(toggle) = self.item(item).toggle else {
            return;
        };
        let controlled = self.toggle_node(toggle).controlled;
        self.set_current_event(controlled, EventModality::Keyboard);
        self.open_toggle(dom, toggle);
        if first {
            self.focus_first_child(dom, controlled);
        } else {
            self.focus_last_child(dom, controlled);
        }
    }

    /// Escape: close the nearest open layer. An open child closes first;
    /// then the focused submenu itself; then the controller.
    fn escape_close(&mut self, dom: &mut Document, menu: MenuId) {
        let has_open_child = self
            .menu(menu)
            .toggles
            .iter()
            .any(|&t| self.toggle_node(t).is_open);
        if has_open_child {
            self.close_children(dom, menu);
            self.set_focus_state(menu, FocusState::Self_);
        } else if !self.menu(menu).is_top_level {
            self.close_refocus_parent(dom, menu);
        } else if let Some(controller) = self.controller {
            if self.toggle_node(controller).is_open {
                self.close_toggle(dom, controller);
                self.focus_controller(dom);
            }
        }
    }

    fn toggle_controlling(&self, menu: MenuId) -> Option<ToggleId> {
        let parent = self.menu(menu).parent?;
        self.menu(parent)
            .toggles
            .iter()
            .copied()
            .find(|&t| self.toggle_node(t).controlled == menu)
    }

    /// Close the focused submenu and put focus back on the item that
    /// controls it.
    fn close_refocus_parent(&mut self, dom: &mut Document, menu: MenuId) {
        let Some(toggle) = self.toggle_controlling(menu) else {
            return;
        };
        let Some(parent) = self.menu(menu).parent else {
            return;
        };
        self.close_toggle(dom, toggle);
        self.set_current_event(parent, EventModality::Keyboard);
        let position = self
            .menu(parent)
            .items
            .iter()
            .position(|&i| self.item(i).child_menu == Some(menu));
        if let Some(position) = position {
            self.focus_child(dom, parent, position as i32);
        }
    }

    /// Menubar ArrowRight/ArrowLeft at a submenu boundary: close
    /// everything, move along the bar, and open the landing submenu.
    fn cross_move(&mut self, dom: &mut Document, forward: bool) {
        let root = self.root;
        self.close_children(dom, root);
        self.set_current_event(root, EventModality::Keyboard);
        if forward {
            self.focus_next_child(dom, root);
        } else {
            self.focus_previous_child(dom, root);
        }
        let current = self.menu(root).current_child;
        if current >= 0 {
            let landed = self.menu(root).items[current as usize];
            if self.item(landed).is_submenu_item {
                self.open_into_submenu(dom, landed, true);
            }
        }
    }

    // -- clock -----------------------------------------------------------

    /// Advance one animation frame and execute the work due on it.
    pub fn run_frame(&mut self, dom: &mut Document) {
        let actions = self.scheduler.run_frame();
        for action in actions {
            self.execute(dom, action);
        }
    }

    /// Advance the millisecond clock and execute the timers now due.
    pub fn advance(&mut self, dom: &mut Document, ms: i64) {
        let actions = self.scheduler.advance(ms);
        for action in actions {
            self.execute(dom, action);
        }
    }

    /// Run frames and time until nothing is queued. Transitions and
    /// hover timers complete; deferred focus moves land.
    pub fn flush(&mut self, dom: &mut Document) {
        for _ in 0..64 {
            if self.scheduler.is_idle() {
                return;
            }
            self.run_frame(dom);
            self.advance(dom, 60_000);
        }
        warn!("scheduler did not settle, pending work dropped");
    }

    fn execute(&mut self, dom: &mut Document, action: TaskAction) {
        match action {
            TaskAction::TransitionStep {
                toggle,
                step,
                generation,
            } => self.apply_transition_step(dom, toggle, step, generation),
            TaskAction::FocusNode { node } => {
                if let Err(err) = dom.focus(node) {
                    warn!(error = %err, "deferred focus failed");
                }
            }
            TaskAction::BlurNode { node } => dom.blur(node),
            TaskAction::HoverPreview {
                menu,
                item,
                generation,
            } => {
                if self.menu(menu).hover_generation != generation {
                    return;
                }
                if let Some(toggle) = self.hover_toggle_of(item) {
                    self.preview_toggle(dom, toggle);
                }
            }
            TaskAction::HoverClose {
                menu,
                item,
                generation,
            } => {
                if self.menu(menu).hover_generation != generation {
                    return;
                }
                self.set_current_event(menu, EventModality::Mouse);
                if let Some(toggle) = self.hover_toggle_of(item) {
                    self.close_toggle(dom, toggle);
                }
            }
            TaskAction::HoverCloseSiblings { menu, generation } => {
                if self.menu(menu).hover_generation != generation {
                    return;
                }
                self.close_children(dom, menu);
            }
            TaskAction::HoverModality { menu, generation } => {
                if self.menu(menu).hover_generation != generation {
                    return;
                }
                self.set_current_event(menu, EventModality::Mouse);
            }
        }
    }

    // -- observation -----------------------------------------------------

    /// Handle of the root menu.
    pub fn root(&self) -> MenuId {
        self.root
    }

    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    pub fn menu_element(&self, m: MenuId) -> NodeId {
        self.menu(m).node
    }

    pub fn parent_menu(&self, m: MenuId) -> Option<MenuId> {
        self.menu(m).parent
    }

    /// The root menu a (possibly nested) menu belongs to.
    pub fn root_of(&self, m: MenuId) -> MenuId {
        self.menu(m).root
    }

    /// The element containing a toggle's control (its item, or the
    /// external container for the controller).
    pub fn toggle_parent_element(&self, t: ToggleId) -> NodeId {
        self.toggle_node(t).parent_node
    }

    pub fn is_top_level(&self, m: MenuId) -> bool {
        self.menu(m).is_top_level
    }

    pub fn items_of(&self, m: MenuId) -> &[ItemId] {
        &self.menu(m).items
    }

    pub fn toggles_of(&self, m: MenuId) -> &[ToggleId] {
        &self.menu(m).toggles
    }

    pub fn focus_state(&self, m: MenuId) -> FocusState {
        self.menu(m).focus_state
    }

    pub fn current_event(&self, m: MenuId) -> EventModality {
        self.menu(m).current_event
    }

    pub fn current_child(&self, m: MenuId) -> i32 {
        self.menu(m).current_child
    }

    pub fn is_open(&self, t: ToggleId) -> bool {
        self.toggle_node(t).is_open
    }

    pub fn toggle_state(&self, t: ToggleId) -> ToggleState {
        self.toggle_node(t).state
    }

    pub fn toggle_element(&self, t: ToggleId) -> NodeId {
        self.toggle_node(t).node
    }

    pub fn controlled_menu(&self, t: ToggleId) -> MenuId {
        self.toggle_node(t).controlled
    }

    pub fn item_element(&self, i: ItemId) -> NodeId {
        self.item(i).node
    }

    pub fn item_link(&self, i: ItemId) -> NodeId {
        self.item(i).link
    }

    pub fn is_submenu_item(&self, i: ItemId) -> bool {
        self.item(i).is_submenu_item
    }

    pub fn submenu_of(&self, i: ItemId) -> Option<MenuId> {
        self.item(i).child_menu
    }

    pub fn toggle_of(&self, i: ItemId) -> Option<ToggleId> {
        self.item(i).toggle
    }

    /// The external controller toggle, if configured.
    pub fn controller(&self) -> Option<ToggleId> {
        self.controller
    }

    /// Whether any toggle has ever opened.
    pub fn has_opened(&self) -> bool {
        self.config.has_opened
    }

    /// The root menu element's DOM id, if it has one.
    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    /// Drain the open/close signals emitted since the last call.
    pub fn take_signals(&mut self) -> Vec<MenuSignal> {
        std::mem::take(&mut self.signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// nav > ul > (li > a) x3, with the middle item owning ul > (li > a) x2.
    fn two_level_dom() -> (Document, NodeId) {
        let mut dom = Document::new();
        let root = dom.tree().root();
        let nav = dom.tree_mut().create_element("nav");
        dom.tree_mut().append_child(root, nav);
        let ul = dom.tree_mut().create_element("ul");
        dom.tree_mut().append_child(nav, ul);

        for (label, nested) in [("Home", false), ("About", true), ("Contact", false)] {
            let li = dom.tree_mut().create_element("li");
            dom.tree_mut().append_child(ul, li);
            let a = dom.tree_mut().create_element("a");
            dom.tree_mut().append_child(li, a);
            let text = dom.tree_mut().create_text(label);
            dom.tree_mut().append_child(a, text);
            if nested {
                let sub = dom.tree_mut().create_element("ul");
                dom.tree_mut().append_child(li, sub);
                for sub_label in ["History", "Team"] {
                    let sub_li = dom.tree_mut().create_element("li");
                    dom.tree_mut().append_child(sub, sub_li);
                    let sub_a = dom.tree_mut().create_element("a");
                    dom.tree_mut().append_child(sub_li, sub_a);
                    let sub_text = dom.tree_mut().create_text(sub_label);
                    dom.tree_mut().append_child(sub_a, sub_text);
                }
            }
        }
        (dom, ul)
    }

    fn build(dom: &mut Document, ul: NodeId) -> MenuTree {
        MenuTree::new(dom, MenuOptions::new(ul)).unwrap()
    }

    #[test]
    fn test_discovery() {
        let (mut dom, ul) = two_level_dom();
        let tree = build(&mut dom, ul);
        assert_eq!(tree.menu_count(), 2);
        let root = tree.root();
        assert_eq!(tree.items_of(root).len(), 3);
        assert_eq!(tree.toggles_of(root).len(), 1);

        let submenu_item = tree.items_of(root)[1];
        assert!(tree.is_submenu_item(submenu_item));
        let submenu = tree.submenu_of(submenu_item).unwrap();
        assert_eq!(tree.items_of(submenu).len(), 2);
        assert_eq!(tree.parent_menu(submenu), Some(root));
    }

    #[test]
    fn test_current_child_clamps() {
        let (mut dom, ul) = two_level_dom();
        let mut tree = build(&mut dom, ul);
        let root = tree.root();

        tree.set_current_child(root, 99);
        assert_eq!(tree.current_child(root), 2);
        tree.set_current_child(root, -7);
        assert_eq!(tree.current_child(root), -1);
    }

    #[test]
    fn test_focus_state_cascades() {
        let (mut dom, ul) = two_level_dom();
        let mut tree = build(&mut dom, ul);
        let root = tree.root();
        let submenu = tree.submenu_of(tree.items_of(root)[1]).unwrap();

        tree.set_focus_state(submenu, FocusState::Self_);
        assert_eq!(tree.focus_state(submenu), FocusState::Self_);
        assert_eq!(tree.focus_state(root), FocusState::Child);

        tree.set_focus_state(root, FocusState::None);
        assert_eq!(tree.focus_state(submenu), FocusState::None);
    }

    #[test]
    fn test_modality_cascades_down() {
        let (mut dom, ul) = two_level_dom();
        let mut tree = build(&mut dom, ul);
        let root = tree.root();
        let submenu = tree.submenu_of(tree.items_of(root)[1]).unwrap();

        tree.set_current_event(root, EventModality::Keyboard);
        assert_eq!(tree.current_event(submenu), EventModality::Keyboard);
    }

    #[test]
    fn test_mouse_child_change_mirrors_to_parent() {
        let (mut dom, ul) = two_level_dom();
        let mut tree = build(&mut dom, ul);
        let root = tree.root();
        let submenu = tree.submenu_of(tree.items_of(root)[1]).unwrap();

        tree.set_current_event(root, EventModality::Mouse);
        tree.set_current_child(submenu, 1);
        // Parent repoints to the item containing the submenu (index 1).
        assert_eq!(tree.current_child(root), 1);
    }

    #[test]
    fn test_keyboard_child_change_does_not_mirror() {
        let (mut dom, ul) = two_level_dom();
        let mut tree = build(&mut dom, ul);
        let root = tree.root();
        let submenu = tree.submenu_of(tree.items_of(root)[1]).unwrap();

        tree.set_current_event(root, EventModality::Keyboard);
        tree.set_current_child(submenu, 1);
        assert_eq!(tree.current_child(root), -1);
    }

    #[test]
    fn test_should_focus_matrix() {
        let (mut dom, ul) = two_level_dom();
        let mut tree = build(&mut dom, ul);
        let root = tree.root();

        assert!(!tree.should_focus(root));
        tree.set_current_event(root, EventModality::Keyboard);
        assert!(tree.should_focus(root));
        tree.set_current_event(root, EventModality::Character);
        assert!(tree.should_focus(root));
        tree.set_current_event(root, EventModality::Mouse);
        assert!(!tree.should_focus(root));
        tree.config.hover_type = HoverType::Dynamic;
        assert!(tree.should_focus(root));
    }

    #[test]
    fn test_tree_debug_format() {
        let (mut dom, ul) = two_level_dom();
        let tree = build(&mut dom, ul);
        let rendered = format!("{tree:?}");
        assert!(rendered.starts_with("MenuTree"));
    }

    #[test]
    fn test_validation_aggregates_failures() {
        let mut dom = Document::new();
        let mut options = MenuOptions::new(NodeId::NONE);
        options.submenu_item_selector = "li > ul".to_string();
        options.transition_duration = -3;
        let err = MenuTree::new(&mut dom, options).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("menuElement must be an instance of HTMLElement. \"number\" given."));
        assert!(text.contains("submenuItemSelector must be a valid CSS selector. \"li > ul\" given."));
        assert!(text.contains(
            "transitionDuration must be a number greater than or equal to -1. \"-3\" given."
        ));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_wrap_only_for_menubar() {
        let (mut dom, ul) = two_level_dom();
        let mut tree = build(&mut dom, ul);
        let root = tree.root();
        tree.set_current_event(root, EventModality::Keyboard);
        tree.focus_last_child(&mut dom, root);
        tree.focus_next_child(&mut dom, root);
        assert_eq!(tree.current_child(root), 2);

        let (mut dom, ul) = two_level_dom();
        let mut tree = MenuTree::new(
            &mut dom,
            MenuOptions::for_pattern(ul, MenuPattern::Menubar),
        )
        .unwrap();
        let root = tree.root();
        tree.set_current_event(root, EventModality::Keyboard);
        tree.focus_last_child(&mut dom, root);
        tree.focus_next_child(&mut dom, root);
        assert_eq!(tree.current_child(root), 0);
    }
}
