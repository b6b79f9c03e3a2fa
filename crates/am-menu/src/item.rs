//! Menu items
//!
//! One navigable entry: the item element, its link, and its optional
//! submenu wiring. Focus and blur delegate to the owning menu's
//! `should_focus` policy and defer the DOM move to the next frame.

use crate::aria;
use crate::menu::MenuTree;
use crate::scheduler::TaskAction;
use crate::state::MenuPattern;
use crate::{ItemId, MenuId, ToggleId};
use am_dom::{Document, NodeId};

/// One menu item in the arena.
#[derive(Debug)]
pub(crate) struct ItemNode {
    /// The item element (`<li>`-like).
    pub node: NodeId,
    /// The link (or toggle control acting as the link).
    pub link: NodeId,
    /// Owning menu.
    pub parent_menu: MenuId,
    /// Whether this item controls a child menu.
    pub is_submenu_item: bool,
    /// Controlled menu; present iff `is_submenu_item`.
    pub child_menu: Option<MenuId>,
    /// Controlling toggle; present iff `is_submenu_item`.
    pub toggle: Option<ToggleId>,
    /// Top-link pairing: the sibling item representing the same logical
    /// entry (plain link <-> adjacent toggle button).
    pub companion: Option<ItemId>,
}

impl MenuTree {
    /// Focus an item's link, gated by the owning menu's focus policy. The
    /// DOM move happens on the next frame.
    pub(crate) fn focus_item(&mut self, dom: &mut Document, item: ItemId) {
        let (menu, link) = {
            let it = self.item(item);
            (it.parent_menu, it.link)
        };
        self.rove_tabindex(dom, item);
        if !self.should_focus(menu) {
            return;
        }
        self.scheduler.on_frame(1, TaskAction::FocusNode { node: link });
    }

    /// Blur an item's link under the same gate and deferral as focus. The
    /// DOM move itself is the scheduled task's.
    pub(crate) fn blur_item(&mut self, item: ItemId) {
        let (menu, link) = {
            let it = self.item(item);
            (it.parent_menu, it.link)
        };
        if !self.should_focus(menu) {
            return;
        }
        self.scheduler.on_frame(1, TaskAction::BlurNode { node: link });
    }

    /// Roving tab index (Menubar only): exactly one top-level link is
    /// keyboard-tabbable at a time.
    fn rove_tabindex(&mut self, dom: &mut Document, item: ItemId) {
        if self.config.pattern != MenuPattern::Menubar {
            return;
        }
        let menu = self.item(item).parent_menu;
        if !self.menu(menu).is_top_level {
            return;
        }
        for other in self.menu(menu).items.clone() {
            let link = self.item(other).link;
            aria::set_attr(dom, link, "tabindex", "-1");
        }
        let link = self.item(item).link;
        aria::set_attr(dom, link, "tabindex", "0");
    }

    /// The toggle hover interaction should drive for an item: its own, or
    /// its top-link companion's.
    pub(crate) fn hover_toggle_of(&self, item: ItemId) -> Option<ToggleId> {
        let it = self.item(item);
        if let Some(toggle) = it.toggle {
            return Some(toggle);
        }
        it.companion.and_then(|c| self.item(c).toggle)
    }
}
