//! Pattern keyboard tables
//!
//! One generic coordination core, three keyboard matrices. Each pattern
//! maps (canonical key, focus context) to a `KeyAction`; a single
//! executor in the menu core applies the action. Keydown decides only
//! suppression; keyup carries the behavior.

mod disclosure;
mod menubar;
mod toplink;

use crate::key::MenuKey;
use crate::state::MenuPattern;

/// Where focus sits when a key arrives.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyContext {
    /// The focused menu is the root (menubar / top disclosure list).
    pub in_top_level: bool,
    /// The current item controls a submenu.
    pub is_submenu_item: bool,
    /// Some toggle in the focused menu is open.
    pub has_open_child: bool,
    /// The focused menu's parent is the root menu.
    pub parent_is_root: bool,
    /// The top-level controller is open.
    pub controller_open: bool,
    /// Arrow/Home/End support is enabled (Disclosure/TopLink).
    pub optional_keys: bool,
}

/// What a key resolves to. The executor interprets these against the
/// focused menu and item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    None,
    FocusNext,
    FocusPrevious,
    FocusFirst,
    FocusLast,
    /// Open the current item's submenu and focus its first child.
    OpenSubmenuFocusFirst,
    /// Open the current item's submenu and focus its last child.
    OpenSubmenuFocusLast,
    /// Space/Enter: open a submenu item, otherwise leave the link's
    /// default activation to the host.
    Activate,
    /// Escape: close the nearest open submenu (or the controller) and
    /// restore focus accordingly.
    EscapeClose,
    /// Close the focused submenu and refocus its controlling item.
    CloseRefocusParent,
    /// Menubar: leave the submenu tree and move to the next top-level
    /// item, opening its submenu if it has one.
    CrossNext,
    /// Menubar: same, toward the previous top-level item.
    CrossPrevious,
    /// Menubar Asterisk: open every top-level submenu.
    OpenAllSubmenus,
    /// Typeahead: focus the next item starting with the character.
    Typeahead(char),
}

/// Whether keydown should block the key's default action.
pub(crate) fn keydown_suppresses(pattern: MenuPattern, key: MenuKey, ctx: &KeyContext) -> bool {
    match pattern {
        MenuPattern::Disclosure => disclosure::suppresses(key, ctx),
        MenuPattern::Menubar => menubar::suppresses(key, ctx),
        MenuPattern::TopLink => toplink::suppresses(key, ctx),
    }
}

/// The action a keyup resolves to.
pub(crate) fn keyup_action(pattern: MenuPattern, key: MenuKey, ctx: &KeyContext) -> KeyAction {
    match pattern {
        MenuPattern::Disclosure => disclosure::action(key, ctx),
        MenuPattern::Menubar => menubar::action(key, ctx),
        MenuPattern::TopLink => toplink::action(key, ctx),
    }
}
