//! Menubar keys
//!
//! The full WAI-ARIA menubar matrix. Horizontal arrows move across the
//! bar, vertical arrows move within a submenu; ArrowRight/ArrowLeft at a
//! submenu boundary cross to the adjacent top-level item. Typeahead and
//! Asterisk are always on. Everything except Tab is claimed on keydown.

use super::{KeyAction, KeyContext};
use crate::key::MenuKey;

pub(super) fn suppresses(key: MenuKey, _ctx: &KeyContext) -> bool {
    !matches!(key, MenuKey::Tab)
}

pub(super) fn action(key: MenuKey, ctx: &KeyContext) -> KeyAction {
    if ctx.in_top_level {
        top_level(key, ctx)
    } else {
        submenu(key, ctx)
    }
}

fn top_level(key: MenuKey, ctx: &KeyContext) -> KeyAction {
    match key {
        MenuKey::ArrowRight => KeyAction::FocusNext,
        MenuKey::ArrowLeft => KeyAction::FocusPrevious,
        MenuKey::ArrowDown | MenuKey::Space | MenuKey::Enter if ctx.is_submenu_item => {
            KeyAction::OpenSubmenuFocusFirst
        }
        MenuKey::ArrowUp if ctx.is_submenu_item => KeyAction::OpenSubmenuFocusLast,
        MenuKey::Space | MenuKey::Enter => KeyAction::Activate,
        MenuKey::Home => KeyAction::FocusFirst,
        MenuKey::End => KeyAction::FocusLast,
        MenuKey::Escape => KeyAction::EscapeClose,
        MenuKey::Asterisk => KeyAction::OpenAllSubmenus,
        MenuKey::Character(c) => KeyAction::Typeahead(c),
        _ => KeyAction::None,
    }
}

fn submenu(key: MenuKey, ctx: &KeyContext) -> KeyAction {
    match key {
        MenuKey::ArrowDown => KeyAction::FocusNext,
        MenuKey::ArrowUp => KeyAction::FocusPrevious,
        MenuKey::ArrowRight if ctx.is_submenu_item => KeyAction::OpenSubmenuFocusFirst,
        MenuKey::ArrowRight => KeyAction::CrossNext,
        MenuKey::ArrowLeft if ctx.parent_is_root => KeyAction::CrossPrevious,
        MenuKey::ArrowLeft => KeyAction::CloseRefocusParent,
        MenuKey::Space | MenuKey::Enter if ctx.is_submenu_item => KeyAction::OpenSubmenuFocusFirst,
        MenuKey::Space | MenuKey::Enter => KeyAction::Activate,
        MenuKey::Home => KeyAction::FocusFirst,
        MenuKey::End => KeyAction::FocusLast,
        MenuKey::Escape => KeyAction::CloseRefocusParent,
        MenuKey::Character(c) => KeyAction::Typeahead(c),
        _ => KeyAction::None,
    }
}
