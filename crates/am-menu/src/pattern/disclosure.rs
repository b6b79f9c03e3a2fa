//! Disclosure navigation menu keys
//!
//! Space/Enter toggle submenu items, Escape walks the open chain back
//! toward the root (and the controller, when one exists). Arrow, Home,
//! and End navigation is opt-in.

use super::{KeyAction, KeyContext};
use crate::key::MenuKey;

pub(super) fn suppresses(key: MenuKey, ctx: &KeyContext) -> bool {
    match key {
        MenuKey::Space | MenuKey::Enter => ctx.is_submenu_item,
        MenuKey::Escape => {
            ctx.has_open_child || !ctx.in_top_level || ctx.controller_open
        }
        MenuKey::ArrowUp
        | MenuKey::ArrowDown
        | MenuKey::ArrowLeft
        | MenuKey::ArrowRight
        | MenuKey::Home
        | MenuKey::End => ctx.optional_keys,
        _ => false,
    }
}

pub(super) fn action(key: MenuKey, ctx: &KeyContext) -> KeyAction {
    match key {
        MenuKey::Space | MenuKey::Enter => KeyAction::Activate,
        MenuKey::Escape => KeyAction::EscapeClose,
        MenuKey::ArrowDown | MenuKey::ArrowRight if ctx.optional_keys => KeyAction::FocusNext,
        MenuKey::ArrowUp | MenuKey::ArrowLeft if ctx.optional_keys => KeyAction::FocusPrevious,
        MenuKey::Home if ctx.optional_keys => KeyAction::FocusFirst,
        MenuKey::End if ctx.optional_keys => KeyAction::FocusLast,
        _ => KeyAction::None,
    }
}
