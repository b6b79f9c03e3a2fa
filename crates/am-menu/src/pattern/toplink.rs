//! Top-link disclosure keys
//!
//! Same matrix as the plain disclosure menu. The variant differs in
//! structure, not keys: each top-level entry is a link item paired with
//! a separate toggle-button item, so Space/Enter on the link keeps its
//! navigation default while the button item toggles the submenu.

use super::{KeyAction, KeyContext};
use crate::key::MenuKey;

pub(super) fn suppresses(key: MenuKey, ctx: &KeyContext) -> bool {
    super::disclosure::suppresses(key, ctx)
}

pub(super) fn action(key: MenuKey, ctx: &KeyContext) -> KeyAction {
    super::disclosure::action(key, ctx)
}
