//! am-menu - Menu focus/state coordination engine
//!
//! Keyboard- and pointer-accessible navigation menus (disclosure menus,
//! menubars, and the top-link variant) following the WAI-ARIA authoring
//! practices. The engine is a tree of menus, items, and toggles held in
//! one arena (`MenuTree`) and addressed by handles, coordinating DOM
//! attributes, CSS classes, keyboard focus, and ARIA state across an
//! arbitrary-depth hierarchy under pointer, keyboard, and focus events.
//!
//! Timing (animation frames, hover delays, transition durations) is
//! explicit: the host drives it through [`MenuTree::run_frame`] and
//! [`MenuTree::advance`], so every staged transition is observable and
//! testable.

mod aria;
mod item;
mod key;
mod menu;
mod options;
mod pattern;
mod registry;
mod scheduler;
mod state;
mod toggle;
mod validate;

pub use key::MenuKey;
pub use menu::{MenuSignal, MenuTree, SignalKind};
pub use options::MenuOptions;
pub use registry::MenuRegistry;
pub use state::{EventModality, FocusState, HoverType, MenuPattern};
pub use toggle::ToggleState;

/// Menu identifier (index into the menu arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub(crate) u32);

/// Menu item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub(crate) u32);

/// Menu toggle identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToggleId(pub(crate) u32);

/// Menu engine errors
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// Aggregated construction-validation failures, one message per line.
    #[error("{}", .0.join("\n"))]
    Validation(Vec<String>),

    /// A non-top-level menu whose parent chain never reaches the root.
    #[error("Cannot find root menu.")]
    NoRootMenu,
}
