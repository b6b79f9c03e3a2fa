//! Input events
//!
//! Pointer, keyboard, and focus events as the host delivers them to the
//! menu engine. Each carries the default-prevented / propagation-stopped
//! pair and a `suppress` helper that sets both.

use crate::NodeId;

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Enter,
    Leave,
}

/// Pointer device class. Hover handling ignores pen and touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerType {
    Mouse,
    Pen,
    Touch,
}

/// A pointer event targeting a DOM node
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pointer_type: PointerType,
    pub target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    /// Create a mouse pointer event
    pub fn new(kind: PointerKind, target: NodeId) -> Self {
        Self {
            kind,
            pointer_type: PointerType::Mouse,
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Override the pointer device class
    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    /// Block the default action and stop propagation
    pub fn suppress(&mut self) {
        self.default_prevented = true;
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A keyboard event
#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    /// The raw `key` value, e.g. "Enter", " ", "ArrowDown", "a"
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyboardEvent {
    /// Create a plain key press with no modifiers
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            alt: false,
            meta: false,
            shift: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Block the default action and stop propagation
    pub fn suppress(&mut self) {
        self.default_prevented = true;
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A focus-in event targeting a DOM node
#[derive(Debug, Clone, Copy)]
pub struct FocusEvent {
    pub target: NodeId,
}
