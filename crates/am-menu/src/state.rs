//! Menu state enums
//!
//! The tri-state focus marker, the event modality, the hover policy, and
//! the pattern variant tag. Each parses from / serializes to the string
//! vocabulary the DOM contract uses.

/// Where keyboard focus sits relative to a menu: nowhere in it, directly
/// on one of its items, or inside a descendant submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    None,
    Self_,
    Child,
}

impl FocusState {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "self" => Some(Self::Self_),
            "child" => Some(Self::Child),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Self_ => "self",
            Self::Child => "child",
        }
    }
}

/// Which input channel most recently drove a state change. Governs
/// whether focus-moving operations actually touch the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventModality {
    #[default]
    None,
    Mouse,
    Keyboard,
    Character,
}

impl EventModality {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "mouse" => Some(Self::Mouse),
            "keyboard" => Some(Self::Keyboard),
            "character" => Some(Self::Character),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mouse => "mouse",
            Self::Keyboard => "keyboard",
            Self::Character => "character",
        }
    }
}

/// Hover policy for pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverType {
    /// Hover performs no menu-state action.
    #[default]
    Off,
    /// Hover previews submenus and closes them on pointer leave.
    On,
    /// Hover only acts once the menu system is "awake" (has opened once or
    /// focus is inside); close relies on entering elsewhere, not leaving.
    Dynamic,
}

impl HoverType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "on" => Some(Self::On),
            "dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Dynamic => "dynamic",
        }
    }
}

/// Which widget pattern a tree implements. One parameterized core varies
/// default selectors, ARIA roles, and keyboard tables by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPattern {
    /// Toggle buttons revealing adjacent submenus; Space/Enter/Escape
    /// mandatory, arrows optional.
    #[default]
    Disclosure,
    /// `role="menubar"` with the full WAI-ARIA keyboard matrix, wrapping
    /// sibling navigation, roving tabindex, and typeahead.
    Menubar,
    /// Disclosure variant where each submenu entry is a plain link plus an
    /// adjacent toggle button for the same logical entry.
    TopLink,
}

impl MenuPattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disclosure => "disclosure",
            Self::Menubar => "menubar",
            Self::TopLink => "top-link",
        }
    }

    /// Whether sibling navigation wraps at the ends.
    pub(crate) fn wraps(self) -> bool {
        matches!(self, Self::Menubar)
    }
}
