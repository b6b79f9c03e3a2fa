//! Key identification
//!
//! Maps a raw keyboard event to the canonical key vocabulary the
//! navigation tables consume. Pure function, no state.

use am_dom::KeyboardEvent;

/// Canonical key names for menu navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Enter,
    Space,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Tab,
    Asterisk,
    /// A printable character without modifiers, used for typeahead.
    Character(char),
}

impl MenuKey {
    /// Identify the canonical key for a raw keyboard event. Returns `None`
    /// for keys the menus never act on.
    pub fn identify(event: &KeyboardEvent) -> Option<Self> {
        match event.key.as_str() {
            "Enter" => Some(Self::Enter),
            " " | "Spacebar" => Some(Self::Space),
            "Escape" | "Esc" => Some(Self::Escape),
            "ArrowUp" | "Up" => Some(Self::ArrowUp),
            "ArrowDown" | "Down" => Some(Self::ArrowDown),
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Tab" => Some(Self::Tab),
            "*" => Some(Self::Asterisk),
            key => {
                if event.ctrl || event.alt || event.meta {
                    return None;
                }
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_none() && c.is_ascii_alphanumeric() {
                    Some(Self::Character(c.to_ascii_lowercase()))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new("Enter")),
            Some(MenuKey::Enter)
        );
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new(" ")),
            Some(MenuKey::Space)
        );
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new("Escape")),
            Some(MenuKey::Escape)
        );
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new("ArrowDown")),
            Some(MenuKey::ArrowDown)
        );
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new("*")),
            Some(MenuKey::Asterisk)
        );
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new("Tab")),
            Some(MenuKey::Tab)
        );
    }

    #[test]
    fn test_characters() {
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new("C")),
            Some(MenuKey::Character('c'))
        );
        assert_eq!(
            MenuKey::identify(&KeyboardEvent::new("7")),
            Some(MenuKey::Character('7'))
        );

        let mut ctrl_c = KeyboardEvent::new("c");
        ctrl_c.ctrl = true;
        assert_eq!(MenuKey::identify(&ctrl_c), None);

        assert_eq!(MenuKey::identify(&KeyboardEvent::new("F5")), None);
        assert_eq!(MenuKey::identify(&KeyboardEvent::new("Shift")), None);
    }
}
