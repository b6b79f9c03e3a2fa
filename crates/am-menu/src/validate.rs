//! Validation guards
//!
//! Predicate family run over construction options. Each guard appends a
//! descriptive failure of the form
//! `<field> must be <constraint>. "<actual>" given.` to the collector;
//! construction aggregates every failure into one error listing them one
//! per line instead of failing fast on the first.

use crate::state::{EventModality, FocusState, HoverType};
use crate::MenuError;
use am_dom::{Document, NodeId, Selector};

/// Collects guard failures across one construction pass.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    failures: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, message: String) {
        self.failures.push(message);
    }

    /// Instance-of-element check. A missing value reports `"undefined"`,
    /// an unresolvable handle reports `"number"`, and a non-element node
    /// reports its node kind.
    pub fn check_element(&mut self, dom: &Document, field: &str, value: Option<NodeId>) {
        let actual = match value {
            None => "undefined",
            Some(id) => match dom.tree().get(id) {
                None => "number",
                Some(node) if node.is_element() => return,
                Some(node) => node.kind_name(),
            },
        };
        self.fail(format!(
            "{field} must be an instance of HTMLElement. \"{actual}\" given."
        ));
    }

    /// Controller and container are both-or-neither; when either is
    /// present, both are validated as elements.
    pub fn check_controller_pair(
        &mut self,
        dom: &Document,
        controller: Option<NodeId>,
        container: Option<NodeId>,
    ) {
        if controller.is_none() && container.is_none() {
            return;
        }
        self.check_element(dom, "controllerElement", controller);
        self.check_element(dom, "containerElement", container);
    }

    /// Valid-CSS-query-selector check.
    pub fn check_selector(&mut self, field: &str, value: &str) {
        if Selector::parse(value).is_none() {
            self.fail(format!(
                "{field} must be a valid CSS selector. \"{value}\" given."
            ));
        }
    }

    /// Valid-class-list check: every entry must be a non-empty string that
    /// also passes the selector-shape check (class names double as
    /// selectors).
    pub fn check_class_list(&mut self, field: &str, values: &[String]) {
        for value in values {
            if value.is_empty() || Selector::parse(value).is_none() {
                self.fail(format!(
                    "{field} must be a string or an array of strings. \"{value}\" given."
                ));
            }
        }
    }

    /// Numeric check: durations and delays accept -1 ("inherit") and up.
    pub fn check_duration(&mut self, field: &str, value: i64) {
        if value < -1 {
            self.fail(format!(
                "{field} must be a number greater than or equal to -1. \"{value}\" given."
            ));
        }
    }

    pub fn finish(self) -> Result<(), MenuError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(MenuError::Validation(self.failures))
        }
    }
}

/// Enum-membership guard for focus-state strings.
pub(crate) fn is_valid_state(field: &str, value: &str) -> Result<(), String> {
    FocusState::parse(value).map(|_| ()).ok_or_else(|| {
        format!("{field} must be one of the following values: none, self, child. \"{value}\" given.")
    })
}

/// Enum-membership guard for event-modality strings.
pub(crate) fn is_valid_event(field: &str, value: &str) -> Result<(), String> {
    EventModality::parse(value).map(|_| ()).ok_or_else(|| {
        format!(
            "{field} must be one of the following values: none, mouse, keyboard, character. \"{value}\" given."
        )
    })
}

/// Enum-membership guard for hover-type strings.
pub(crate) fn is_valid_hover_type(field: &str, value: &str) -> Result<(), String> {
    HoverType::parse(value).map(|_| ()).ok_or_else(|| {
        format!(
            "{field} must be one of the following values: off, on, dynamic. \"{value}\" given."
        )
    })
}
