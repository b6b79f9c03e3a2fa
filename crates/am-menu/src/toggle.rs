//! Menu toggles
//!
//! A toggle controls exactly one child menu's visibility. Open/close
//! drive the staged class dance: apply the transition class, clear the
//! "from" class on the next frame, apply the "to" class on the frame
//! after, then drop the transition class once the duration elapses. Each
//! request bumps the toggle's generation; steps from a superseded request
//! are dropped when they fire.

use tracing::debug;

use crate::aria;
use crate::menu::{MenuSignal, MenuTree, SignalKind};
use crate::scheduler::{TaskAction, TransitionStep};
use crate::state::FocusState;
use crate::{MenuId, ToggleId};
use am_dom::{Document, NodeId};

/// Visual-presentation state of a toggle's controlled menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Closed,
    /// Transitioning toward open.
    Entering,
    Open,
    /// Transitioning toward closed.
    Leaving,
}

/// One toggle in the arena.
#[derive(Debug)]
pub(crate) struct ToggleNode {
    /// The toggle control element.
    pub node: NodeId,
    /// The element containing the toggle (item element or the external
    /// container).
    pub parent_node: NodeId,
    /// The menu this toggle shows/hides.
    pub controlled: MenuId,
    /// The menu the toggle itself lives in; `None` for the top-level
    /// controller.
    pub parent_menu: Option<MenuId>,
    pub is_open: bool,
    pub state: ToggleState,
    /// Invalidates in-flight transition steps when bumped.
    pub generation: u32,
}

fn add_classes(dom: &mut Document, node: NodeId, classes: &[String]) {
    if classes.is_empty() {
        return;
    }
    let refs: Vec<&str> = classes.iter().map(String::as_str).collect();
    if let Some(elem) = dom.tree_mut().element_mut(node) {
        elem.add_classes(&refs);
    }
}

fn remove_classes(dom: &mut Document, node: NodeId, classes: &[String]) {
    if classes.is_empty() {
        return;
    }
    let refs: Vec<&str> = classes.iter().map(String::as_str).collect();
    if let Some(elem) = dom.tree_mut().element_mut(node) {
        elem.remove_classes(&refs);
    }
}

impl MenuTree {
    /// Open a toggle's controlled menu. No-op if already open. Closes any
    /// open sibling submenu first, so only one is ever open per parent.
    pub fn open_toggle(&mut self, dom: &mut Document, t: ToggleId) {
        if self.toggle_node(t).is_open {
            return;
        }
        self.close_sibling_toggles(dom, t);
        let controlled = self.toggle_node(t).controlled;
        self.set_focus_state(controlled, FocusState::Self_);
        self.expand(dom, t, true);
        self.toggle_node_mut(t).is_open = true;
        self.config.has_opened = true;
        debug!(toggle = t.0, "toggle opened");
    }

    /// Open without moving focus into the controlled menu: the parent
    /// menu keeps focus instead. Used by hover.
    pub fn preview_toggle(&mut self, dom: &mut Document, t: ToggleId) {
        if self.toggle_node(t).is_open {
            return;
        }
        self.close_sibling_toggles(dom, t);
        if let Some(parent) = self.toggle_node(t).parent_menu {
            self.set_focus_state(parent, FocusState::Self_);
        }
        self.expand(dom, t, true);
        self.toggle_node_mut(t).is_open = true;
        self.config.has_opened = true;
        debug!(toggle = t.0, "toggle previewed");
    }

    /// Open without closing open siblings. Menubar Asterisk expands every
    /// top-level submenu at once.
    pub(crate) fn open_toggle_keep_siblings(&mut self, dom: &mut Document, t: ToggleId) {
        if self.toggle_node(t).is_open {
            return;
        }
        if let Some(parent) = self.toggle_node(t).parent_menu {
            self.set_focus_state(parent, FocusState::Self_);
        }
        self.expand(dom, t, true);
        self.toggle_node_mut(t).is_open = true;
        self.config.has_opened = true;
    }

    /// Close a toggle's controlled menu. No-op if already closed. Closes
    /// open descendants first, blurs the controlled menu, and hands focus
    /// state back to the parent.
    pub fn close_toggle(&mut self, dom: &mut Document, t: ToggleId) {
        if !self.toggle_node(t).is_open {
            return;
        }
        self.close_child_toggles(dom, t);
        let controlled = self.toggle_node(t).controlled;
        self.blur_current_child(controlled);
        self.set_current_child(controlled, 0);
        if let Some(parent) = self.toggle_node(t).parent_menu {
            self.set_focus_state(parent, FocusState::Self_);
        }
        self.collapse(dom, t, true);
        self.toggle_node_mut(t).is_open = false;
        debug!(toggle = t.0, "toggle closed");
    }

    /// Close if open, else open.
    pub fn toggle(&mut self, dom: &mut Document, t: ToggleId) {
        if self.toggle_node(t).is_open {
            self.close_toggle(dom, t);
        } else {
            self.open_toggle(dom, t);
        }
    }

    /// Close every other toggle registered under the same parent menu.
    pub fn close_sibling_toggles(&mut self, dom: &mut Document, t: ToggleId) {
        let Some(parent) = self.toggle_node(t).parent_menu else {
            return;
        };
        for other in self.menu(parent).toggles.clone() {
            if other != t {
                self.close_toggle(dom, other);
            }
        }
    }

    /// Close every toggle registered under the menu this toggle controls.
    pub fn close_child_toggles(&mut self, dom: &mut Document, t: ToggleId) {
        let controlled = self.toggle_node(t).controlled;
        for child in self.menu(controlled).toggles.clone() {
            self.close_toggle(dom, child);
        }
    }

    /// Drive the DOM to the open visual state. `aria-expanded` flips
    /// immediately; class changes follow the staged sequence.
    pub(crate) fn expand(&mut self, dom: &mut Document, t: ToggleId, emit: bool) {
        let node = self.toggle_node(t).node;
        aria::set_attr(dom, node, "aria-expanded", "true");
        self.run_transition(dom, t, true);
        if emit {
            self.signals.push(MenuSignal {
                kind: SignalKind::Expand,
                toggle: Some(t),
                node,
            });
        }
    }

    /// Drive the DOM to the closed visual state.
    pub(crate) fn collapse(&mut self, dom: &mut Document, t: ToggleId, emit: bool) {
        let node = self.toggle_node(t).node;
        aria::set_attr(dom, node, "aria-expanded", "false");
        self.run_transition(dom, t, false);
        if emit {
            self.signals.push(MenuSignal {
                kind: SignalKind::Collapse,
                toggle: Some(t),
                node,
            });
        }
    }

    fn run_transition(&mut self, dom: &mut Document, t: ToggleId, opening: bool) {
        let menu_node = self.menu(self.toggle_node(t).controlled).node;
        let transition = self.config.transition_class.clone();
        let (from, to) = if opening {
            (self.config.close_class.clone(), self.config.open_class.clone())
        } else {
            (self.config.open_class.clone(), self.config.close_class.clone())
        };

        let generation = {
            let tn = self.toggle_node_mut(t);
            tn.generation = tn.generation.wrapping_add(1);
            tn.state = if opening {
                ToggleState::Entering
            } else {
                ToggleState::Leaving
            };
            tn.generation
        };

        if transition.is_empty() {
            remove_classes(dom, menu_node, &from);
            add_classes(dom, menu_node, &to);
            self.toggle_node_mut(t).state = if opening {
                ToggleState::Open
            } else {
                ToggleState::Closed
            };
            return;
        }

        add_classes(dom, menu_node, &transition);
        self.scheduler.on_frame(
            1,
            TaskAction::TransitionStep {
                toggle: t,
                step: TransitionStep::ClearFromClass,
                generation,
            },
        );
        self.scheduler.on_frame(
            2,
            TaskAction::TransitionStep {
                toggle: t,
                step: TransitionStep::ApplyToClass,
                generation,
            },
        );
    }

    /// Execute one scheduled transition step, dropping it if its sequence
    /// has been superseded.
    pub(crate) fn apply_transition_step(
        &mut self,
        dom: &mut Document,
        t: ToggleId,
        step: TransitionStep,
        generation: u32,
    ) {
        if self.toggle_node(t).generation != generation {
            debug!(toggle = t.0, "stale transition step dropped");
            return;
        }
        let state = self.toggle_node(t).state;
        let opening = match state {
            ToggleState::Entering => true,
            ToggleState::Leaving => false,
            _ => return,
        };
        let menu_node = self.menu(self.toggle_node(t).controlled).node;
        let (from, to, duration) = if opening {
            (
                self.config.close_class.clone(),
                self.config.open_class.clone(),
                self.config.open_duration_ms(),
            )
        } else {
            (
                self.config.open_class.clone(),
                self.config.close_class.clone(),
                self.config.close_duration_ms(),
            )
        };

        match step {
            TransitionStep::ClearFromClass => remove_classes(dom, menu_node, &from),
            TransitionStep::ApplyToClass => {
                add_classes(dom, menu_node, &to);
                if duration > 0 {
                    self.scheduler.after(
                        duration,
                        TaskAction::TransitionStep {
                            toggle: t,
                            step: TransitionStep::Settle,
                            generation,
                        },
                    );
                } else {
                    self.settle(dom, t, opening);
                }
            }
            TransitionStep::Settle => self.settle(dom, t, opening),
        }
    }

    fn settle(&mut self, dom: &mut Document, t: ToggleId, opening: bool) {
        let menu_node = self.menu(self.toggle_node(t).controlled).node;
        let transition = self.config.transition_class.clone();
        remove_classes(dom, menu_node, &transition);
        self.toggle_node_mut(t).state = if opening {
            ToggleState::Open
        } else {
            ToggleState::Closed
        };
    }

    /// Force the closed presentation without transition or event. Used
    /// once during initialization.
    pub(crate) fn collapse_immediate(&mut self, dom: &mut Document, t: ToggleId) {
        let node = self.toggle_node(t).node;
        let menu_node = self.menu(self.toggle_node(t).controlled).node;
        aria::set_attr(dom, node, "aria-expanded", "false");
        let open = self.config.open_class.clone();
        let close = self.config.close_class.clone();
        remove_classes(dom, menu_node, &open);
        add_classes(dom, menu_node, &close);
        let tn = self.toggle_node_mut(t);
        tn.generation = tn.generation.wrapping_add(1);
        tn.state = ToggleState::Closed;
        tn.is_open = false;
    }
}
