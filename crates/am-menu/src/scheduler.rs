//! Scheduler
//!
//! Explicit replacement for animation-frame chaining and hover timeouts.
//! Work is queued as data (`TaskAction`) due either on a future frame or
//! after a millisecond delay; the host drives both clocks through
//! `MenuTree::run_frame` / `MenuTree::advance`. Every task carries the
//! generation that scheduled it, so a superseded sequence is dropped when
//! it fires instead of racing the new one.

use crate::{ItemId, MenuId, ToggleId};
use am_dom::NodeId;

/// One step of the staged open/close class dance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransitionStep {
    /// Remove the "from" state class (first frame).
    ClearFromClass,
    /// Apply the "to" state class and start the settle timer (second frame).
    ApplyToClass,
    /// Remove the transition class and finalize the state (after duration).
    Settle,
}

/// Deferred work, scheduled by event handlers and executed by the tree.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TaskAction {
    TransitionStep {
        toggle: ToggleId,
        step: TransitionStep,
        generation: u32,
    },
    /// Deferred DOM focus move (focus calls leave the triggering event's
    /// synchronous phase).
    FocusNode { node: NodeId },
    /// Deferred DOM blur.
    BlurNode { node: NodeId },
    /// Delayed hover preview of an item's submenu.
    HoverPreview {
        menu: MenuId,
        item: ItemId,
        generation: u32,
    },
    /// Delayed hover close of an item's open submenu.
    HoverClose {
        menu: MenuId,
        item: ItemId,
        generation: u32,
    },
    /// Delayed close of every open sibling submenu (dynamic hover).
    HoverCloseSiblings { menu: MenuId, generation: u32 },
    /// Delayed modality flip to mouse (dynamic hover leave).
    HoverModality { menu: MenuId, generation: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    Frame(u64),
    At(i64),
}

#[derive(Debug)]
struct Task {
    due: Due,
    seq: u64,
    action: TaskAction,
}

/// Frame- and time-based task queue.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    frame: u64,
    now_ms: i64,
    seq: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action for `frames_ahead` frames from now (1 = next frame).
    pub fn on_frame(&mut self, frames_ahead: u64, action: TaskAction) {
        let due = Due::Frame(self.frame + frames_ahead);
        self.push(due, action);
    }

    /// Queue an action `delay_ms` milliseconds from now.
    pub fn after(&mut self, delay_ms: i64, action: TaskAction) {
        let due = Due::At(self.now_ms + delay_ms.max(0));
        self.push(due, action);
    }

    fn push(&mut self, due: Due, action: TaskAction) {
        self.seq += 1;
        self.tasks.push(Task {
            due,
            seq: self.seq,
            action,
        });
    }

    /// Advance one frame and drain the actions due on it.
    pub fn run_frame(&mut self) -> Vec<TaskAction> {
        self.frame += 1;
        let frame = self.frame;
        self.drain(|due| matches!(due, Due::Frame(f) if f <= frame))
    }

    /// Advance the clock and drain the timer actions now due.
    pub fn advance(&mut self, ms: i64) -> Vec<TaskAction> {
        self.now_ms += ms.max(0);
        let now = self.now_ms;
        self.drain(|due| matches!(due, Due::At(at) if at <= now))
    }

    fn drain(&mut self, is_due: impl Fn(Due) -> bool) -> Vec<TaskAction> {
        let mut due: Vec<Task> = Vec::new();
        let mut rest: Vec<Task> = Vec::new();
        for task in self.tasks.drain(..) {
            if is_due(task.due) {
                due.push(task);
            } else {
                rest.push(task);
            }
        }
        self.tasks = rest;
        due.sort_by_key(|t| {
            let at = match t.due {
                Due::Frame(f) => f as i64,
                Due::At(at) => at,
            };
            (at, t.seq)
        });
        due.into_iter().map(|t| t.action).collect()
    }

    /// Whether anything is still queued.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus_task(id: u32) -> TaskAction {
        TaskAction::FocusNode {
            node: node_for_test(id),
        }
    }

    fn node_for_test(_id: u32) -> NodeId {
        NodeId::ROOT
    }

    #[test]
    fn test_frame_sequencing() {
        let mut sched = Scheduler::new();
        sched.on_frame(1, focus_task(1));
        sched.on_frame(2, focus_task(2));

        assert_eq!(sched.run_frame().len(), 1);
        assert_eq!(sched.run_frame().len(), 1);
        assert!(sched.is_idle());
    }

    #[test]
    fn test_timer_ordering() {
        let mut sched = Scheduler::new();
        sched.after(250, focus_task(1));
        sched.after(100, focus_task(2));

        assert!(sched.advance(50).is_empty());
        assert_eq!(sched.advance(50).len(), 1);
        assert_eq!(sched.advance(200).len(), 1);
        assert!(sched.is_idle());
    }

    #[test]
    fn test_frames_do_not_consume_timers() {
        let mut sched = Scheduler::new();
        sched.after(10, focus_task(1));
        assert!(sched.run_frame().is_empty());
        assert_eq!(sched.advance(10).len(), 1);
    }
}
