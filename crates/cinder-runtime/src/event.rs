//! Loop events and the input-source abstraction

use std::collections::VecDeque;
use winit::keyboard::KeyCode;

/// A discrete input event fed to the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// Terminate the loop.
    Quit,
    /// The window lost input focus.
    FocusLost,
    /// The window regained input focus.
    FocusGained,
    /// A key went down.
    KeyPressed(KeyCode),
    /// A key went up.
    KeyReleased(KeyCode),
}

impl LoopEvent {
    /// Whether `other` resumes a pause that `self` triggered.
    ///
    /// A focus-loss pause ends when focus returns; a key pause ends when
    /// the same key is pressed again.
    pub fn resumed_by(&self, other: &LoopEvent) -> bool {
        match (self, other) {
            (LoopEvent::FocusLost, LoopEvent::FocusGained) => true,
            (LoopEvent::KeyPressed(pause), LoopEvent::KeyPressed(resume)) => pause == resume,
            _ => false,
        }
    }
}

/// Produces the loop's input events.
///
/// `poll_event` drains pending events without blocking; `wait_event`
/// parks the caller until the next event arrives. The paused loop only
/// calls `wait_event`, so implementations backed by a real window queue
/// should suspend the thread rather than spin.
pub trait EventSource {
    fn poll_event(&mut self) -> Option<LoopEvent>;
    fn wait_event(&mut self) -> LoopEvent;
}

/// A pre-scripted event queue, used by tests and headless runs.
///
/// Once the queue runs dry, `wait_event` reports `Quit`: a drained
/// source has nothing left that could ever resume the loop.
#[derive(Default)]
pub struct EventQueue {
    events: VecDeque<LoopEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LoopEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for EventQueue {
    fn poll_event(&mut self) -> Option<LoopEvent> {
        self.events.pop_front()
    }

    fn wait_event(&mut self) -> LoopEvent {
        self.events.pop_front().unwrap_or(LoopEvent::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_pause_resumes_on_focus_gain() {
        assert!(LoopEvent::FocusLost.resumed_by(&LoopEvent::FocusGained));
        assert!(!LoopEvent::FocusLost.resumed_by(&LoopEvent::FocusLost));
        assert!(!LoopEvent::FocusLost.resumed_by(&LoopEvent::KeyPressed(KeyCode::Space)));
    }

    #[test]
    fn key_pause_resumes_on_same_key_only() {
        let pause = LoopEvent::KeyPressed(KeyCode::Space);
        assert!(pause.resumed_by(&LoopEvent::KeyPressed(KeyCode::Space)));
        assert!(!pause.resumed_by(&LoopEvent::KeyPressed(KeyCode::KeyP)));
        assert!(!pause.resumed_by(&LoopEvent::KeyReleased(KeyCode::Space)));
        assert!(!pause.resumed_by(&LoopEvent::FocusGained));
    }

    #[test]
    fn queue_drains_in_order() {
        let mut queue = EventQueue::new();
        queue.push(LoopEvent::FocusLost);
        queue.push(LoopEvent::FocusGained);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.poll_event(), Some(LoopEvent::FocusLost));
        assert_eq!(queue.poll_event(), Some(LoopEvent::FocusGained));
        assert_eq!(queue.poll_event(), None);
    }

    #[test]
    fn exhausted_queue_waits_out_as_quit() {
        let mut queue = EventQueue::new();
        queue.push(LoopEvent::KeyPressed(KeyCode::Space));
        assert_eq!(queue.wait_event(), LoopEvent::KeyPressed(KeyCode::Space));
        assert_eq!(queue.wait_event(), LoopEvent::Quit);
    }
}
