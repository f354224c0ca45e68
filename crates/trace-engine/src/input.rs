/// Input event types the engine understands.
/// Pointer coordinates are screen pixels; `t` is a millisecond timestamp
/// from the host's monotonic clock (used only for dwell timing).
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { x: f32, y: f32, t: f64 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32, t: f64 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32, t: f64 },
    /// The active pointer was cancelled (e.g. palm rejection, tab switch).
    PointerCancel,
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// The host writes events into the queue; the game reads them each frame
/// and the runner drains the queue after the update pass.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the host boundary).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, t: 0.0 });
        q.push(InputEvent::Resize { width: 640.0, height: 480.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerCancel);
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
