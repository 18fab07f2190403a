pub mod events;

use self::events::PointerEvent;
use crossbeam_channel::{unbounded, Receiver, Sender};

pub struct InputQueue {
    sender: Sender<PointerEvent>,
    receiver: Receiver<PointerEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Pushes an event into the queue.
    /// This can be called from any thread holding a [`InputQueue::sender`].
    pub fn push(&self, event: PointerEvent) {
        let _ = self.sender.send(event);
    }

    /// Non-blocking. Returns None if queue is empty.
    pub fn pop(&self) -> Option<PointerEvent> {
        self.receiver.try_recv().ok()
    }

    /// Everything queued so far, in arrival order.
    pub fn drain(&self) -> Vec<PointerEvent> {
        self.receiver.try_iter().collect()
    }

    pub fn sender(&self) -> Sender<PointerEvent> {
        self.sender.clone()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
