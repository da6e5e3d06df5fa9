//! User actions and the cross-thread action queue.
//!
//! Input sources outside the control loop (the pedal signal listener, any
//! future hardware trigger) never touch shared state. They hold a cloned
//! [`Sender`] and enqueue an [`Action`]; the single control loop drains
//! the queue each tick and applies the actions serially. The channel is
//! unbounded, which is fine at pedal press rates.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// A user request against the teleprompter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    NextPage,
    PrevPage,
    NextSong,
    PrevSong,
    FirstPage,
    LastPage,
    ZoomIn,
    ZoomOut,
    Quit,
}

/// Single-consumer action queue between input producers and the control
/// loop.
#[derive(Debug)]
pub struct ActionQueue {
    tx: Sender<Action>,
    rx: Receiver<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// A sender handle for a producer thread.
    pub fn sender(&self) -> Sender<Action> {
        self.tx.clone()
    }

    /// Pop the next pending action, if any. Never blocks.
    pub fn try_recv(&self) -> Option<Action> {
        self.rx.try_recv().ok()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
