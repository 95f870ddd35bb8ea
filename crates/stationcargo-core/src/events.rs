//! Change notifications for presentation and replication layers.
//!
//! Every successful mutation (and the deliberately-notified rejections, see
//! checkout) pushes an event here. A replication layer outside this crate
//! drains the queue each frame and re-reads whatever projections it needs;
//! events carry no payload and no acknowledgment.

/// Which projection of the economy changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyEvent {
    CartChanged,
    ShuttleChanged,
    CreditsChanged,
    CategoryChanged,
    TimerChanged,
}

/// Fire-and-forget event queue, drained by the consumer.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<EconomyEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: EconomyEvent) {
        self.pending.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<EconomyEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
