//! The two process-wide buses.
//!
//! Both buses are thin wrappers over [`tokio::sync::broadcast`]: every
//! subscriber sees every message, senders are cheap to clone, and
//! emitting with nobody listening is not an error — it returns a
//! delivered count of 0, the same convention the rest of the system
//! uses for "the run has ended, there is nothing to tell".
//!
//! | Bus | Message type | Who emits | Who listens |
//! |-----|--------------|-----------|-------------|
//! | [`MainBus`] | [`MainMessage`] | runner, isolated contexts, contexts on behalf of the relay | relay, capture forwarder |
//! | [`ReporterBus`] | [`ReporterMessage`] | relay (paused), reporter UI (next/resume) | relay, reporter UI |

use tern_event::{MainMessage, ReporterMessage};
use tokio::sync::broadcast;
use tracing::trace;

/// Bus connecting test-execution internals.
///
/// Cloning shares the bus: all clones emit into and subscribe to the
/// same channel.
///
/// # Example
///
/// ```
/// use tern_event::{ControlCommand, MainMessage};
/// use tern_relay::MainBus;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let bus = MainBus::new(64);
/// let mut rx = bus.subscribe();
///
/// let delivered = bus.emit(MainMessage::Control(ControlCommand::Next));
/// assert_eq!(delivered, 1);
///
/// let msg = rx.recv().await.unwrap();
/// assert!(matches!(msg, MainMessage::Control(ControlCommand::Next)));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MainBus {
    tx: broadcast::Sender<MainMessage>,
}

impl MainBus {
    /// Creates a bus with the given per-subscriber buffer capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emits a message to every current subscriber.
    ///
    /// Returns the number of subscribers the message reached. 0 means
    /// nobody was listening — not an error.
    pub fn emit(&self, msg: MainMessage) -> usize {
        let delivered = self.tx.send(msg).unwrap_or(0);
        trace!(delivered, "main bus emit");
        delivered
    }

    /// Creates a new subscription.
    ///
    /// Only messages emitted after this call are observed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MainMessage> {
        self.tx.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Bus connecting test-execution internals to the results UI.
///
/// Carries both directions of the reporter conversation: the relay's
/// outbound `Paused` and the UI's inbound `Next`/`Resume`. Each side
/// ignores its own traffic by matching on the variant.
#[derive(Debug, Clone)]
pub struct ReporterBus {
    tx: broadcast::Sender<ReporterMessage>,
}

impl ReporterBus {
    /// Creates a bus with the given per-subscriber buffer capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emits a message to every current subscriber.
    ///
    /// Returns the number of subscribers reached; 0 is not an error.
    pub fn emit(&self, msg: ReporterMessage) -> usize {
        let delivered = self.tx.send(msg).unwrap_or(0);
        trace!(delivered, "reporter bus emit");
        delivered
    }

    /// Creates a new subscription.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ReporterMessage> {
        self.tx.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_event::{ControlCommand, PauseNotice};

    #[tokio::test]
    async fn emit_with_no_subscribers_is_zero_not_error() {
        let bus = MainBus::new(8);
        let delivered = bus.emit(MainMessage::Control(ControlCommand::Next));
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn emit_reaches_every_subscriber() {
        let bus = MainBus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let delivered = bus.emit(MainMessage::Paused(PauseNotice::main("get")));
        assert_eq!(delivered, 2);

        assert!(rx1.recv().await.unwrap().is_paused());
        assert!(rx2.recv().await.unwrap().is_paused());
    }

    #[tokio::test]
    async fn clones_share_the_channel() {
        let bus = ReporterBus::new(8);
        let clone = bus.clone();
        let mut rx = bus.subscribe();

        clone.emit(ReporterMessage::Next);

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg, ReporterMessage::Next);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_messages() {
        let bus = ReporterBus::new(8);
        bus.emit(ReporterMessage::Next);

        let mut rx = bus.subscribe();
        bus.emit(ReporterMessage::Resume);

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg, ReporterMessage::Resume);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn receiver_count_tracks_subscriptions() {
        let bus = MainBus::new(8);
        assert_eq!(bus.receiver_count(), 0);

        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);

        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }
}
