use rvs_core::ID;
use std::collections::HashMap;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;

/// Frames buffered per subscription before the peer counts as stalled.
pub const MAILBOX: usize = 256;

/// Marker type for subscription handles.
#[derive(Debug)]
pub struct Subscription;

/// The two independent fan-out groups of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Chat,
    Game,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Chat => write!(f, "chat"),
            Self::Game => write!(f, "game"),
        }
    }
}

/// Per-session broadcast fan-out.
///
/// Holds delivery channels only, never game state. Lives inside the
/// room behind the session lock, so publishes on one session are
/// observed by every subscriber in invocation order. Sends are
/// best-effort and non-blocking over bounded channels: a dead peer is
/// removed, and so is a stalled one whose buffer of [`MAILBOX`] frames
/// is full, without aborting delivery to the rest.
#[derive(Debug, Default)]
pub struct Hub {
    chat: HashMap<ID<Subscription>, Sender<String>>,
    game: HashMap<ID<Subscription>, Sender<String>>,
}

impl Hub {
    fn group(&mut self, kind: Channel) -> &mut HashMap<ID<Subscription>, Sender<String>> {
        match kind {
            Channel::Chat => &mut self.chat,
            Channel::Game => &mut self.game,
        }
    }
    /// Registers a delivery channel, returning its handle.
    pub fn subscribe(&mut self, kind: Channel, tx: Sender<String>) -> ID<Subscription> {
        let id = ID::default();
        self.group(kind).insert(id, tx);
        log::debug!("[hub] subscribed {} to {}", id, kind);
        id
    }
    /// Removes a delivery channel; no further sends target it.
    pub fn unsubscribe(&mut self, kind: Channel, id: ID<Subscription>) {
        if self.group(kind).remove(&id).is_some() {
            log::debug!("[hub] unsubscribed {} from {}", id, kind);
        }
    }
    /// Fans one frame out to every live subscriber except `skip`
    /// (chat publishes skip the sender; game events echo to everyone).
    /// A closed channel means the peer is gone and a full one means it
    /// stopped reading: either way its handle is dropped and delivery
    /// continues with the rest.
    pub fn publish(&mut self, kind: Channel, frame: &str, skip: Option<ID<Subscription>>) {
        self.group(kind).retain(|id, tx| {
            if Some(*id) == skip {
                return true;
            }
            match tx.try_send(frame.to_string()) {
                Ok(()) => true,
                Err(TrySendError::Closed(_)) => {
                    log::debug!("[hub] dropping dead subscriber {}", id);
                    false
                }
                Err(TrySendError::Full(_)) => {
                    log::debug!("[hub] dropping stalled subscriber {}", id);
                    false
                }
            }
        });
    }
    pub fn subscribers(&self, kind: Channel) -> usize {
        match kind {
            Channel::Chat => self.chat.len(),
            Channel::Game => self.game.len(),
        }
    }
    /// True when nobody is connected on either channel.
    pub fn deserted(&self) -> bool {
        self.chat.is_empty() && self.game.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::channel;

    #[test]
    fn publish_reaches_all_subscribers_in_order() {
        let mut hub = Hub::default();
        let (tx1, mut rx1) = channel(MAILBOX);
        let (tx2, mut rx2) = channel(MAILBOX);
        hub.subscribe(Channel::Game, tx1);
        hub.subscribe(Channel::Game, tx2);
        hub.publish(Channel::Game, "first", None);
        hub.publish(Channel::Game, "second", None);
        for rx in [&mut rx1, &mut rx2] {
            assert_eq!(rx.try_recv().unwrap(), "first");
            assert_eq!(rx.try_recv().unwrap(), "second");
        }
    }

    #[test]
    fn chat_skips_the_sender() {
        let mut hub = Hub::default();
        let (tx1, mut rx1) = channel(MAILBOX);
        let (tx2, mut rx2) = channel(MAILBOX);
        let sender = hub.subscribe(Channel::Chat, tx1);
        hub.subscribe(Channel::Chat, tx2);
        hub.publish(Channel::Chat, "hello", Some(sender));
        assert!(rx1.try_recv().is_err());
        assert_eq!(rx2.try_recv().unwrap(), "hello");
    }

    #[test]
    fn dead_subscriber_does_not_abort_fan_out() {
        let mut hub = Hub::default();
        let (tx1, rx1) = channel(MAILBOX);
        let (tx2, mut rx2) = channel(MAILBOX);
        hub.subscribe(Channel::Game, tx1);
        hub.subscribe(Channel::Game, tx2);
        drop(rx1);
        hub.publish(Channel::Game, "still here", None);
        assert_eq!(rx2.try_recv().unwrap(), "still here");
        assert_eq!(hub.subscribers(Channel::Game), 1);
    }

    #[test]
    fn stalled_subscriber_is_disconnected_when_buffer_fills() {
        let mut hub = Hub::default();
        let (slow, mut slow_rx) = channel(2);
        let (live, mut live_rx) = channel(MAILBOX);
        hub.subscribe(Channel::Game, slow);
        hub.subscribe(Channel::Game, live);
        // the slow peer never reads; its third frame finds a full buffer
        hub.publish(Channel::Game, "one", None);
        hub.publish(Channel::Game, "two", None);
        hub.publish(Channel::Game, "three", None);
        assert_eq!(hub.subscribers(Channel::Game), 1);
        for frame in ["one", "two", "three"] {
            assert_eq!(live_rx.try_recv().unwrap(), frame);
        }
        assert_eq!(slow_rx.try_recv().unwrap(), "one");
        assert_eq!(slow_rx.try_recv().unwrap(), "two");
        assert!(slow_rx.try_recv().is_err());
        // nothing queues for the stalled peer after its disconnect
        hub.publish(Channel::Game, "four", None);
        assert!(slow_rx.try_recv().is_err());
    }

    #[test]
    fn channels_are_independent() {
        let mut hub = Hub::default();
        let (tx, mut rx) = channel(MAILBOX);
        hub.subscribe(Channel::Chat, tx);
        hub.publish(Channel::Game, "game only", None);
        assert!(rx.try_recv().is_err());
        assert!(!hub.deserted());
    }
}
