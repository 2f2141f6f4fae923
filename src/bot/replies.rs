//! Single-shot reply subscriptions.
//!
//! A game that has asked a question registers interest in "the next message from this
//! author in this channel" and then awaits it with a deadline. The server offers every
//! inbound message to the hub before treating it as a command; the oldest matching
//! subscription takes it and the message goes nowhere else. Messages from other
//! authors or channels pass straight through and do not disturb the wait.
//!
//! Subscriptions deregister on drop, so a timed-out or cancelled game leaves nothing
//! behind.
use log::trace;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

use super::transport::{ChannelId, InboundMessage, UserId};

struct Waiter {
    id: u64,
    author: UserId,
    channel: ChannelId,
    tx: oneshot::Sender<InboundMessage>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    waiters: Vec<Waiter>,
}

#[derive(Clone, Default)]
pub struct ReplyHub {
    inner: Arc<Mutex<HubInner>>,
}

impl ReplyHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register for the next message from `author` in `channel`.
    pub fn subscribe(&self, author: &UserId, channel: &ChannelId) -> Subscription {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.guard();
        let id = inner.next_id;
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.waiters.push(Waiter {
            id,
            author: author.clone(),
            channel: channel.clone(),
            tx,
        });
        trace!("reply hub: subscription {} for {} in {}", id, author, channel);
        Subscription {
            id,
            rx,
            hub: self.clone(),
        }
    }

    /// Offer `msg` to waiting games.
    ///
    /// Returns `Ok(())` when a subscription consumed it, or gives the message back when
    /// nobody was waiting for it.
    pub fn deliver(&self, msg: InboundMessage) -> Result<(), InboundMessage> {
        let mut inner = self.guard();
        let mut msg = msg;
        let mut idx = 0;
        while idx < inner.waiters.len() {
            let w = &inner.waiters[idx];
            if w.author == msg.author && w.channel == msg.channel {
                let waiter = inner.waiters.remove(idx);
                match waiter.tx.send(msg) {
                    Ok(()) => {
                        trace!("reply hub: delivered to subscription {}", waiter.id);
                        return Ok(());
                    }
                    // Receiver already gone; try the next matching waiter
                    Err(back) => msg = back,
                }
            } else {
                idx += 1;
            }
        }
        Err(msg)
    }

    /// Number of open subscriptions.
    pub fn pending(&self) -> usize {
        self.guard().waiters.len()
    }

    fn cancel(&self, id: u64) {
        self.guard().waiters.retain(|w| w.id != id);
    }
}

/// A registered interest in one reply. Dropping it cancels the registration.
pub struct Subscription {
    id: u64,
    rx: oneshot::Receiver<InboundMessage>,
    hub: ReplyHub,
}

impl Subscription {
    /// Wait up to `deadline` for the reply. `None` means the deadline passed.
    pub async fn recv_within(mut self, deadline: Duration) -> Option<InboundMessage> {
        match tokio::time::timeout(deadline, &mut self.rx).await {
            Ok(Ok(msg)) => Some(msg),
            Ok(Err(_)) => None,
            // A reply that landed at the exact moment the deadline fired still counts
            Err(_) => self.rx.try_recv().ok(),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.cancel(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn only_matching_author_and_channel_resolve() {
        let hub = ReplyHub::new();
        let sub = hub.subscribe(&UserId::from("alice"), &ChannelId::from("latin"));

        // Wrong author, wrong channel: handed back untouched
        let other = hub.deliver(InboundMessage::new("bob", "latin", "amor"));
        assert_eq!(other.unwrap_err().text, "amor");
        let elsewhere = hub.deliver(InboundMessage::new("alice", "greek", "amor"));
        assert!(elsewhere.is_err());
        assert_eq!(hub.pending(), 1);

        assert!(hub
            .deliver(InboundMessage::new("alice", "latin", "Love"))
            .is_ok());
        let got = sub.recv_within(Duration::from_secs(1)).await.unwrap();
        assert_eq!(got.text, "Love");
        assert_eq!(hub.pending(), 0);
    }

    #[tokio::test]
    async fn timeout_deregisters() {
        let hub = ReplyHub::new();
        let sub = hub.subscribe(&UserId::from("alice"), &ChannelId::from("c"));
        assert!(sub.recv_within(Duration::from_millis(20)).await.is_none());
        assert_eq!(hub.pending(), 0);
        assert!(hub.deliver(InboundMessage::new("alice", "c", "late")).is_err());
    }

    #[tokio::test]
    async fn oldest_subscription_wins() {
        let hub = ReplyHub::new();
        let first = hub.subscribe(&UserId::from("u"), &ChannelId::from("c"));
        let second = hub.subscribe(&UserId::from("u"), &ChannelId::from("c"));
        hub.deliver(InboundMessage::new("u", "c", "one")).unwrap();
        hub.deliver(InboundMessage::new("u", "c", "two")).unwrap();
        assert_eq!(
            first.recv_within(Duration::from_secs(1)).await.unwrap().text,
            "one"
        );
        assert_eq!(
            second.recv_within(Duration::from_secs(1)).await.unwrap().text,
            "two"
        );
    }

    #[test]
    fn dropped_subscription_is_skipped() {
        let hub = ReplyHub::new();
        let sub = hub.subscribe(&UserId::from("u"), &ChannelId::from("c"));
        drop(sub);
        assert!(hub.deliver(InboundMessage::new("u", "c", "x")).is_err());
    }
}
