//! Transient "emoji burst" shown after reacting to a post.
//!
//! Each trigger supersedes the previous one: the pending reset is cancelled
//! by bumping the generation, so a timer that fires late for an older burst
//! cannot clear a newer one.

use std::time::{Duration, Instant};

use log::debug;

/// Handle for one scheduled reset. Delivering a stale ticket is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingBurst {
    emoji: String,
    generation: u64,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct ReactionBurst {
    duration: Duration,
    generation: u64,
    pending: Option<PendingBurst>,
}

impl ReactionBurst {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            generation: 0,
            pending: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn trigger(&mut self, emoji: &str, now: Instant) -> BurstTicket {
        if let Some(previous) = self.pending.take() {
            debug!(
                "cancelled pending burst reset for {} (generation {})",
                previous.emoji, previous.generation
            );
        }
        self.generation += 1;
        self.pending = Some(PendingBurst {
            emoji: emoji.to_string(),
            generation: self.generation,
            deadline: now + self.duration,
        });
        BurstTicket {
            generation: self.generation,
        }
    }

    /// Clears the burst if `ticket` is still the current one.
    pub fn expire(&mut self, ticket: BurstTicket) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == ticket.generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Clears the burst once its deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        if matches!(&self.pending, Some(pending) if now >= pending.deadline) {
            self.pending = None;
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.emoji.as_str())
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_clears_after_duration() {
        let start = Instant::now();
        let mut burst = ReactionBurst::new(Duration::from_secs(2));
        burst.trigger("❤️", start);
        burst.poll(start + Duration::from_millis(1999));
        assert_eq!(burst.active(), Some("❤️"));
        burst.poll(start + Duration::from_secs(2));
        assert_eq!(burst.active(), None);
    }

    #[test]
    fn retrigger_cancels_previous_reset() {
        let start = Instant::now();
        let mut burst = ReactionBurst::new(Duration::from_secs(2));
        let first = burst.trigger("❤️", start);
        let second = burst.trigger("🔥", start + Duration::from_secs(1));

        assert!(!burst.expire(first));
        assert_eq!(burst.active(), Some("🔥"));
        burst.poll(start + Duration::from_secs(2));
        assert_eq!(burst.active(), Some("🔥"));

        assert!(burst.expire(second));
        assert_eq!(burst.active(), None);
    }

    #[test]
    fn same_emoji_replays_with_fresh_deadline() {
        let start = Instant::now();
        let mut burst = ReactionBurst::new(Duration::from_secs(2));
        burst.trigger("👍", start);
        burst.trigger("👍", start + Duration::from_millis(1500));
        assert_eq!(
            burst.remaining(start + Duration::from_millis(1500)),
            Some(Duration::from_secs(2))
        );
    }
}
