use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Monotonic playback time, advanced explicitly by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackClock {
    now: Duration,
}

impl PlaybackClock {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn reset(&mut self) {
        self.now = Duration::ZERO;
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now = self.now.saturating_add(delta);
    }
}

/// Handle identifying one armed advance. Tokens are never reused, so a
/// callback holding an old token can always be told apart from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub token: TimerToken,
    pub due: Duration,
}

/// Single-slot timer: at most one advance is pending at any moment.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<ScheduledAdvance>,
    issued: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a new advance `delay` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Duration, delay: Duration) -> TimerToken {
        if let Some(stale) = self.pending.take() {
            tracing::debug!(token = stale.token.0, "replacing pending advance");
        }

        self.issued += 1;
        let token = TimerToken(self.issued);
        self.pending = Some(ScheduledAdvance {
            token,
            due: now.saturating_add(delay),
        });
        token
    }

    /// Drops the pending advance. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(advance) => {
                tracing::debug!(token = advance.token.0, "cancelled pending advance");
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> Option<ScheduledAdvance> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the pending advance if `token` still identifies it.
    pub fn claim(&mut self, token: TimerToken) -> bool {
        if self.pending.map(|advance| advance.token) == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Consumes and returns the pending advance once it is due.
    pub fn take_due(&mut self, now: Duration) -> Option<TimerToken> {
        match self.pending {
            Some(advance) if advance.due <= now => {
                self.pending = None;
                Some(advance.token)
            }
            _ => None,
        }
    }

    pub fn time_until_due(&self, now: Duration) -> Option<Duration> {
        self.pending
            .map(|advance| advance.due.saturating_sub(now))
    }
}
