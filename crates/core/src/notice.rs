//! Transient user-facing messages.
//!
//! The shop has a single message slot. A notice stays visible for a fixed
//! time after it is posted. Posting again replaces the current notice and
//! restarts the clock, so an earlier notice's expiry can never blank a newer
//! one.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Default time a notice stays visible.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(2500);

/// Whether a notice reports success or a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// The single message slot with timed expiry.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<(Notice, Instant)>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeBoard {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Post `notice` now.
    pub fn post(&mut self, notice: Notice) {
        self.post_at(notice, Instant::now());
    }

    /// Post `notice` as of `at`, replacing whatever was showing.
    pub fn post_at(&mut self, notice: Notice, at: Instant) {
        self.current = Some((notice, at));
    }

    /// The notice visible now, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    /// The notice visible at `now`, if any.
    #[must_use]
    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|(_, posted)| now.saturating_duration_since(*posted) < self.ttl)
            .map(|(notice, _)| notice)
    }

    /// Time left before the current notice expires, if one is visible.
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.current.as_ref().and_then(|(_, posted)| {
            self.ttl
                .checked_sub(now.saturating_duration_since(*posted))
                .filter(|left| !left.is_zero())
        })
    }
}
