//! Transient user-visible notices.
//!
//! Failure in this subsystem never blocks interaction: a fetch error or
//! denied GPS permission raises a banner that expires on its own after the
//! configured TTL (3 seconds by default).

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    raised_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn age(&self) -> Duration {
        self.raised_at.elapsed()
    }
}

/// Holds the currently-raised notices and expires them after `ttl`.
#[derive(Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            notices: Vec::new(),
        }
    }

    pub fn raise(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?kind, message, "raising notice");
        self.notices.push(Notice {
            kind,
            message,
            raised_at: Instant::now(),
        });
    }

    /// Drop expired notices. Called opportunistically from [`Self::active`];
    /// exposed for drivers that want explicit sweeps.
    pub fn sweep(&mut self) {
        let ttl = self.ttl;
        self.notices.retain(|n| n.age() < ttl);
    }

    /// Currently visible notices, oldest first.
    pub fn active(&mut self) -> &[Notice] {
        self.sweep();
        &self.notices
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
