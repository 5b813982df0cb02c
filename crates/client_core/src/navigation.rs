//! Two-view navigation with an optional one-shot redirect.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Enrollment,
    Dashboard,
}

impl View {
    pub fn path(self) -> &'static str {
        match self {
            Self::Enrollment => "/",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// A navigation the form asks for after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub target: View,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy)]
struct PendingRedirect {
    origin: View,
    target: View,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: View,
    pending: Option<PendingRedirect>,
}

impl Navigator {
    pub fn new(start: View) -> Self {
        Self {
            current: start,
            pending: None,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Moves to `to` directly. Leaving the current view drops any pending
    /// redirect scheduled from it.
    pub fn navigate(&mut self, to: View) -> bool {
        if self.current == to {
            return false;
        }
        if self.pending.take().is_some() {
            tracing::debug!(from = self.current.path(), "pending redirect cancelled");
        }
        self.current = to;
        true
    }

    /// Replaces any pending redirect.
    pub fn schedule(&mut self, redirect: Redirect, now: Instant) {
        self.pending = Some(PendingRedirect {
            origin: self.current,
            target: redirect.target,
            due: now + redirect.delay,
        });
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn time_until_redirect(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    /// Fires the pending redirect once it is due. Returns the view entered.
    pub fn poll(&mut self, now: Instant) -> Option<View> {
        let pending = self.pending?;
        if pending.origin != self.current {
            self.pending = None;
            return None;
        }
        if now < pending.due {
            return None;
        }

        self.pending = None;
        self.current = pending.target;
        Some(pending.target)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(View::Enrollment)
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
