//! Request sequencing for out-of-order responses.
//!
//! Requests are never cancelled once sent, so a slow response can land after a newer
//! one. Tagging each request with a monotonically increasing number lets the widget
//! drop anything older than what is already on screen.

/// Tracks the last issued and last applied request numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSequence {
    issued: u64,
    applied: u64,
}

impl SearchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag for a request about to be sent.
    pub fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Record that the response for `seq` is being applied.
    ///
    /// Returns `false` (and changes nothing) when a newer response has already been
    /// applied or the panel was closed after `seq` was issued.
    pub fn try_apply(&mut self, seq: u64) -> bool {
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }

    /// Invalidate every request issued so far.
    ///
    /// Used when the user dismisses the panel (short query) or picks a suggestion, so
    /// that a late response cannot reopen it.
    pub fn invalidate_in_flight(&mut self) {
        self.applied = self.issued;
    }

    /// Number of requests issued whose responses have not been applied or invalidated.
    pub fn outstanding(&self) -> u64 {
        self.issued - self.applied
    }

    pub fn last_issued(&self) -> u64 {
        self.issued
    }
}
