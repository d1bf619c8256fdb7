//! Wall-clock session log of controller events.
//!
//! Each [`LockEvent`] a demo session produces is recorded with the UTC
//! time it was observed, so a run can be replayed or exported afterwards.

use chrono::{DateTime, Utc};
use latchkey_control::LockEvent;
use serde::Serialize;
use std::fmt;

/// One logged controller event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionEntry {
    /// When the event was observed.
    pub at: DateTime<Utc>,
    /// What the controller reported, pre-rendered for export.
    #[serde(serialize_with = "serialize_event")]
    pub event: LockEvent,
}

fn serialize_event<S>(event: &LockEvent, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(event)
}

impl fmt::Display for SessionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.at.format("%H:%M:%S%.3f"), self.event)
    }
}

/// Append-only event log for one emulator session.
///
/// # Examples
///
/// ```
/// use latchkey_control::LockEvent;
/// use latchkey_emulator::SessionLog;
///
/// let mut log = SessionLog::new();
/// log.record(LockEvent::Unlocked);
/// log.record(LockEvent::Locked);
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.entries()[0].event, LockEvent::Unlocked);
/// ```
#[derive(Debug, Default, Serialize)]
pub struct SessionLog {
    entries: Vec<SessionEntry>,
}

impl SessionLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        SessionLog::default()
    }

    /// Record an event at the current wall-clock time.
    pub fn record(&mut self, event: LockEvent) {
        self.record_at(event, Utc::now());
    }

    /// Record an event with an explicit timestamp.
    pub fn record_at(&mut self, event: LockEvent, at: DateTime<Utc>) {
        self.entries.push(SessionEntry { at, event });
    }

    /// All entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
