//! Append-only chat transcript.

use serde::{Deserialize, Serialize};

use super::message::TranscriptEntry;

/// An ordered, append-only log of role-tagged messages used as conversation
/// context for the prompt pipeline.
///
/// Insertion order is chronological order; past entries are never mutated.
/// The transcript itself is unbounded — callers bound what they send to the
/// model via [`last_n`](Self::last_n) (the pipeline uses the last 5 entries
/// per stage).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTranscript {
    entries: Vec<TranscriptEntry>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a transcript from existing entries (e.g. the
    /// `previousMessages` sent by a client on every request).
    pub fn from_entries(entries: Vec<TranscriptEntry>) -> Self {
        Self { entries }
    }

    /// Appends an entry at the end of the log.
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// The last `n` entries in chronological order (all of them when the
    /// transcript is shorter).
    pub fn last_n(&self, n: usize) -> &[TranscriptEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
