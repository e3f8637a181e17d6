//! Conversation session domain module.
//!
//! # Module Structure
//!
//! - `message`: transcript entry types (`TranscriptRole`, `TranscriptEntry`)
//! - `transcript`: the append-only `ChatTranscript`

mod message;
mod transcript;

pub use message::{TranscriptEntry, TranscriptRole};
pub use transcript::ChatTranscript;
