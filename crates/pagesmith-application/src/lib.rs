//! Pagesmith application layer.
//!
//! Use cases built on the core domain: the per-view `ChatSession` and the
//! display-only terminal feed.

mod chat_session;
pub mod terminal_feed;

pub use chat_session::{ChatSession, ChatTurn, FALLBACK_REPLY};
