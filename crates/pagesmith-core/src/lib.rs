//! Pagesmith core domain layer.
//!
//! Contains the page model and reconciler, the chat transcript, the agent
//! variants, the two-stage prompt pipeline, and the site store interface.
//! Transport and storage implementations live in
//! `pagesmith-infrastructure`; session orchestration lives in
//! `pagesmith-application`.

pub mod agent;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod prompt;
pub mod session;
pub mod site;

// Re-export common error type
pub use error::{PagesmithError, Result};
