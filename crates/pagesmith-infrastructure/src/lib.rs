//! Pagesmith infrastructure layer.
//!
//! Adapters behind the core's traits: the OpenRouter completion client and
//! the in-memory site repository.

mod memory_site_repository;
mod openrouter;

pub use memory_site_repository::InMemorySiteRepository;
pub use openrouter::OpenRouterClient;
