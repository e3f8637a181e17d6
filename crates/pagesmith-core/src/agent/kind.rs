//! Agent variants and their per-variant policy.

use serde::{Deserialize, Serialize};

use crate::page::PageCollection;

/// The kind of generation agent a session talks to.
///
/// The kind decides the content-file extension paths are normalized
/// against, the generation prompt, and the shape of the generation payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Multi-page website generation (HTML pages, unified or split diffs).
    #[default]
    WebApp,
    /// Browser game generation (a single HTML file rewritten wholesale).
    GameDev,
    /// Solana program generation (a single Rust source file).
    Solana,
}

impl AgentKind {
    /// The content-file extension used when normalizing page paths.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::WebApp | Self::GameDev => "html",
            Self::Solana => "rs",
        }
    }

    /// Display label used for transcript entries produced by this agent.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WebApp => "WebAppAgent",
            Self::GameDev => "GameDevAgent",
            Self::Solana => "SolanaAgent",
        }
    }

    /// The fixed file single-file variants rewrite on every turn.
    /// `None` for the multi-page web app variant.
    pub fn single_file_target(&self) -> Option<&'static str> {
        match self {
            Self::WebApp => None,
            Self::GameDev => Some("/index.html"),
            Self::Solana => Some("/lib.rs"),
        }
    }

    /// A fresh collection holding this variant's placeholder page.
    pub fn seed_collection(&self) -> PageCollection {
        match self {
            Self::WebApp => PageCollection::seeded(
                "html",
                "Home",
                "/index.html",
                "<html><body><h1>Welcome</h1><p>Describe the site you want to build.</p></body></html>",
            ),
            Self::GameDev => PageCollection::seeded(
                "html",
                "Game",
                "/index.html",
                "<html><body><canvas id=\"game\"></canvas></body></html>",
            ),
            Self::Solana => PageCollection::seeded(
                "rs",
                "lib.rs",
                "/lib.rs",
                "// Describe the Solana program you want to build.\n",
            ),
        }
    }
}
