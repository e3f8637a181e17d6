//! Editing session use case.
//!
//! One `ChatSession` owns the transcript and page collection for a single
//! editing view, the way a browser tab owns its state in the client this
//! backend serves. The session feeds the prompt pipeline, applies the
//! returned changes through the reconciler, and keeps the transcript in
//! chronological order. Nothing here is shared across sessions.

use tracing::{error, info};

use pagesmith_core::agent::AgentKind;
use pagesmith_core::page::{self, Page, PageCollection};
use pagesmith_core::pipeline::{PromptPipeline, TRANSCRIPT_WINDOW};
use pagesmith_core::session::{ChatTranscript, TranscriptEntry, TranscriptRole};

/// The fixed reply shown when a chat turn fails; the user must resubmit.
pub const FALLBACK_REPLY: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// The outcome of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// The assistant reply appended to the transcript.
    pub reply: String,
    /// How many change records were applied.
    pub changes_applied: usize,
    /// The active page after reconciliation.
    pub active_path: Option<String>,
    /// False when the pipeline or reconciler failed and the fallback reply
    /// was used.
    pub succeeded: bool,
}

/// One user's editing session: transcript, pages and the pipeline.
pub struct ChatSession {
    kind: AgentKind,
    transcript: ChatTranscript,
    pages: PageCollection,
    pipeline: PromptPipeline,
}

impl ChatSession {
    /// Starts a session with the agent kind's seeded placeholder page.
    pub fn new(kind: AgentKind, pipeline: PromptPipeline) -> Self {
        Self {
            kind,
            transcript: ChatTranscript::new(),
            pages: kind.seed_collection(),
            pipeline,
        }
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn pages(&self) -> &PageCollection {
        &self.pages
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// Handles one user prompt end to end.
    ///
    /// The pipeline sees the transcript tail as it was before this prompt,
    /// matching the wire contract where clients send `previousMessages`
    /// alongside the new prompt. On any failure the page collection is left
    /// untouched and the fixed fallback reply is appended instead; there is
    /// no automatic retry.
    pub async fn handle_prompt(&mut self, prompt: &str) -> ChatTurn {
        let tail = self.transcript.last_n(TRANSCRIPT_WINDOW).to_vec();
        self.transcript
            .append(TranscriptEntry::now(TranscriptRole::User, "user", prompt));

        let result = self
            .pipeline
            .run(self.kind, prompt, &tail, self.pages.pages())
            .await;

        let turn = match result {
            Ok(result) => match page::apply(&self.pages, &result.changes) {
                Ok((pages, active_path)) => {
                    info!(
                        changes = result.changes.len(),
                        active = active_path.as_deref().unwrap_or("-"),
                        "applied chat turn"
                    );
                    self.pages = pages;
                    ChatTurn {
                        reply: result.response_text,
                        changes_applied: result.changes.len(),
                        active_path,
                        succeeded: true,
                    }
                }
                Err(err) => {
                    error!(error = %err, "failed to apply page changes");
                    self.fallback_turn()
                }
            },
            Err(err) => {
                error!(error = %err, "chat pipeline failed");
                self.fallback_turn()
            }
        };

        self.transcript.append(TranscriptEntry::now(
            TranscriptRole::Assistant,
            self.kind.display_name(),
            turn.reply.clone(),
        ));
        turn
    }

    fn fallback_turn(&self) -> ChatTurn {
        ChatTurn {
            reply: FALLBACK_REPLY.to_string(),
            changes_applied: 0,
            active_path: self.pages.active_path(),
            succeeded: false,
        }
    }

    /// Activates the page at `raw_path` (pre-normalization), as when the
    /// user clicks a page in the structure view or the preview navigates.
    /// Returns the page when it exists.
    pub fn select_page(&mut self, raw_path: &str) -> Option<&Page> {
        let path = page::normalize(raw_path, self.pages.extension());
        if self.pages.activate(&path) {
            self.pages.get(&path)
        } else {
            None
        }
    }
}
