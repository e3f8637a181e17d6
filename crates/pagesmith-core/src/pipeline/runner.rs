//! The two-stage prompt pipeline.
//!
//! Stage 1 asks the model whether the task needs images; stage 2 generates
//! the page changes. The stages are strictly sequential: stage 2 is issued
//! only after stage 1 completed, because stage 1's image results are
//! interpolated into the stage-2 system prompt.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::client::{ChatMessage, CompletionClient, StageConfig};
use super::image::{ImageDecision, ImageProvider, ImageRef, NoopImageProvider};
use crate::agent::{AgentKind, ChangeSet};
use crate::page::{ChangeRecord, Page};
use crate::prompt;
use crate::session::TranscriptEntry;
use crate::{PagesmithError, Result};

/// How many trailing transcript entries each stage sees.
pub const TRANSCRIPT_WINDOW: usize = 5;

/// The most images a single classification may request.
pub const MAX_IMAGE_COUNT: u32 = 5;

/// Caller-supplied pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub classification: StageConfig,
    pub generation: StageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            classification: StageConfig::classification_default(),
            generation: StageConfig::generation_default(),
        }
    }
}

/// The assembled client-facing result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The model's conversational reply.
    pub response_text: String,
    /// Ordered change records for the reconciler.
    pub changes: Vec<ChangeRecord>,
    /// Stage-1 verdict, passed through to the client.
    pub image_decision: ImageDecision,
    /// Images offered to the generation stage (empty with the default
    /// provider).
    pub image_urls: Vec<ImageRef>,
}

/// Orchestrates the two sequential completion calls for one chat turn.
pub struct PromptPipeline {
    client: Arc<dyn CompletionClient>,
    images: Arc<dyn ImageProvider>,
    config: PipelineConfig,
}

impl PromptPipeline {
    pub fn new(client: Arc<dyn CompletionClient>, config: PipelineConfig) -> Self {
        Self {
            client,
            images: Arc::new(NoopImageProvider),
            config,
        }
    }

    /// Replaces the image lookup backend.
    pub fn with_image_provider(mut self, images: Arc<dyn ImageProvider>) -> Self {
        self.images = images;
        self
    }

    /// Runs both stages and assembles the result.
    ///
    /// `transcript_tail` should already be bounded by the caller; only the
    /// last [`TRANSCRIPT_WINDOW`] entries are sent either way.
    pub async fn run(
        &self,
        kind: AgentKind,
        user_prompt: &str,
        transcript_tail: &[TranscriptEntry],
        pages: &[Page],
    ) -> Result<PipelineResult> {
        let tail_start = transcript_tail.len().saturating_sub(TRANSCRIPT_WINDOW);
        let tail = &transcript_tail[tail_start..];

        let decision = self.classify_image_need(user_prompt, tail).await?;
        debug!(needs_images = decision.needs_images, "image classification done");

        let image_urls = self.lookup_images(&decision).await;

        let (response_text, changes) = self
            .generate_content(kind, user_prompt, tail, pages, &image_urls)
            .await?;
        info!(
            changes = changes.len(),
            kind = ?kind,
            "generation stage done"
        );

        Ok(PipelineResult {
            response_text,
            changes,
            image_decision: decision,
            image_urls,
        })
    }

    async fn classify_image_need(
        &self,
        user_prompt: &str,
        tail: &[TranscriptEntry],
    ) -> Result<ImageDecision> {
        let mut messages = vec![ChatMessage::system(prompt::classification_prompt())];
        messages.extend(tail.iter().map(|entry| ChatMessage {
            role: role_name(entry).to_string(),
            content: entry.content.clone(),
        }));
        messages.push(ChatMessage::user(user_prompt));

        let content = self
            .client
            .complete_json(&self.config.classification, &messages)
            .await?;

        serde_json::from_str::<ImageDecision>(&content).map_err(|err| {
            PagesmithError::classification_parse(format!("invalid classification response: {err}"))
        })
    }

    async fn lookup_images(&self, decision: &ImageDecision) -> Vec<ImageRef> {
        if !decision.needs_images {
            return Vec::new();
        }
        let Some(query) = decision.image_query.as_deref() else {
            return Vec::new();
        };
        let count = decision.image_count.unwrap_or(1).min(MAX_IMAGE_COUNT);
        match self.images.search(query, count).await {
            Ok(images) => images,
            Err(err) => {
                // Image lookup is best-effort; generation proceeds without.
                warn!(error = %err, "image lookup failed");
                Vec::new()
            }
        }
    }

    async fn generate_content(
        &self,
        kind: AgentKind,
        user_prompt: &str,
        tail: &[TranscriptEntry],
        pages: &[Page],
        images: &[ImageRef],
    ) -> Result<(String, Vec<ChangeRecord>)> {
        let note = image_note(images);
        let system = prompt::generation_prompt(kind, pages, tail, &note)?;
        let messages = [ChatMessage::system(system), ChatMessage::user(user_prompt)];

        let content = self
            .client
            .complete_json(&self.config.generation, &messages)
            .await?;

        let payload: Value = serde_json::from_str(&content).map_err(|err| {
            PagesmithError::generation_parse(format!("invalid generation response: {err}"))
        })?;

        let response_text = payload
            .get("response")
            .and_then(|r| r.as_str())
            .unwrap_or_default()
            .to_string();
        let changes = ChangeSet::parse(kind, &payload)?.into_records();

        Ok((response_text, changes))
    }
}

fn role_name(entry: &TranscriptEntry) -> &'static str {
    use crate::session::TranscriptRole;
    match entry.role {
        TranscriptRole::User => "user",
        TranscriptRole::Assistant => "assistant",
        TranscriptRole::System => "system",
    }
}

/// Builds the image-usage note interpolated into the stage-2 prompt.
/// Empty when no images are available.
pub fn image_note(images: &[ImageRef]) -> String {
    if images.is_empty() {
        return String::new();
    }
    let listing = serde_json::to_string_pretty(images).unwrap_or_default();
    format!(
        "Available images for static content. Each image object carries a \
         'url' and an 'alt' property; use only these images.\n{listing}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TranscriptRole;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted completion client: pops canned responses in order and logs
    /// every call it receives.
    struct ScriptedClient {
        responses: Mutex<Vec<Result<String>>>,
        calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn call(&self, index: usize) -> (String, Vec<ChatMessage>) {
            self.calls.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete_json(
            &self,
            config: &StageConfig,
            messages: &[ChatMessage],
        ) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((config.model.clone(), messages.to_vec()));
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                panic!("scripted client ran out of responses");
            }
            responses.remove(0)
        }
    }

    fn pipeline(client: Arc<ScriptedClient>) -> PromptPipeline {
        PromptPipeline::new(client, PipelineConfig::default())
    }

    fn no_images() -> String {
        r#"{"needsImages":false,"explanation":"text only"}"#.to_string()
    }

    fn entry(role: TranscriptRole, content: &str) -> TranscriptEntry {
        TranscriptEntry::now(role, "test", content)
    }

    #[tokio::test]
    async fn test_happy_path_returns_changes() {
        let generation = r#"{
            "response": "Added a contact page.",
            "changes": [{"name": "contact", "content": "<html>contact</html>", "action": "create"}]
        }"#;
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(no_images()),
            Ok(generation.to_string()),
        ]));

        let result = pipeline(client.clone())
            .run(AgentKind::WebApp, "add a contact page", &[], &[])
            .await
            .unwrap();

        assert_eq!(client.call_count(), 2);
        assert_eq!(result.response_text, "Added a contact page.");
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].name, "contact");
        assert!(!result.image_decision.needs_images);
        assert!(result.image_urls.is_empty());
    }

    #[tokio::test]
    async fn test_classification_failure_skips_stage_two() {
        let client = Arc::new(ScriptedClient::new(vec![Ok(
            r#"{"explanation":"missing the verdict"}"#.to_string(),
        )]));

        let err = pipeline(client.clone())
            .run(AgentKind::WebApp, "add a page", &[], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, PagesmithError::ClassificationParse(_)));
        assert_eq!(client.call_count(), 1, "stage 2 must not run");
    }

    #[tokio::test]
    async fn test_non_json_generation_is_parse_error() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(no_images()),
            Ok("Sure! Here's the page you asked for: <html>".to_string()),
        ]));

        let err = pipeline(client)
            .run(AgentKind::WebApp, "add a page", &[], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, PagesmithError::GenerationParse(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = Arc::new(ScriptedClient::new(vec![Err(
            PagesmithError::chat_request_failed("connection refused"),
        )]));

        let err = pipeline(client)
            .run(AgentKind::WebApp, "add a page", &[], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, PagesmithError::ChatRequestFailed(_)));
    }

    #[tokio::test]
    async fn test_transcript_tail_is_bounded_to_window() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(no_images()),
            Ok(r#"{"response":"ok","changes":[]}"#.to_string()),
        ]));
        let tail: Vec<TranscriptEntry> = (0..8)
            .map(|i| entry(TranscriptRole::User, &format!("msg {i}")))
            .collect();

        pipeline(client.clone())
            .run(AgentKind::WebApp, "latest", &tail, &[])
            .await
            .unwrap();

        // system + 5 transcript entries + user prompt
        let (model, messages) = client.call(0);
        assert_eq!(model, StageConfig::classification_default().model);
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[1].content, "msg 3");
        assert_eq!(messages[5].content, "msg 7");
        assert_eq!(messages[6].content, "latest");
    }

    #[tokio::test]
    async fn test_stage_models_come_from_config() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(no_images()),
            Ok(r#"{"response":"ok","changes":[]}"#.to_string()),
        ]));
        let config = PipelineConfig {
            classification: StageConfig {
                model: "test/classifier".to_string(),
                max_tokens: 64,
                temperature: 0.0,
            },
            generation: StageConfig {
                model: "test/generator".to_string(),
                max_tokens: 64,
                temperature: 0.0,
            },
        };

        PromptPipeline::new(client.clone(), config)
            .run(AgentKind::WebApp, "hi", &[], &[])
            .await
            .unwrap();

        assert_eq!(client.call(0).0, "test/classifier");
        assert_eq!(client.call(1).0, "test/generator");
    }

    #[tokio::test]
    async fn test_image_note_empty_without_images() {
        assert!(image_note(&[]).is_empty());
        let note = image_note(&[ImageRef {
            url: "https://img.example/1.jpg".to_string(),
            alt: "hero".to_string(),
        }]);
        assert!(note.contains("https://img.example/1.jpg"));
    }
}
