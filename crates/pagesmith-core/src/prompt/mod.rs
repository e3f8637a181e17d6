//! System prompt templates for the two pipeline stages.
//!
//! Templates are rendered with minijinja from the current page structure,
//! the serialized transcript tail and an optional image-usage note.

use std::sync::OnceLock;

use minijinja::{Environment, context};

use crate::agent::AgentKind;
use crate::page::Page;
use crate::session::TranscriptEntry;
use crate::{PagesmithError, Result};

/// Stage-1 system prompt: decide whether the task needs images.
const CLASSIFICATION_PROMPT: &str = r#"You are an AI that determines if a web development task will need images.
Analyze the conversation and the current request to determine:
1. If images will be needed (needsImages: true/false)
2. If needed, an optimized image search query under 80 characters (imageQuery)
3. How many images might be needed, at most 5 (imageCount)
4. Your reasoning (explanation)

Images are commonly needed when creating new pages, product or service
sections, galleries, portfolios, team pages, about pages, or testimonials.

Return a single JSON object with exactly these fields and nothing else:
{
  "needsImages": boolean,
  "imageQuery": string (only if needsImages is true),
  "imageCount": number (only if needsImages is true),
  "explanation": string
}"#;

const WEB_APP_TEMPLATE: &str = r#"You are WebAppAgent, an expert full-stack web developer. You build and
modify complete multi-page websites from natural-language descriptions.

Current site structure (JSON array of pages):
{{ site_structure }}

Conversation so far (JSON array of messages):
{{ transcript }}
{%- if image_note %}

{{ image_note }}
{%- endif %}

Each page must be a complete standalone HTML document with inline CSS and
JavaScript. Link between pages using their paths.

Return a single JSON object and nothing else:
{
  "response": string (a short summary of what you did, for the user),
  "changes": [
    {
      "name": string (page name, e.g. "about" or "/about.html"),
      "content": string (full HTML document; required for create/update),
      "action": "create" | "update" | "delete",
      "reason": string (optional)
    }
  ]
}"#;

const GAME_DEV_TEMPLATE: &str = r#"You are GameDevAgent, an expert browser game developer. You build complete
playable games as a single self-contained HTML file using canvas and
vanilla JavaScript.

Current game file (JSON):
{{ site_structure }}

Conversation so far (JSON array of messages):
{{ transcript }}
{%- if image_note %}

{{ image_note }}
{%- endif %}

Always return the full rewritten game file, never a fragment.

Return a single JSON object and nothing else:
{
  "response": string (a short summary of what you did, for the user),
  "changes": [
    {
      "name": "index",
      "code": string (the complete HTML file),
      "action": "update"
    }
  ]
}"#;

const SOLANA_TEMPLATE: &str = r#"You are Luna 'Hash' Zhang, an expert Solana blockchain developer
specializing in secure and efficient Solana programs in Rust. You have
extensive experience with the Solana programming model, including SPL
tokens, cross-program invocation and program derived addresses.

Prioritize security: validate accounts, handle errors with Solana's error
types, and follow Rust and Solana conventions.

Current program (JSON):
{{ site_structure }}

Conversation so far (JSON array of messages):
{{ transcript }}

Always return the full rewritten program, never a fragment.

Return a single JSON object and nothing else:
{
  "response": string (implementation notes and security considerations),
  "changes": [
    {
      "name": "lib.rs",
      "code": string (the complete program source),
      "action": "update"
    }
  ]
}"#;

fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template("webapp", WEB_APP_TEMPLATE)
            .expect("web app template is valid");
        env.add_template("gamedev", GAME_DEV_TEMPLATE)
            .expect("game dev template is valid");
        env.add_template("solana", SOLANA_TEMPLATE)
            .expect("solana template is valid");
        env
    })
}

/// The stage-1 image classification system prompt.
pub fn classification_prompt() -> &'static str {
    CLASSIFICATION_PROMPT
}

/// Renders the stage-2 generation system prompt for an agent kind.
pub fn generation_prompt(
    kind: AgentKind,
    pages: &[Page],
    transcript: &[TranscriptEntry],
    image_note: &str,
) -> Result<String> {
    let template = match kind {
        AgentKind::WebApp => "webapp",
        AgentKind::GameDev => "gamedev",
        AgentKind::Solana => "solana",
    };

    let site_structure = serde_json::to_string_pretty(pages)?;
    let transcript_json = serde_json::to_string(
        &transcript
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "role": entry.role,
                    "content": entry.content,
                })
            })
            .collect::<Vec<_>>(),
    )?;

    environment()
        .get_template(template)
        .and_then(|tmpl| {
            tmpl.render(context! {
                site_structure => site_structure,
                transcript => transcript_json,
                image_note => image_note,
            })
        })
        .map_err(|err| PagesmithError::internal(format!("prompt render failed: {err}")))
}
