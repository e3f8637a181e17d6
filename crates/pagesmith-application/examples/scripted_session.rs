//! Runs one editing session against a scripted completion client, printing
//! the terminal feed lines a client would render. No network access.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pagesmith_application::{ChatSession, terminal_feed};
use pagesmith_core::Result;
use pagesmith_core::agent::AgentKind;
use pagesmith_core::pipeline::{
    ChatMessage, CompletionClient, PipelineConfig, PromptPipeline, StageConfig,
};

struct ScriptedClient {
    responses: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete_json(&self, _config: &StageConfig, _messages: &[ChatMessage]) -> Result<String> {
        Ok(self.responses.lock().unwrap().remove(0))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let client = Arc::new(ScriptedClient {
        responses: Mutex::new(vec![
            r#"{"needsImages":false,"explanation":"text only"}"#.to_string(),
            r#"{
                "response": "Added a contact page with a simple form.",
                "changes": [
                    {"name": "contact", "content": "<html><body><h1>Contact</h1></body></html>", "action": "create"}
                ]
            }"#
            .to_string(),
        ]),
    });

    let pipeline = PromptPipeline::new(client, PipelineConfig::default());
    let mut session = ChatSession::new(AgentKind::WebApp, pipeline);
    let agent = session.kind().display_name();

    for line in terminal_feed::boot_lines(agent) {
        println!("[{}] {}", line.agent_name, line.content);
    }

    let turn = session.handle_prompt("add a contact page").await;
    println!("assistant: {}", turn.reply);

    for page in session.pages().pages() {
        let line = terminal_feed::change_line(agent, "create", &page.path);
        println!("[{}] {}", line.agent_name, line.content);
    }
    let summary = terminal_feed::summary_line(agent, turn.changes_applied, turn.active_path.as_deref());
    println!("[{}] {}", summary.agent_name, summary.content);
}
