//! Cosmetic terminal feed.
//!
//! The client renders a retro "terminal" next to the preview that narrates
//! the session with process ids, thread ids and memory figures. Every
//! number here is fabricated for display: nothing is measured, no system
//! call is made, and none of it feeds back into the core. Kept in its own
//! module so the fiction never leaks into tested behavior.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

/// One display line for the terminal widget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalLine {
    pub agent_name: String,
    pub content: String,
    pub timestamp: String,
    /// Fabricated process id, for display only.
    pub process_id: u32,
    /// Fabricated thread id, for display only.
    pub thread_id: u32,
}

fn line(agent_name: &str, content: String) -> TerminalLine {
    let mut rng = rand::thread_rng();
    TerminalLine {
        agent_name: agent_name.to_string(),
        content,
        timestamp: Utc::now().to_rfc3339(),
        process_id: rng.gen_range(1000..10_000),
        thread_id: rng.gen_range(10..100),
    }
}

/// Invented session startup chatter.
pub fn boot_lines(agent_name: &str) -> Vec<TerminalLine> {
    let mut rng = rand::thread_rng();
    let memory_mb: f64 = rng.gen_range(48.0..256.0);
    vec![
        line(agent_name, format!("{agent_name} session initialized")),
        line(
            agent_name,
            format!("Heap allocated: {memory_mb:.2}MB | Runtime: ready"),
        ),
    ]
}

/// Narrates one applied change ("Creating new page: /contact.html...").
pub fn change_line(agent_name: &str, action: &str, path: &str) -> TerminalLine {
    let verb = match action {
        "create" => "Creating new page",
        "update" => "Updating page",
        "delete" => "Deleting page",
        other => other,
    };
    line(agent_name, format!("{verb}: {path}..."))
}

/// Closing summary after a batch of changes.
pub fn summary_line(agent_name: &str, applied: usize, active_path: Option<&str>) -> TerminalLine {
    let mut rng = rand::thread_rng();
    let elapsed_ms: f64 = rng.gen_range(80.0..900.0);
    line(
        agent_name,
        format!(
            "Changes applied successfully\n- Pages modified: {applied}\n- Current page: {}\n- Processing time: {elapsed_ms:.2}ms",
            active_path.unwrap_or("-")
        ),
    )
}
