//! Rendering and writing processing results

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::pipeline::{ActionItem, ProcessingResult};

/// File name of the downloadable summary
pub const SUMMARY_FILE_NAME: &str = "meeting_summary.txt";

/// File name of the downloadable action item list
pub const ACTION_ITEMS_FILE_NAME: &str = "action_items.txt";

/// Shown instead of an empty action item list
pub const NO_ACTION_ITEMS_MESSAGE: &str = "No action items were found in this transcript.";

/// Machine-readable record of one run
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub run_id: uuid::Uuid,
    pub processed_at: DateTime<Utc>,
    pub provider: &'a str,
    pub model: &'a str,
    #[serde(flatten)]
    pub result: &'a ProcessingResult,
}

/// Paths of the artifacts written by [`write_artifacts`]
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub summary: PathBuf,
    pub action_items: PathBuf,
}

/// Format action items the way the downloadable file lays them out.
pub fn format_action_items(items: &[ActionItem]) -> String {
    let mut output = String::from("# ACTION ITEMS\n\n");

    for (i, item) in items.iter().enumerate() {
        output.push_str(&format!("{}. Task: {}\n", i + 1, item.task));
        if let Some(assignee) = &item.assignee {
            output.push_str(&format!("   Assignee: {}\n", assignee));
        }
        if let Some(deadline) = &item.deadline {
            output.push_str(&format!("   Deadline: {}\n", deadline));
        }
        output.push('\n');
    }

    output
}

/// Terminal rendering of a result.
pub fn render_text(result: &ProcessingResult) -> String {
    let mut output = String::new();
    output.push_str("Meeting Summary\n");
    output.push_str(&"-".repeat(15));
    output.push('\n');
    output.push_str(result.summary.trim_end());
    output.push_str("\n\n");

    output.push_str("Action Items\n");
    output.push_str(&"-".repeat(12));
    output.push('\n');

    if result.action_items.is_empty() {
        output.push_str(NO_ACTION_ITEMS_MESSAGE);
        output.push('\n');
        return output;
    }

    for item in &result.action_items {
        output.push_str(&format!("- {}\n", item.task));
        if let Some(assignee) = &item.assignee {
            output.push_str(&format!("    Assignee: {}\n", assignee));
        }
        if let Some(deadline) = &item.deadline {
            output.push_str(&format!("    Deadline: {}\n", deadline));
        }
    }

    output
}

pub fn render_json(report: &RunReport<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write `meeting_summary.txt` and `action_items.txt` into `dir`.
pub fn write_artifacts(dir: &Path, result: &ProcessingResult) -> Result<ArtifactPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let paths = ArtifactPaths {
        summary: dir.join(SUMMARY_FILE_NAME),
        action_items: dir.join(ACTION_ITEMS_FILE_NAME),
    };

    std::fs::write(&paths.summary, &result.summary)
        .with_context(|| format!("Failed to write {}", paths.summary.display()))?;
    std::fs::write(&paths.action_items, format_action_items(&result.action_items))
        .with_context(|| format!("Failed to write {}", paths.action_items.display()))?;

    tracing::debug!("Artifacts written to {}", dir.display());

    Ok(paths)
}
