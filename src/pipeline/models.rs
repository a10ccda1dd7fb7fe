//! Data models for the transcript pipeline

use serde::{Deserialize, Serialize};

/// Task text used when extraction fails outright.
pub const SENTINEL_TASK: &str = "Error parsing action items";

/// Task text used when a record was recovered but its task was blank.
pub const UNSPECIFIED_TASK: &str = "Unspecified task";

/// Progress marker carried by [`PipelineState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    /// Nothing has run yet
    Start,
    /// Summary has been produced
    SummarizeTranscriptCompleted,
    /// Action items have been extracted; the run is finished
    ExtractActionItemsCompleted,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SummarizeTranscriptCompleted => "summarize_transcript_completed",
            Self::ExtractActionItemsCompleted => "extract_action_items_completed",
        }
    }
}

/// A task pulled out of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// What needs to be done
    pub task: String,

    /// Who is responsible, when mentioned
    pub assignee: Option<String>,

    /// When it is due, when mentioned
    pub deadline: Option<String>,
}

impl ActionItem {
    /// Create an action item; a blank task becomes [`UNSPECIFIED_TASK`].
    pub fn new(task: impl Into<String>, assignee: Option<String>, deadline: Option<String>) -> Self {
        let task = task.into();
        let task = if task.trim().is_empty() {
            UNSPECIFIED_TASK.to_string()
        } else {
            task
        };
        Self {
            task,
            assignee,
            deadline,
        }
    }

    /// The placeholder returned when extraction failed.
    pub fn sentinel() -> Self {
        Self {
            task: SENTINEL_TASK.to_string(),
            assignee: None,
            deadline: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.task == SENTINEL_TASK && self.assignee.is_none() && self.deadline.is_none()
    }
}

/// State threaded through one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineState {
    pub transcript: String,
    pub summary: String,
    pub action_items: Vec<ActionItem>,
    pub current_step: PipelineStep,
}

impl PipelineState {
    /// Fresh state for a transcript
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            summary: String::new(),
            action_items: Vec::new(),
            current_step: PipelineStep::Start,
        }
    }

    pub fn into_result(self) -> ProcessingResult {
        ProcessingResult {
            summary: self.summary,
            action_items: self.action_items,
        }
    }
}

/// What a finished run hands back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub summary: String,
    pub action_items: Vec<ActionItem>,
}
