//! Transcript pipeline for recap
//!
//! Summarizes a transcript, then extracts action items from it, against a
//! single completion client.

mod extractor;
mod models;
mod orchestrator;
mod parser;
mod summarizer;

pub use extractor::extract_action_items;
pub use models::{
    ActionItem, PipelineState, PipelineStep, ProcessingResult, SENTINEL_TASK, UNSPECIFIED_TASK,
};
pub use orchestrator::TranscriptPipeline;
pub use parser::{parse_action_items, parse_structured, Attribution, STRUCTURED_MARKER};
pub use summarizer::summarize_transcript;
