//! Artifacts module for recap
//!
//! Reading transcripts in and writing the summary and action item files out.

mod export;
mod source;

pub use export::{
    format_action_items, render_json, render_text, write_artifacts, ArtifactPaths, RunReport,
    ACTION_ITEMS_FILE_NAME, NO_ACTION_ITEMS_MESSAGE, SUMMARY_FILE_NAME,
};
pub use source::TranscriptSource;
