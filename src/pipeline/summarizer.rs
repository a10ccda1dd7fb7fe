use crate::llm::{prompts, CompletionClient};
use crate::pipeline::models::{PipelineState, PipelineStep};
use crate::Result;

/// First stage: ask the model for a summary and store its reply verbatim.
///
/// Completion errors are returned to the caller as-is.
pub async fn summarize_transcript(
    client: &dyn CompletionClient,
    state: PipelineState,
) -> Result<PipelineState> {
    tracing::info!("Summarizing transcript ({} chars)", state.transcript.len());

    let summary = client
        .complete(&prompts::summary_messages(&state.transcript))
        .await?;

    tracing::debug!("Summary received ({} chars)", summary.len());

    Ok(PipelineState {
        summary,
        current_step: PipelineStep::SummarizeTranscriptCompleted,
        ..state
    })
}
