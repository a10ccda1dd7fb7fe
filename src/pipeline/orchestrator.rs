//! Transcript pipeline orchestration

use tracing::Instrument;

use crate::config::Settings;
use crate::llm::CompletionClient;
use crate::pipeline::extractor::extract_action_items;
use crate::pipeline::models::{PipelineState, ProcessingResult};
use crate::pipeline::parser::Attribution;
use crate::pipeline::summarizer::summarize_transcript;
use crate::Result;

/// Runs summarize then extract over one transcript.
pub struct TranscriptPipeline<C> {
    client: C,
    attribution: Attribution,
}

impl<C: CompletionClient> TranscriptPipeline<C> {
    pub fn new(client: C, attribution: Attribution) -> Self {
        Self {
            client,
            attribution,
        }
    }

    /// Build a pipeline with the attribution mode from settings.
    pub fn from_settings(client: C, settings: &Settings) -> Self {
        Self::new(client, settings.extraction.attribution)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Process a transcript.
    ///
    /// Fails only when the summarize call fails; extraction problems are
    /// reported through a sentinel action item instead.
    pub async fn process(&self, transcript: &str) -> Result<ProcessingResult> {
        let run_id = uuid::Uuid::new_v4();
        self.process_with_id(run_id, transcript).await
    }

    pub async fn process_with_id(
        &self,
        run_id: uuid::Uuid,
        transcript: &str,
    ) -> Result<ProcessingResult> {
        let span = tracing::info_span!(
            "pipeline",
            %run_id,
            provider = self.client.provider(),
            model = self.client.model()
        );

        let state = self
            .run(PipelineState::new(transcript))
            .instrument(span.clone())
            .await?;

        span.in_scope(|| {
            tracing::info!("Pipeline finished at step {}", state.current_step.as_str());
        });

        Ok(state.into_result())
    }

    /// Thread a state through both stages and return the terminal state.
    pub async fn run(&self, state: PipelineState) -> Result<PipelineState> {
        let state = summarize_transcript(&self.client, state).await?;
        Ok(extract_action_items(&self.client, self.attribution, state).await)
    }
}
