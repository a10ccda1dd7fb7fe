use crate::llm::{prompts, CompletionClient};
use crate::pipeline::models::{ActionItem, PipelineState, PipelineStep};
use crate::pipeline::parser::{parse_action_items, parse_structured, Attribution};
use crate::Result;

/// Second stage: ask for action items and parse them out of the reply.
///
/// Never fails. Any error along the way is logged and replaced by a single
/// sentinel item.
pub async fn extract_action_items(
    client: &dyn CompletionClient,
    attribution: Attribution,
    state: PipelineState,
) -> PipelineState {
    tracing::info!("Extracting action items");

    let action_items = match recover_items(client, attribution, &state.transcript).await {
        Ok(items) => {
            tracing::info!("Extracted {} action items", items.len());
            items
        }
        Err(e) => {
            tracing::warn!("Error extracting action items: {}", e);
            vec![ActionItem::sentinel()]
        }
    };

    PipelineState {
        action_items,
        current_step: PipelineStep::ExtractActionItemsCompleted,
        ..state
    }
}

async fn recover_items(
    client: &dyn CompletionClient,
    attribution: Attribution,
    transcript: &str,
) -> Result<Vec<ActionItem>> {
    let reply = client
        .complete(&prompts::extraction_messages(transcript))
        .await?;

    let items = parse_action_items(&reply, attribution);
    if !items.is_empty() {
        return Ok(items);
    }

    tracing::debug!("No action items recognized in free-text reply, asking for structured output");

    let clarified = client
        .complete(&prompts::clarify_messages(transcript))
        .await?;

    parse_structured(&clarified)
}
