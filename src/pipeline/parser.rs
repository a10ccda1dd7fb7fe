//! Recovering action items from model output
//!
//! Two formats are understood: the free-text listing returned for the
//! extraction prompt, and the JSON object requested by the clarification
//! prompt.

use serde::{Deserialize, Serialize};

use crate::pipeline::models::ActionItem;
use crate::Result;

const TASK_MARKER: &str = "Task:";
const ASSIGNEE_MARKER: &str = "Assignee:";
const DEADLINE_MARKER: &str = "Deadline:";
const SKIPPED_PREFIXES: [&str; 2] = ["Action Items", "---"];

/// Substring that must appear before a reply is read as structured output.
pub const STRUCTURED_MARKER: &str = "\"action_items\"";

/// How `Assignee:` / `Deadline:` markers are attributed to `Task:` lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attribution {
    /// Every `Task:` item gets the first assignee and deadline found
    /// anywhere in the response.
    #[default]
    FirstMarker,
    /// Marker lines attach to the item listed most recently before them.
    Nearest,
}

/// Parse the free-text extraction reply. Never fails; unrecognized lines are skipped.
pub fn parse_action_items(text: &str, attribution: Attribution) -> Vec<ActionItem> {
    let (first_assignee, first_deadline) = match attribution {
        Attribution::FirstMarker => (
            first_marker_value(text, ASSIGNEE_MARKER),
            first_marker_value(text, DEADLINE_MARKER),
        ),
        Attribution::Nearest => (None, None),
    };

    let mut items: Vec<ActionItem> = Vec::new();

    for line in text.split('\n').map(str::trim) {
        if line.is_empty() || SKIPPED_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            continue;
        }

        // Nearest mode reads numbered `Task:` lines through the marker rule so
        // inline assignee and deadline markers are split out.
        let inline_task = attribution == Attribution::Nearest && line.contains(TASK_MARKER);
        if !inline_task && line.starts_with(|c: char| c.is_ascii_digit()) {
            if let Some((_, task)) = line.split_once(':') {
                items.push(ActionItem::new(task.trim(), None, None));
                continue;
            }
        }

        if line.contains(TASK_MARKER) {
            let item = match attribution {
                Attribution::FirstMarker => {
                    let task = line
                        .split_once(TASK_MARKER)
                        .map(|(_, rest)| rest.trim())
                        .unwrap_or_default();
                    ActionItem::new(task, first_assignee.clone(), first_deadline.clone())
                }
                Attribution::Nearest => ActionItem::new(
                    segment_after(line, TASK_MARKER).unwrap_or_default(),
                    segment_after(line, ASSIGNEE_MARKER),
                    segment_after(line, DEADLINE_MARKER),
                ),
            };
            items.push(item);
            continue;
        }

        if attribution == Attribution::Nearest {
            if let Some(item) = items.last_mut() {
                if item.assignee.is_none() {
                    item.assignee = segment_after(line, ASSIGNEE_MARKER);
                }
                if item.deadline.is_none() {
                    item.deadline = segment_after(line, DEADLINE_MARKER);
                }
            }
        }
    }

    items
}

/// Parse the clarification reply.
///
/// Replies without [`STRUCTURED_MARKER`] yield no items. Replies that carry
/// the marker must hold a JSON object matching the declared schema; anything
/// else is an error. Surrounding prose or code fences are ignored.
pub fn parse_structured(text: &str) -> Result<Vec<ActionItem>> {
    if !text.contains(STRUCTURED_MARKER) {
        return Ok(Vec::new());
    }

    let payload: StructuredReply = serde_json::from_str(json_object(text))?;

    Ok(payload
        .action_items
        .into_iter()
        .map(|item| {
            ActionItem::new(
                item.task.unwrap_or_default().trim(),
                item.assignee.as_deref().and_then(clean_value),
                item.deadline.as_deref().and_then(clean_value),
            )
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct StructuredReply {
    action_items: Vec<StructuredItem>,
}

#[derive(Debug, Deserialize)]
struct StructuredItem {
    #[serde(default)]
    task: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    deadline: Option<String>,
}

/// Value of the first `marker` anywhere in `text`, up to the end of that line.
fn first_marker_value(text: &str, marker: &str) -> Option<String> {
    let (_, rest) = text.split_once(marker)?;
    clean_value(rest.split('\n').next().unwrap_or_default())
}

/// Value following `marker` on a single line, stopping at the next known marker.
fn segment_after(line: &str, marker: &str) -> Option<String> {
    let (_, rest) = line.split_once(marker)?;
    let end = [TASK_MARKER, ASSIGNEE_MARKER, DEADLINE_MARKER]
        .iter()
        .filter_map(|other| rest.find(other))
        .min()
        .unwrap_or(rest.len());
    clean_value(rest[..end].trim_end_matches(|c: char| c.is_whitespace() || ",;|".contains(c)))
}

fn clean_value(raw: &str) -> Option<String> {
    let value = raw.trim();
    let placeholder = ["none", "null", "n/a", "-"]
        .iter()
        .any(|p| value.eq_ignore_ascii_case(p));
    if value.is_empty() || placeholder {
        None
    } else {
        Some(value.to_string())
    }
}

/// Outermost `{ ... }` span of `text`, or all of it when there is none.
fn json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}
