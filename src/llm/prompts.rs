use crate::llm::client::ChatMessage;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert meeting assistant. Your task is to create a comprehensive \
summary of the provided meeting transcript. Focus on key discussion points, \
decisions made, and the overall narrative of the meeting. Be concise yet thorough.";

pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are an expert meeting assistant. Your task is to extract all action items from \
the provided meeting transcript. For each action item, identify:\n\
1. The task to be completed\n\
2. The person responsible (if mentioned)\n\
3. The deadline (if mentioned)\n\
\n\
List each action item on its own line starting with \"Task:\", followed by \
\"Assignee:\" and \"Deadline:\" lines. If some information is not available, write None.";

pub const CLARIFY_SYSTEM_PROMPT: &str = "Extract the action items as a JSON object of the form \
{\"action_items\": [{\"task\": string, \"assignee\": string or null, \"deadline\": string or null}]}. \
Respond with the JSON object only.";

/// Messages for the summarize call.
pub fn summary_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Here is the meeting transcript to summarize:\n\n{transcript}"
        )),
    ]
}

/// Messages for the free-text action item call.
pub fn extraction_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(EXTRACTION_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Here is the meeting transcript to extract action items from:\n\n{transcript}"
        )),
    ]
}

/// Messages for the stricter follow-up call used when the free text yielded nothing.
pub fn clarify_messages(transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CLARIFY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Based on this meeting transcript:\n\n{transcript}\n\nProvide the action items in the specified format."
        )),
    ]
}
