//! Typed view of the agent's stream-json stdout protocol. One JSON object
//! per line; kinds we do not consume collapse into `Other`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// A complete assistant turn with its content blocks.
    Assistant { message: AssistantMessage },
    /// An incremental streaming event; only text deltas carry payload we use.
    StreamEvent { event: StreamPayload },
    /// Terminal event for the whole run.
    Result {
        #[serde(default)]
        is_error: bool,
        #[serde(default)]
        result: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct StreamPayload {
    #[serde(default)]
    pub delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assistant_text_blocks() {
        let line = r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"[]"},{"type":"tool_use","id":"t1","name":"Read","input":{}}]}}"#;

        let event: AgentEvent = serde_json::from_str(line).unwrap();
        match event {
            AgentEvent::Assistant { message } => {
                assert_eq!(message.content.len(), 2);
                assert!(matches!(&message.content[0], ContentBlock::Text { text } if text == "[]"));
                assert!(matches!(&message.content[1], ContentBlock::Other));
            }
            other => panic!("expected assistant event, got {:?}", other),
        }
    }

    #[test]
    fn parses_stream_delta_text() {
        let line = r#"{"type":"stream_event","event":{"type":"content_block_delta","delta":{"type":"text_delta","text":"猫"}}}"#;

        let event: AgentEvent = serde_json::from_str(line).unwrap();
        match event {
            AgentEvent::StreamEvent { event } => {
                assert_eq!(event.delta.and_then(|d| d.text).as_deref(), Some("猫"));
            }
            other => panic!("expected stream event, got {:?}", other),
        }
    }

    #[test]
    fn deltas_without_text_are_tolerated() {
        let line = r#"{"type":"stream_event","event":{"type":"content_block_start","content_block":{"type":"text"}}}"#;

        let event: AgentEvent = serde_json::from_str(line).unwrap();
        match event {
            AgentEvent::StreamEvent { event } => assert!(event.delta.is_none()),
            other => panic!("expected stream event, got {:?}", other),
        }
    }

    #[test]
    fn unknown_kinds_fall_back_to_other() {
        let line = r#"{"type":"system","subtype":"init","session_id":"abc"}"#;
        let event: AgentEvent = serde_json::from_str(line).unwrap();
        assert!(matches!(event, AgentEvent::Other));
    }

    #[test]
    fn parses_terminal_result() {
        let line = r#"{"type":"result","subtype":"success","is_error":false,"result":"[]"}"#;
        let event: AgentEvent = serde_json::from_str(line).unwrap();
        assert!(matches!(event, AgentEvent::Result { is_error: false, .. }));
    }
}
