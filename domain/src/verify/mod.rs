//! Robot verification exercise (E02).
//!
//! A `READY` handshake returns a question and a conversation id (`msgID`);
//! the answer is sent back under the same id and the reply carries the
//! hidden phrase.

use crate::core::{answer::Answer, question::Question};
use serde::{Deserialize, Serialize};

/// Text that opens the conversation
pub const READY: &str = "READY";

/// Wire message of the verification endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyMessage {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "msgID", default)]
    pub msg_id: u64,
}

impl VerifyMessage {
    pub fn new(text: impl Into<String>, msg_id: u64) -> Self {
        Self {
            text: text.into(),
            msg_id,
        }
    }

    /// The opening handshake: `{"text": "READY", "msgID": 0}`
    pub fn ready() -> Self {
        Self::new(READY, 0)
    }

    /// Reply to a received message, keeping its conversation id
    pub fn reply_to(received: &VerifyMessage, answer: &Answer) -> Self {
        Self::new(answer.content(), received.msg_id)
    }
}

/// Result of a full verification run
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutcome {
    pub msg_id: u64,
    pub question: Question,
    pub answer: Answer,
    pub hidden_phrase: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_wire_format() {
        let json = serde_json::to_value(VerifyMessage::ready()).unwrap();
        assert_eq!(json, serde_json::json!({"text": "READY", "msgID": 0}));
    }

    #[test]
    fn test_reply_keeps_msg_id() {
        let received: VerifyMessage =
            serde_json::from_str(r#"{"text":"What is the capital of Poland?","msgID":4821}"#)
                .unwrap();
        let answer = Answer::new("Kraków").unwrap();
        let reply = VerifyMessage::reply_to(&received, &answer);
        assert_eq!(reply.msg_id, 4821);
        assert_eq!(reply.text, "Kraków");
    }

    #[test]
    fn test_missing_fields_default() {
        let msg: VerifyMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg, VerifyMessage::new("", 0));
    }
}
