//! # Messages
//!
//! The single record type of chatline, and the append-only sequence that
//! holds them.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Text shown in place of a reply when the request fails for any reason.
pub const CONNECTION_ERROR_TEXT: &str = "Error: Unable to connect to the server.";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One completed entry in the transcript. Never edited after creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    /// The placeholder bot entry for a failed request.
    pub fn connection_error() -> Self {
        Self::bot(CONNECTION_ERROR_TEXT)
    }
}

/// Append-only, shareable message sequence.
///
/// Cloning is an `Arc` bump. Appending while another clone is alive
/// copies into a fresh allocation, so holders of an older snapshot keep
/// seeing exactly what they were handed and can detect change with
/// [`Transcript::same_as`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript(Arc<Vec<Message>>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when both handles point at the same allocation.
    pub fn same_as(&self, other: &Transcript) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn push(&mut self, message: Message) {
        Arc::make_mut(&mut self.0).push(message);
    }
}

impl Deref for Transcript {
    type Target = [Message];

    fn deref(&self) -> &[Message] {
        &self.0
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self(Arc::new(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"sender":"user","text":"hi"}"#);
        let json = serde_json::to_string(&Message::bot("yo")).unwrap();
        assert_eq!(json, r#"{"sender":"bot","text":"yo"}"#);
    }

    #[test]
    fn test_connection_error_text() {
        let msg = Message::connection_error();
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.text, "Error: Unable to connect to the server.");
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_push() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("one"));
        let snapshot = transcript.clone();
        assert!(snapshot.same_as(&transcript));

        transcript.push(Message::bot("two"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(transcript.len(), 2);
        assert!(!snapshot.same_as(&transcript));
    }

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("a"));
        transcript.push(Message::bot("b"));
        transcript.push(Message::user("c"));
        let texts: Vec<&str> = transcript.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
