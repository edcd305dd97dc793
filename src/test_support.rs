//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ChatClient, ClientError};

/// A chat client that answers every request the same way and records what it
/// was sent.
pub struct ScriptedClient {
    outcome: Outcome,
    delay: Option<Duration>,
    received: Mutex<Vec<String>>,
}

enum Outcome {
    Reply(String),
    Fail(ClientError),
}

impl ScriptedClient {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Outcome::Reply(text.to_string()),
            delay: None,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ClientError) -> Self {
        Self {
            outcome: Outcome::Fail(error),
            delay: None,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Wait this long before answering, to keep a request in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    fn endpoint(&self) -> &str {
        "scripted"
    }

    async fn send_message(&self, message: &str) -> Result<String, ClientError> {
        self.received.lock().unwrap().push(message.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            Outcome::Reply(text) => Ok(text.clone()),
            Outcome::Fail(ClientError::Network(m)) => Err(ClientError::Network(m.clone())),
            Outcome::Fail(ClientError::Api { status, message }) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
            Outcome::Fail(ClientError::Parse(m)) => Err(ClientError::Parse(m.clone())),
        }
    }
}
