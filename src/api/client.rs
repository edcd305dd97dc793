use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use super::types::{ChatRequest, ChatResponse};

/// Everything that can go wrong with a single `/chat` request.
///
/// The UI treats every variant the same way; the distinction only shows up in
/// the log file.
#[derive(Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, DNS, timeout when one is configured).
    Network(String),
    /// Server answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not `{"response": <string>}`.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Endpoint this client talks to, for logging.
    fn endpoint(&self) -> &str;

    /// Sends one message and returns the server's reply text.
    async fn send_message(&self, message: &str) -> Result<String, ClientError>;
}

/// `reqwest`-backed client for the chat endpoint.
pub struct HttpChatClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatClient {
    /// Builds a client for `endpoint`. With `timeout` set to `None` a hung
    /// connection waits forever.
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_message(&self, message: &str) -> Result<String, ClientError> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        info!(
            "POST {} (message_len={})",
            self.endpoint,
            body.message.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Chat endpoint status: {}", status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            debug!("Chat endpoint error: {} - {}", status.as_u16(), err_body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))?;

        debug!("Chat reply received (len={})", parsed.response.len());
        Ok(parsed.response)
    }
}
