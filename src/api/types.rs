use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// Success body for `POST /chat`. Only `response` is read; anything else the
/// server includes is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}
