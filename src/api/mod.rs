//! # Chat Endpoint Client
//!
//! The whole wire contract of chatline: one POST to `/chat` carrying
//! `{"message": ...}` and answered with `{"response": ...}`.

pub mod client;
pub mod types;

pub use client::{ChatClient, ClientError, HttpChatClient};
pub use types::{ChatRequest, ChatResponse};
