//! # Send Controller I/O
//!
//! The half of sending that touches the network. `update()` decides *what*
//! to send; `deliver()` performs the request and turns whatever happens into
//! the `Action` that completes it. Failures never escape as errors.

use log::{info, warn};

use crate::api::ChatClient;
use crate::core::action::{Action, OutboundRequest};

pub async fn deliver(client: &dyn ChatClient, request: OutboundRequest) -> Action {
    let OutboundRequest { id, message } = request;
    match client.send_message(&message).await {
        Ok(text) => {
            info!("Send #{id} answered by {} ({} bytes)", client.endpoint(), text.len());
            Action::ResponseReceived { id, text }
        }
        Err(e) => {
            warn!("Send #{id} to {} failed: {e}", client.endpoint());
            Action::RequestFailed {
                id,
                error: e.to_string(),
            }
        }
    }
}
