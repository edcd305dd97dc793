//! # Actions
//!
//! Everything that can happen in chatline becomes an `Action`.
//! User presses Enter? That's `Action::Send`.
//! Server replies? That's `Action::ResponseReceived { .. }`.
//!
//! `update()` applies an action to the session and returns an `Effect`
//! describing the I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Effect
//! ```

use log::{debug, info};

use crate::core::message::Message;
use crate::core::state::{RequestId, Session};

#[derive(Debug, Clone)]
pub enum Action {
    /// Draft text was edited; carries the full new draft.
    SetDraft(String),
    /// User asked to send the current draft.
    Send,
    /// The server answered a request.
    ResponseReceived { id: RequestId, text: String },
    /// A request failed for any reason.
    RequestFailed { id: RequestId, error: String },
    Quit,
}

/// A request the caller must issue on behalf of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub id: RequestId,
    /// The draft exactly as typed, untrimmed.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnRequest(OutboundRequest),
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::SetDraft(text) => {
            session.set_draft(text);
            Effect::None
        }
        Action::Send => {
            if session.draft().trim().is_empty() {
                return Effect::None;
            }
            let message = session.draft().to_string();
            session.append_message(Message::user(message.clone()));
            session.set_draft(String::new());
            let id = session.begin_request();
            info!("Send #{id}: {} bytes", message.len());
            Effect::SpawnRequest(OutboundRequest { id, message })
        }
        Action::ResponseReceived { id, text } => {
            if !accept_completion(session, id) {
                return Effect::None;
            }
            session.append_message(Message::bot(text));
            Effect::None
        }
        Action::RequestFailed { id, error } => {
            if !accept_completion(session, id) {
                return Effect::None;
            }
            debug!("Send #{id} failed: {error}");
            session.append_message(Message::connection_error());
            Effect::None
        }
        Action::Quit => {
            session.closed = true;
            Effect::Quit
        }
    }
}

/// Clears `id` from the in-flight set and reports whether its result may
/// still be applied. Results arriving after teardown are dropped.
fn accept_completion(session: &mut Session, id: RequestId) -> bool {
    let was_pending = session.in_flight.remove(&id);
    if session.closed {
        debug!("Dropping completion for #{id}: session closed");
        return false;
    }
    if !was_pending {
        debug!("Completion for #{id} was not tracked as in flight");
    }
    true
}
