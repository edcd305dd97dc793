//! # Session State
//!
//! All domain state for one run of chatline. Nothing here knows about the
//! terminal or the network.
//!
//! ```text
//! Session
//! ├── transcript: Transcript          // append-only message history
//! ├── draft: String                   // unsent input
//! ├── in_flight: HashSet<RequestId>   // sends awaiting a reply
//! ├── next_request_id: RequestId
//! └── closed: bool                    // set on teardown; late replies are dropped
//! ```
//!
//! Mutations happen through `update(session, action)` in action.rs, which
//! in turn only uses the two mutators below for the transcript and draft.

use std::collections::HashSet;

use crate::core::message::{Message, Transcript};

/// Identifies one outbound request within a session.
pub type RequestId = u64;

#[derive(Debug, Default)]
pub struct Session {
    transcript: Transcript,
    draft: String,
    pub(crate) in_flight: HashSet<RequestId>,
    pub(crate) next_request_id: RequestId,
    pub(crate) closed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// A cheap handle to the current transcript for readers.
    pub fn snapshot(&self) -> Transcript {
        self.transcript.clone()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Ids of sends still awaiting a reply.
    pub fn in_flight(&self) -> &HashSet<RequestId> {
        &self.in_flight
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn append_message(&mut self, message: Message) {
        self.transcript.push(message);
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    /// Hands out the next request id and marks it in flight.
    pub fn begin_request(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight.insert(id);
        id
    }
}
