//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: title and endpoint
//! - `InputBox`: draft editor; the draft is a prop synced from the session
//!
//! ## Stateful Components
//!
//! - `TranscriptView`: scrollable conversation, backed by the persistent
//!   `TranscriptViewState` (scroll position, memoized rows, height cache)
//!
//! Components receive external data as props, never by reaching into global
//! state:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! TranscriptView::new(&mut tui.transcript, session.transcript()).render(frame, area);
//! ```

pub mod input_box;
pub mod title_bar;
pub mod transcript;

pub use input_box::{InputBox, InputEvent};
pub use title_bar::TitleBar;
pub use transcript::{TranscriptView, TranscriptViewState};
