//! # Core Application Logic
//!
//! This module contains chatline's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • deliver() (send I/O) │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    API     │
//!            │  Adapter   │            │  (/chat)   │
//!            │ (ratatui)  │            │ (reqwest)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, `Sender`, and the append-only `Transcript`
//! - [`state`]: `Session`, the transcript and draft in one place
//! - [`action`]: `Action`/`Effect` and the `update()` reducer
//! - [`controller`]: `deliver()`, which performs one send request
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod controller;
pub mod message;
pub mod state;
