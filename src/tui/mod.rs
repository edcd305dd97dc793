//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::action::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each tick: draw if something changed, wait up to 250ms for terminal
//! input, drain every pending terminal event, then drain every completed
//! request from the background channel. All session mutation happens here,
//! on one thread, through `update()`.
//!
//! ## Requests
//!
//! Each send runs as its own tokio task and reports back with a single
//! `Action` over an mpsc channel. Tasks still running at quit are aborted;
//! the session is already marked closed by then, so anything that slips
//! through is dropped by the reducer.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tokio::task::{AbortHandle, JoinHandle};

use crate::api::ChatClient;
use crate::core::action::{Action, Effect, OutboundRequest, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller;
use crate::core::state::{RequestId, Session};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, TranscriptViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub transcript: TranscriptViewState,
    pub input_box: InputBox,
    pub title: String,
    pub endpoint: String,
}

impl TuiState {
    pub fn new(title: String, endpoint: String) -> Self {
        Self {
            transcript: TranscriptViewState::new(),
            input_box: InputBox::new(),
            title,
            endpoint,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig, client: Arc<dyn ChatClient>) -> std::io::Result<()> {
    let mut session = Session::new();
    let mut tui = TuiState::new(config.title.clone(), config.endpoint.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Abort handles for requests still in flight, keyed by request id
    let mut in_flight: HashMap<RequestId, AbortHandle> = HashMap::new();

    let result = event_loop(&mut terminal, &mut session, &mut tui, &client, &mut in_flight);
    if let Err(ref e) = result {
        warn!("Event loop failed: {}", e);
    }

    // Runs on every exit path, including terminal I/O errors
    shut_down(&mut session, &mut in_flight);
    ratatui::restore();
    result
}

/// Closes the session and cancels outstanding requests.
fn shut_down(session: &mut Session, in_flight: &mut HashMap<RequestId, AbortHandle>) {
    update(session, Action::Quit);
    abort_in_flight(in_flight);
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    session: &mut Session,
    tui: &mut TuiState,
    client: &Arc<dyn ChatClient>,
    in_flight: &mut HashMap<RequestId, AbortHandle>,
) -> std::io::Result<()> {
    // Channel for completions from request tasks
    let (tx, rx) = mpsc::channel::<Action>();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, session, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::Quit) {
                if update(session, Action::Quit) == Effect::Quit {
                    return Ok(());
                }
                continue;
            }

            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::ScrollToBottom
            ) {
                tui.transcript.handle_event(&event);
                continue;
            }

            // Keep the input box's view of the draft current before it edits
            tui.input_box.draft.clear();
            tui.input_box.draft.push_str(session.draft());

            let action = match tui.input_box.handle_event(&event) {
                Some(InputEvent::DraftChanged(text)) => Action::SetDraft(text),
                Some(InputEvent::Submit) => Action::Send,
                None => continue,
            };
            if let Effect::SpawnRequest(request) = update(session, action) {
                // A fresh send always brings the newest entry into view
                tui.transcript.stick_to_bottom = true;
                let id = request.id;
                let handle = spawn_request(client.clone(), request, tx.clone());
                in_flight.insert(id, handle.abort_handle());
            }
        }

        // Handle completed requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if let Action::ResponseReceived { id, .. } | Action::RequestFailed { id, .. } = &action
            {
                in_flight.remove(id);
            }
            if update(session, action) == Effect::Quit {
                return Ok(());
            }
        }
    }
}

fn abort_in_flight(in_flight: &mut HashMap<RequestId, AbortHandle>) {
    if !in_flight.is_empty() {
        info!("Aborting {} in-flight request(s) on exit", in_flight.len());
    }
    for (_, handle) in in_flight.drain() {
        handle.abort();
    }
}

fn spawn_request(
    client: Arc<dyn ChatClient>,
    request: OutboundRequest,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning request #{}", request.id);
    let id = request.id;
    tokio::spawn(async move {
        let completion = controller::deliver(client.as_ref(), request).await;
        if tx.send(completion).is_err() {
            warn!("Failed to deliver completion for #{id}: receiver dropped");
        }
    })
}
