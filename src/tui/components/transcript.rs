//! # Transcript View
//!
//! Scrollable, read-only view of the conversation.
//!
//! ## Layers
//!
//! 1. [`project`]: a pure function from messages to visual rows. Same input,
//!    same rows, every time.
//! 2. [`TranscriptMemo`]: caches the rows for the last transcript it saw and
//!    reprojects only when handed a different allocation
//!    (`Transcript::same_as`). Contents are never compared.
//! 3. [`TranscriptView`]: the ratatui component. A transient wrapper (created
//!    each frame) around `&mut TranscriptViewState` (persistent) and the
//!    session's `Transcript` (props).
//!
//! Row heights come from `Paragraph::line_count` on the same paragraph that
//! gets drawn, so the `ScrollView` canvas can be sized before anything is
//! rendered; they are recomputed only when the rows or the width change.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::{Message, Sender, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const EMPTY_HINT: &str = "No messages yet. Type below and press Enter.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One visual line-group in the transcript, derived from one `Message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub side: Side,
    pub label: &'static str,
    pub text: String,
}

impl Row {
    fn style(&self) -> Style {
        match self.side {
            Side::Right => Style::default().fg(Color::Green),
            Side::Left => Style::default().fg(Color::Blue),
        }
    }

    fn alignment(&self) -> Alignment {
        match self.side {
            Side::Right => Alignment::Right,
            Side::Left => Alignment::Left,
        }
    }

    /// Rows as ratatui lines: the label prefixes the first line only.
    fn lines(&self) -> Vec<Line<'_>> {
        let label_style = self.style().add_modifier(Modifier::BOLD);
        self.text
            .split('\n')
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    Line::from(vec![
                        Span::styled(format!("{}: ", self.label), label_style),
                        Span::raw(part),
                    ])
                } else {
                    Line::from(part)
                }
            })
            .collect()
    }

    fn paragraph(&self) -> Paragraph<'_> {
        Paragraph::new(self.lines())
            .alignment(self.alignment())
            .style(self.style())
            .wrap(Wrap { trim: false })
    }

    /// Rendered height at `width` columns, measured with the same
    /// `Paragraph` that gets drawn.
    pub fn height(&self, width: u16) -> u16 {
        if width == 0 {
            return 1;
        }
        let lines = self.paragraph().line_count(width);
        (lines.min(u16::MAX as usize) as u16).max(1)
    }
}

/// Project messages into rows: user messages sit on the right as "You",
/// everything else on the left as "Bot".
pub fn project(messages: &[Message]) -> Vec<Row> {
    messages
        .iter()
        .map(|message| match message.sender {
            Sender::User => Row {
                side: Side::Right,
                label: "You",
                text: message.text.clone(),
            },
            Sender::Bot => Row {
                side: Side::Left,
                label: "Bot",
                text: message.text.clone(),
            },
        })
        .collect()
}

/// Reference-equality memo over [`project`].
#[derive(Debug, Default)]
pub struct TranscriptMemo {
    source: Option<Transcript>,
    rows: Vec<Row>,
    recomputations: usize,
}

impl TranscriptMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reprojects if `transcript` is not the allocation seen last time.
    /// Returns `true` when the rows were rebuilt.
    pub fn refresh(&mut self, transcript: &Transcript) -> bool {
        if self
            .source
            .as_ref()
            .is_some_and(|cached| cached.same_as(transcript))
        {
            return false;
        }
        self.rows = project(transcript);
        self.source = Some(transcript.clone());
        self.recomputations += 1;
        true
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// How many times the rows have been rebuilt.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

/// Scroll, memo, and layout state for the transcript.
/// Must be persisted in the parent TuiState.
pub struct TranscriptViewState {
    pub scroll_state: ScrollViewState,
    pub memo: TranscriptMemo,
    /// Cached row heights, parallel to `memo.rows()`
    pub heights: Vec<u16>,
    cached_width: u16,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            memo: TranscriptMemo::new(),
            heights: Vec::new(),
            cached_width: 0,
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    fn total_height(&self) -> u16 {
        self.heights
            .iter()
            .fold(0u16, |acc, &h| acc.saturating_add(h))
    }

    fn max_offset(&self) -> u16 {
        self.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Transcript component. Created fresh each frame.
pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptViewState,
    pub transcript: &'a Transcript,
}

impl<'a> TranscriptView<'a> {
    pub fn new(state: &'a mut TranscriptViewState, transcript: &'a Transcript) -> Self {
        Self { state, transcript }
    }
}

impl<'a> Component for TranscriptView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().add_modifier(Modifier::DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content_width = inner.width.saturating_sub(1); // -1 for scrollbar

        // 1. Refresh memoized rows and layout cache
        let rows_changed = self.state.memo.refresh(self.transcript);
        if rows_changed || self.state.cached_width != content_width {
            self.state.heights = self
                .state
                .memo
                .rows()
                .iter()
                .map(|row| row.height(content_width))
                .collect();
            self.state.cached_width = content_width;
        }

        if self.state.memo.rows().is_empty() {
            let hint = Paragraph::new(EMPTY_HINT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, inner);
            return;
        }

        // 2. Clamp scroll offset when the user is reading history
        self.state.viewport_height = inner.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // 3. Render rows into a ScrollView
        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let state = &mut *self.state;
        let mut y_offset: u16 = 0;
        for (row, &height) in state.memo.rows().iter().zip(&state.heights) {
            let row_rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(row.paragraph(), row_rect);
            y_offset = y_offset.saturating_add(height);
        }

        if state.stick_to_bottom {
            state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, inner, &mut state.scroll_state);
    }
}

/// Implemented on the persistent state: `TranscriptView` is rebuilt every
/// frame and cannot hold scroll position.
impl EventHandler for TranscriptViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}
