//! # InputBox Component
//!
//! Edits the draft and signals send.
//!
//! The draft itself belongs to the core `Session`; `InputBox::draft` is a prop
//! the parent syncs from the session before each event. Edits come back out
//! as `InputEvent::DraftChanged` carrying the whole new draft, which the
//! parent turns into `Action::SetDraft`.
//!
//! Whether a draft is worth sending is not decided here: Enter always emits
//! `InputEvent::Submit` and the reducer ignores blank drafts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Type a message...";
/// Shown in place of embedded newlines so the draft stays on one row.
const NEWLINE_GLYPH: char = '↵';

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Draft text changed; carries the full new draft
    DraftChanged(String),
    /// User pressed Enter
    Submit,
}

/// Single-row text input with a horizontally scrolling tail.
#[derive(Debug, Default)]
pub struct InputBox {
    /// Current draft (Prop, mirrored from the session)
    pub draft: String,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Returns the longest suffix of `text` that fits in `width` columns.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Message")
            .title_top(Line::from(" Enter: send · Esc: quit ").right_aligned());
        let inner = block.inner(area);

        // Leave one column free for the cursor past the last character
        let text_width = inner.width.saturating_sub(1) as usize;

        let (content, style, cursor_offset) = if self.draft.is_empty() {
            (
                PLACEHOLDER.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                0u16,
            )
        } else {
            let display: String = self
                .draft
                .chars()
                .map(|c| if c == '\n' { NEWLINE_GLYPH } else { c })
                .collect();
            let tail = visible_tail(&display, text_width).to_string();
            let offset = tail.width() as u16;
            (tail, Style::default().fg(Color::Green), offset)
        };

        let input = Paragraph::new(content).block(block).style(style);
        frame.render_widget(input, area);

        if inner.width > 0 && inner.height > 0 {
            let cursor_x = inner.x + cursor_offset.min(inner.width.saturating_sub(1));
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.draft.push(*c);
                Some(InputEvent::DraftChanged(self.draft.clone()))
            }
            TuiEvent::Paste(text) => {
                self.draft.push_str(text);
                Some(InputEvent::DraftChanged(self.draft.clone()))
            }
            TuiEvent::Backspace => self
                .draft
                .pop()
                .map(|_| InputEvent::DraftChanged(self.draft.clone())),
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}
