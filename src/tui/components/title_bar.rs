//! # TitleBar Component
//!
//! Single-line header: the window title and the endpoint being talked to.
//! Purely presentational; all data arrives as props.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub title: String,
    pub endpoint: String,
}

impl TitleBar {
    pub fn new(title: String, endpoint: String) -> Self {
        Self { title, endpoint }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                self.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" | {}", self.endpoint),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(line, area);
    }
}
