use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::Session;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{TitleBar, TranscriptView};

const INPUT_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]);
    let [title_area, transcript_area, input_area] = layout.areas(frame.area());

    TitleBar::new(tui.title.clone(), tui.endpoint.clone()).render(frame, title_area);

    TranscriptView::new(&mut tui.transcript, session.transcript()).render(frame, transcript_area);

    tui.input_box.draft.clear();
    tui.input_box.draft.push_str(session.draft());
    tui.input_box.render(frame, input_area);
}
