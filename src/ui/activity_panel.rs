// Scrollable activity panel under the form.
// - Renders observed intake events with a scroll offset.
// - Applies focus-aware border styling.
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::{ACCENT, pane_border_style};

pub struct ActivityPanelView<'a> {
    pub title: &'a str,
    pub lines: &'a [String],
    pub scroll: usize,
    pub focused: bool,
}

pub fn render_activity_panel(frame: &mut Frame, area: Rect, panel: ActivityPanelView<'_>) {
    let lines = panel
        .lines
        .iter()
        .map(String::as_str)
        .map(Line::from)
        .collect::<Vec<_>>();

    let title = if panel.focused {
        format!("{} (scroll: {})", panel.title, panel.scroll)
    } else {
        panel.title.to_string()
    };

    // Wrapping is off so the scroll offset stays a line index.
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_border_style(panel.focused, ACCENT))
                .title(title),
        )
        .alignment(Alignment::Left)
        .scroll((panel.scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(widget, area);
}
