// GitHub-repository tab rendering.
// - Shows the repository URL field and the upload drop target.
// - The drop target border lights up while a drag is active.
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{
    app::App,
    model::{Focus, SUPPORTED_EXTENSIONS},
};

use super::super::{ACCENT, cursor_scroll_x, cursor_style, pane_border_style};

const URL_PLACEHOLDER: &str = "https://github.com/username/repository";

pub fn render_github_tab(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.focus(), Focus::GithubUrl | Focus::DropZone);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(focused, ACCENT))
        .title_top(Line::from("GitHub Repository Analysis").left_aligned())
        .title_top(
            Line::styled("[ Analyze Repository ] (ctrl+r)", Style::default().fg(ACCENT))
                .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [url_label, url_box, or_line, upload_label, drop_zone] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(label("GitHub Repository URL")), url_label);
    render_url_field(frame, app, url_box);
    frame.render_widget(
        Paragraph::new(Line::styled("OR", Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
        or_line,
    );
    frame.render_widget(Paragraph::new(label("Upload Repository Files")), upload_label);
    render_drop_zone(frame, app, drop_zone);
}

fn render_url_field(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::GithubUrl;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(pane_border_style(focused, ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let url = app.view().github_url();
    let cursor = focused.then_some(app.url_cursor);
    let width = inner.width.max(1) as usize;
    let scroll_x = cursor.map_or(0, |cursor| cursor_scroll_x(url, cursor, width));

    let field = Paragraph::new(input_line(url, cursor)).scroll((0, scroll_x));
    frame.render_widget(field, inner);
}

fn render_drop_zone(frame: &mut Frame, app: &App, area: Rect) {
    let drag_active = app.view().drag_active();
    let (border_type, border_style) = if drag_active {
        (
            BorderType::Double,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Rounded, Style::default().fg(Color::DarkGray))
    };

    let extensions = SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![
        Line::from(""),
        Line::styled(
            "Press Enter to upload files or drag and drop",
            Style::default().fg(Color::White),
        ),
        Line::styled(
            format!("Supports {extensions} files"),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if drag_active {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Drop files onto this terminal or paste their paths",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    }

    let zone = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(zone, area);
}

fn label(text: &str) -> Line<'static> {
    Line::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    )
}

fn input_line(value: &str, active_cursor: Option<usize>) -> Line<'static> {
    if value.is_empty() {
        let mut spans = Vec::new();
        if active_cursor.is_some() {
            spans.push(Span::styled(" ", cursor_style()));
        }
        spans.push(Span::styled(
            URL_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
        return Line::from(spans);
    }

    let chars = value.chars().collect::<Vec<_>>();
    let Some(cursor) = active_cursor.map(|cursor| cursor.min(chars.len())) else {
        return Line::styled(value.to_string(), Style::default().fg(Color::White));
    };

    let mut spans = chars
        .iter()
        .enumerate()
        .map(|(index, ch)| {
            let style = if index == cursor {
                cursor_style()
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(ch.to_string(), style)
        })
        .collect::<Vec<_>>();
    if cursor == chars.len() {
        spans.push(Span::styled(" ", cursor_style()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::test_support::app_with,
        config::FormConfig,
        ui::test_support::{render_to_rows, screen_contains},
    };

    #[test]
    fn shows_url_placeholder_and_upload_area() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(FormConfig::default(), dir.path());
        let rows = render_to_rows(&app, 100, 34);
        assert!(screen_contains(&rows, "GitHub Repository Analysis"));
        assert!(screen_contains(&rows, URL_PLACEHOLDER));
        assert!(screen_contains(&rows, "Supports .js, .jsx, .ts, .tsx files"));
        assert!(!screen_contains(&rows, "paste their paths"));
    }

    #[test]
    fn drag_hint_follows_drag_flag() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::default(), dir.path());
        app.focus_next();
        let rows = render_to_rows(&app, 100, 34);
        assert!(screen_contains(&rows, "paste their paths"));
        assert!(screen_contains(&rows, "╔"));
    }

    #[test]
    fn typed_url_replaces_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::default(), dir.path());
        app.insert_text("https://github.com/tokio-rs/tokio");
        let rows = render_to_rows(&app, 100, 34);
        assert!(screen_contains(&rows, "https://github.com/tokio-rs/tokio"));
        assert!(!screen_contains(&rows, URL_PLACEHOLDER));
    }

    #[test]
    fn wide_url_text_scrolls_by_cells() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::default(), dir.path());
        app.insert_text(&format!("https://github.com/{}/end", "語".repeat(50)));
        let rows = render_to_rows(&app, 100, 34);
        assert!(screen_contains(&rows, "/end"));
    }

    #[test]
    fn inactive_input_is_a_single_span() {
        let line = input_line("abc", None);
        assert_eq!(line.spans.len(), 1);
        let active = input_line("abc", Some(1));
        assert_eq!(active.spans.len(), 3);
        let at_end = input_line("abc", Some(3));
        assert_eq!(at_end.spans.len(), 4);
    }
}
