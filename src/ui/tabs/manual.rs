// Manual-input tab rendering.
// - Shows the multi-line code editor with its cursor.
// - Shows the derived line and character counts beneath it.
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::{App, line_and_column},
    model::Focus,
    state::ViewState,
};

use super::super::{ACCENT, cursor_scroll_x, cursor_style, pane_border_style};

const PLACEHOLDER: &str = "Paste your code here...";

pub fn render_manual_tab(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::CodeInput;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(focused, ACCENT))
        .title_top(Line::from("Code Input").left_aligned())
        .title_top(
            Line::styled("[ Analyze Code ] (ctrl+r)", Style::default().fg(ACCENT)).right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [editor, stats] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    render_code_editor(frame, app, focused, editor);
    render_stats(frame, app.view(), stats);
}

fn render_code_editor(frame: &mut Frame, app: &App, focused: bool, area: Rect) {
    let code = app.view().code_input();
    if code.is_empty() {
        let mut spans = Vec::new();
        if focused {
            spans.push(Span::styled(" ", cursor_style()));
        }
        spans.push(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        return;
    }

    let (cursor_line, cursor_column) = line_and_column(code, app.code_cursor);
    let lines = code
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            if focused && index == cursor_line {
                line_with_cursor(line, cursor_column)
            } else {
                Line::from(line.chars().map(display_char).collect::<String>())
            }
        })
        .collect::<Vec<_>>();

    // Keep the cursor inside the viewport in both directions.
    let height = area.height.max(1) as usize;
    let width = area.width.max(1) as usize;
    let scroll_y = cursor_line.saturating_sub(height - 1);
    let scroll_x = if focused {
        let cursor_text = code.split('\n').nth(cursor_line).unwrap_or_default();
        let shown = cursor_text.chars().map(display_char).collect::<String>();
        cursor_scroll_x(&shown, cursor_column, width)
    } else {
        0
    };

    let editor = Paragraph::new(lines).scroll((clamp_u16(scroll_y), scroll_x));
    frame.render_widget(editor, area);
}

fn render_stats(frame: &mut Frame, view: &ViewState, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let style = Style::default().fg(Color::Gray);

    frame.render_widget(
        Paragraph::new(Line::styled(format!("Lines: {}", view.line_count()), style)),
        left,
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("Characters: {}", view.character_count()),
            style,
        ))
        .alignment(Alignment::Right),
        right,
    );
}

fn line_with_cursor(line: &str, column: usize) -> Line<'static> {
    let chars = line.chars().map(display_char).collect::<Vec<_>>();
    let column = column.min(chars.len());
    let before = chars[..column].iter().collect::<String>();

    let mut spans = vec![Span::raw(before)];
    match chars.get(column) {
        Some(ch) => {
            spans.push(Span::styled(ch.to_string(), cursor_style()));
            spans.push(Span::raw(chars[column + 1..].iter().collect::<String>()));
        }
        None => spans.push(Span::styled(" ", cursor_style())),
    }
    Line::from(spans)
}

// Tabs occupy one cell so cursor columns match char columns.
fn display_char(ch: char) -> char {
    if ch == '\t' { ' ' } else { ch }
}

fn clamp_u16(value: usize) -> u16 {
    value.min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::test_support::app_with,
        config::{FormConfig, Variant},
        ui::test_support::{render_to_rows, screen_contains},
    };

    #[test]
    fn empty_editor_shows_placeholder_and_initial_counts() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(FormConfig::preset(Variant::DocGenerator), dir.path());
        let rows = render_to_rows(&app, 100, 30);
        assert!(screen_contains(&rows, "Code Input"));
        assert!(screen_contains(&rows, "Paste your code here..."));
        assert!(screen_contains(&rows, "Lines: 1"));
        assert!(screen_contains(&rows, "Characters: 0"));
    }

    #[test]
    fn typed_code_updates_counts() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::preset(Variant::DocGenerator), dir.path());
        app.insert_text("line1\nline2\nline3");
        let rows = render_to_rows(&app, 100, 30);
        assert!(screen_contains(&rows, "line2"));
        assert!(screen_contains(&rows, "Lines: 3"));
        assert!(screen_contains(&rows, "Characters: 17"));
    }

    #[test]
    fn editor_scrolls_to_keep_cursor_visible() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::preset(Variant::DocGenerator), dir.path());
        let code = (0..60).map(|n| format!("row{n}")).collect::<Vec<_>>().join("\n");
        app.insert_text(&code);
        let rows = render_to_rows(&app, 100, 30);
        assert!(screen_contains(&rows, "row59"));
        assert!(!screen_contains(&rows, "row0 "));
    }

    #[test]
    fn wide_characters_keep_the_cursor_in_view() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::preset(Variant::DocGenerator), dir.path());
        app.insert_text(&format!("{}tail", "語".repeat(60)));
        let rows = render_to_rows(&app, 100, 30);
        assert!(screen_contains(&rows, "tail"));
    }

    #[test]
    fn cursor_line_splits_around_the_cursor() {
        let line = line_with_cursor("a\tc", 1);
        let text = line
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<Vec<_>>();
        assert_eq!(text, vec!["a", " ", "c"]);

        let end = line_with_cursor("ab", 5);
        assert_eq!(end.spans.len(), 2);
    }
}
