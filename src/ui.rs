// Root UI composition and shared visual components.
// - Builds the global layout (header + tab bar + form + activity + footer).
// - Renders shared chrome: tab bar, keybind popup, and the file picker modal.
// - Delegates tab-specific rendering to ui::tabs submodules.
mod activity_panel;
mod tabs;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::{App, format_size},
    config::FormConfig,
    model::{ActiveTab, FileEntry, Focus, has_supported_extension},
};

use self::activity_panel::{ActivityPanelView, render_activity_panel};

pub(crate) const ACCENT: Color = Color::Magenta;

pub fn render(frame: &mut Frame, app: &App) {
    let [header, tabs_area, content, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let activity_focused = app.focus() == Focus::Activity;
    let content_constraints = if activity_focused {
        [Constraint::Percentage(50), Constraint::Percentage(50)]
    } else {
        [Constraint::Min(0), Constraint::Length(7)]
    };
    let [form, activity] = Layout::vertical(content_constraints).areas(content);

    render_header(frame, app.config(), header);
    render_tab_bar(frame, app, tabs_area);

    match app.view().active_tab() {
        ActiveTab::Manual => tabs::manual::render_manual_tab(frame, app, form),
        ActiveTab::GithubRepository => tabs::github::render_github_tab(frame, app, form),
    }

    let visible_rows = activity.height.saturating_sub(2) as usize;
    render_activity_panel(
        frame,
        activity,
        ActivityPanelView {
            title: "Activity",
            lines: app.activity.lines(),
            scroll: app.activity.clamped_scroll_for_viewport(visible_rows),
            focused: activity_focused,
        },
    );

    render_footer(frame, app, footer);
    if app.picker.is_some() {
        render_file_picker(frame, app);
    }
    if app.show_keybinds {
        render_keybinds_popup(frame, app);
    }
}

fn render_header(frame: &mut Frame, config: &FormConfig, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", config.headline),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                config.headline_accent.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(config.subtitle.clone(), Style::default().fg(Color::Gray)),
    ];

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(header, area);
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let selected = ActiveTab::ALL
        .iter()
        .position(|tab| *tab == app.view().active_tab())
        .unwrap_or(0);
    let labels = ActiveTab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} {} ", tab.number(), tab.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(labels)
        .select(selected)
        .divider(Span::styled("|", Style::default().fg(Color::DarkGray)))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_top(Line::from("Input").left_aligned())
                .title_top(
                    Line::styled("(ctrl+n)", Style::default().fg(Color::DarkGray)).right_aligned(),
                )
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(tabs, area);
}

fn render_file_picker(frame: &mut Frame, app: &App) {
    let Some(picker) = app.picker.as_ref() else {
        return;
    };

    let popup = centered_popup(frame.area(), 70, 70);
    frame.render_widget(Clear, popup);

    // Account for borders and highlight symbol so selected rows stay aligned.
    let content_width = popup.width.saturating_sub(4) as usize;
    let file_items = picker
        .entries()
        .iter()
        .map(|entry| {
            let line = format_file_row(entry, picker.is_marked(&entry.path), content_width);
            if !entry.is_dir && has_supported_extension(&entry.path) {
                ListItem::new(Line::styled(line, Style::default().fg(Color::LightGreen)))
            } else {
                ListItem::new(line)
            }
        })
        .collect::<Vec<_>>();

    let marked = match picker.marked_count() {
        0 => String::new(),
        count => format!(" {count} marked "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(true, ACCENT))
        .title_top(Line::from(format!("Upload: {}", picker.cwd().display())).left_aligned())
        .title_top(Line::styled(marked, Style::default().fg(Color::Yellow)).right_aligned())
        .title_bottom(
            Line::styled(
                "space mark | enter open/confirm | h parent | esc cancel",
                Style::default().fg(Color::DarkGray),
            )
            .right_aligned(),
        );
    let inner = block.inner(popup);
    let visible_rows = inner.height as usize;
    picker.set_visible_rows(visible_rows);

    let mut list_state = ListState::default();
    if !picker.entries().is_empty() {
        let selected = picker.selected().min(picker.entries().len().saturating_sub(1));
        let centered_offset = if visible_rows == 0 {
            0
        } else {
            let max_offset = picker.entries().len().saturating_sub(visible_rows);
            selected.saturating_sub(visible_rows / 2).min(max_offset)
        };
        list_state = list_state
            .with_offset(centered_offset)
            .with_selected(Some(selected));
    }

    let files = List::new(file_items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(files, popup, &mut list_state);
}

fn render_keybinds_popup(frame: &mut Frame, app: &App) {
    let popup = centered_popup(frame.area(), 70, 80);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Press F1 or Esc to close this window."),
        Line::from(""),
        keybind_section("GLOBAL"),
        keybind_row("F1", "toggle keybinds popup"),
        keybind_row("Up/Down or j/k", "scroll keybinds"),
        keybind_row("PgUp/PgDn", "page keybinds"),
        keybind_row("Ctrl+c / Ctrl+q", "quit app"),
        keybind_row("Ctrl+n / Ctrl+p", "next / previous tab"),
        keybind_row("Alt+1 / Alt+2", "manual input / GitHub repository"),
        keybind_row("Tab / Shift+Tab", "move focus"),
        keybind_row("Ctrl+r", "analyze current input"),
        Line::from(""),
        keybind_section("TEXT FIELDS"),
        keybind_row("Arrows / Home / End", "move cursor"),
        keybind_row("Backspace / Delete", "delete character"),
        keybind_row("Enter", "new line (code) / analyze (URL)"),
        keybind_row("Paste", "insert clipboard text"),
        Line::from(""),
        keybind_section("UPLOAD AREA"),
        keybind_row("Enter / Space", "open file picker"),
        keybind_row("Drag and drop / Paste", "drop file paths"),
        Line::from(""),
        keybind_section("FILE PICKER"),
        keybind_row("j/k or Up/Down", "move selection"),
        keybind_row("PgUp/PgDn", "page selection"),
        keybind_row("Space", "mark / unmark file"),
        keybind_row("Enter", "open dir or confirm files"),
        keybind_row("h/-/Left", "parent directory"),
        keybind_row("_", "initial directory"),
        keybind_row("r", "refresh listing"),
        keybind_row("Esc", "cancel"),
        Line::from(""),
        keybind_section("ACTIVITY"),
        keybind_row("j/k or Up/Down", "scroll"),
        keybind_row("PgUp/PgDn", "page"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Keybinds")
        .border_style(pane_border_style(true, Color::Cyan));
    let visible_line_count = block.inner(popup).height.max(1) as usize;
    let max_scroll_top = lines.len().saturating_sub(visible_line_count);
    let scroll_top = app.clamp_keybinds_scroll(max_scroll_top);
    let popup_widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .scroll((scroll_top.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(popup_widget, popup);
}

fn centered_popup(outer: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(outer);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(vertical);
    popup
}

fn keybind_section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn keybind_row(keys: &str, action: &str) -> Line<'static> {
    const KEY_COL_WIDTH: usize = 24;
    let keys_padded = format!("{keys:<KEY_COL_WIDTH$}");
    Line::from(vec![
        Span::styled(
            keys_padded,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(action.to_string()),
    ])
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Length(36), Constraint::Min(0)]).areas(area);
    let hint = Paragraph::new(Line::styled(
        "Press F1 to see keyboard shortcuts",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Left);
    frame.render_widget(hint, left);

    let latest = app.activity.last().unwrap_or_default();
    let latest = truncate_to_width(latest, right.width as usize);
    let status = Paragraph::new(Line::styled(latest, Style::default().fg(Color::Gray)))
        .alignment(Alignment::Right);
    frame.render_widget(status, right);
}

pub(super) fn pane_border_style(is_focused: bool, focused_color: Color) -> Style {
    if is_focused {
        Style::default()
            .fg(focused_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub(super) fn cursor_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn file_size_label(entry: &FileEntry) -> String {
    if entry.is_dir {
        "<DIR>".to_string()
    } else if let Some(bytes) = entry.size_bytes {
        format_size(bytes)
    } else {
        "?".to_string()
    }
}

fn format_file_row(entry: &FileEntry, marked: bool, content_width: usize) -> String {
    let prefix = match (entry.is_dir, marked) {
        (true, _) => "    ",
        (false, true) => "[x] ",
        (false, false) => "[ ] ",
    };
    let name = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };
    let size = file_size_label(entry);
    let prefix_len = display_width(prefix);
    let size_len = display_width(&size);

    let available_name_width = content_width.saturating_sub(prefix_len + size_len + 1);
    let name = truncate_middle_with_ellipsis(&name, available_name_width);
    let left = format!("{prefix}{name}");
    let left_len = display_width(&left);
    let spaces = content_width.saturating_sub(left_len + size_len).max(1);
    let row = format!("{left}{}{}", " ".repeat(spaces), size);
    truncate_to_width(&row, content_width)
}

fn truncate_middle_with_ellipsis(value: &str, max_chars: usize) -> String {
    let width = display_width(value);
    if width <= max_chars {
        return value.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }

    let keep_total = max_chars.saturating_sub(3);
    let keep_left = keep_total / 2;
    let keep_right = keep_total.saturating_sub(keep_left);
    let left = truncate_to_width(value, keep_left);
    let right = take_suffix_width(value, keep_right);

    truncate_to_width(&format!("{left}...{right}"), max_chars)
}

/// Horizontal scroll, in cells, that keeps the char at `cursor` on screen.
pub(super) fn cursor_scroll_x(line: &str, cursor: usize, width: usize) -> u16 {
    let before = line.chars().take(cursor).collect::<String>();
    let cursor_cells = line
        .chars()
        .nth(cursor)
        .and_then(UnicodeWidthChar::width)
        .unwrap_or(1)
        .max(1);
    let scroll = (display_width(&before) + cursor_cells).saturating_sub(width);
    scroll.min(u16::MAX as usize) as u16
}

fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

fn truncate_to_width(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if ch_width > 0 && width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_width(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut suffix = Vec::new();
    let mut width = 0;
    for ch in value.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if ch_width > 0 && width + ch_width > max_width {
            break;
        }
        suffix.push(ch);
        width += ch_width;
    }
    suffix.into_iter().rev().collect()
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{test_support::*, *};
    use crate::{app::test_support::app_with, config::Variant};

    #[test]
    fn header_uses_configured_copy() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(FormConfig::preset(Variant::DocGenerator), dir.path());
        let rows = render_to_rows(&app, 120, 30);
        assert!(screen_contains(&rows, "Generate documentation for your code instantly"));
        assert!(screen_contains(&rows, "1 Manual Input"));
        assert!(screen_contains(&rows, "2 GitHub Repository"));
    }

    #[test]
    fn keybinds_popup_overlays_the_form() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::default(), dir.path());
        app.toggle_keybinds();
        let rows = render_to_rows(&app, 100, 50);
        assert!(screen_contains(&rows, "Keybinds"));
        assert!(screen_contains(&rows, "open file picker"));
    }

    #[test]
    fn keybinds_popup_scrolls_on_short_terminals() {
        use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(FormConfig::default(), dir.path());
        app.toggle_keybinds();
        let rows = render_to_rows(&app, 100, 20);
        assert!(screen_contains(&rows, "GLOBAL"));
        assert!(!screen_contains(&rows, "ACTIVITY"));

        for _ in 0..3 {
            app.handle_event(Event::Key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)));
        }
        let rows = render_to_rows(&app, 100, 20);
        assert!(screen_contains(&rows, "ACTIVITY"));
        assert!(!screen_contains(&rows, "GLOBAL"));
        assert!(!screen_contains(&rows, "drop file paths"));

        // Scrolling past the end was clamped, so one step up moves right away.
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)));
        let rows = render_to_rows(&app, 100, 20);
        assert!(screen_contains(&rows, "drop file paths"));
        assert!(app.show_keybinds);
    }

    #[test]
    fn cursor_scroll_counts_wide_chars_as_two_cells() {
        assert_eq!(cursor_scroll_x("abc", 3, 10), 0);
        assert_eq!(cursor_scroll_x("abcdefghij", 10, 10), 1);
        assert_eq!(cursor_scroll_x("日本語日本語", 6, 10), 3);
        assert_eq!(cursor_scroll_x("日本語日本語", 4, 10), 0);
    }

    #[test]
    fn picker_lists_entries_with_marks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.ts"), "x").unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();
        let (mut app, _) = app_with(FormConfig::default(), dir.path());
        app.open_picker();
        app.with_picker(|picker| {
            picker.next();
            picker.toggle_mark_selected();
            Ok(())
        });

        let rows = render_to_rows(&app, 100, 30);
        assert!(screen_contains(&rows, "lib/"));
        assert!(screen_contains(&rows, "[x] main.ts"));
        assert!(screen_contains(&rows, "1 marked"));
    }

    #[test]
    fn file_rows_align_size_to_the_right() {
        let entry = FileEntry {
            name: "component.tsx".to_string(),
            path: PathBuf::from("component.tsx"),
            is_dir: false,
            size_bytes: Some(2048),
        };
        let row = format_file_row(&entry, false, 30);
        assert_eq!(display_width(&row), 30);
        assert!(row.starts_with("[ ] component.tsx"));
        assert!(row.ends_with("2.0K"));
    }

    #[test]
    fn long_names_are_truncated_in_the_middle() {
        assert_eq!(truncate_middle_with_ellipsis("abcdefghij", 7), "ab...ij");
        assert_eq!(truncate_middle_with_ellipsis("short", 7), "short");
        assert_eq!(truncate_middle_with_ellipsis("abcdef", 2), "..");
    }
}
