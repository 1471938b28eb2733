// Activity log shown beneath the form.
// - Records observed intake events (drops, picks, analyze requests).
// - Implements scrolling, paging, and tail-follow behavior.
use std::cell::Cell;

#[derive(Debug, Clone)]
pub(crate) struct ActivityLog {
    lines: Vec<String>,
    scroll: Cell<usize>,
    last_max_scroll_top: Cell<usize>,
    follow_tail: bool,
}

impl ActivityLog {
    const PAGE_STEP: usize = 8;
    const MAX_LINES: usize = 2_000;

    pub(crate) fn with_greeting(greeting: &str) -> Self {
        Self {
            lines: vec![greeting.to_string()],
            scroll: Cell::new(0),
            last_max_scroll_top: Cell::new(0),
            follow_tail: true,
        }
    }

    pub(crate) fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        self.trim_old_lines_if_needed();
        if self.follow_tail {
            self.scroll.set(self.lines.len().saturating_sub(1));
        }
    }

    pub(crate) fn scroll_down(&mut self) {
        let max_scroll = self.last_max_scroll_top.get();
        let next = (self.scroll.get() + 1).min(max_scroll);
        self.scroll.set(next);
        if next >= max_scroll {
            self.follow_tail = true;
        }
    }

    pub(crate) fn scroll_up(&mut self) {
        self.scroll.set(self.scroll.get().saturating_sub(1));
        self.follow_tail = false;
    }

    pub(crate) fn page_down(&mut self) {
        let max_scroll = self.last_max_scroll_top.get();
        let next = (self.scroll.get() + Self::PAGE_STEP).min(max_scroll);
        self.scroll.set(next);
        if next >= max_scroll {
            self.follow_tail = true;
        }
    }

    pub(crate) fn page_up(&mut self) {
        self.scroll
            .set(self.scroll.get().saturating_sub(Self::PAGE_STEP));
        self.follow_tail = false;
    }

    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Called while rendering, once the viewport height is known.
    pub(crate) fn clamped_scroll_for_viewport(&self, visible_line_count: usize) -> usize {
        let visible_line_count = visible_line_count.max(1);
        let max_scroll_top = self.lines.len().saturating_sub(visible_line_count);
        self.last_max_scroll_top.set(max_scroll_top);
        let clamped = self.scroll.get().min(max_scroll_top);
        self.scroll.set(clamped);
        clamped
    }

    fn trim_old_lines_if_needed(&mut self) {
        if self.lines.len() <= Self::MAX_LINES {
            return;
        }

        let overflow = self.lines.len() - Self::MAX_LINES;
        self.lines.drain(0..overflow);
        self.scroll.set(self.scroll.get().saturating_sub(overflow));
    }
}
