// Host-side application state around the intake form.
// - Owns the view-state record and replaces it on every event.
// - Tracks focus, text cursors, the file picker, and the activity log.
// - Routes drops, picks, and analyze requests to the analysis backend.
mod activity_log;
mod drop;
mod events;
mod files;
mod input;

use std::{cell::Cell, env, fs, io, path::PathBuf};

use crate::{
    backend::{AnalysisBackend, AnalysisRequest, FileSource},
    config::FormConfig,
    model::{ActiveTab, Focus, ProvidedFile},
    state::{ViewEvent, ViewState},
};

use self::{
    activity_log::ActivityLog,
    drop::parse_dropped_paths,
    files::{FilePicker, PickerOutcome},
};

pub(crate) use self::input::line_and_column;
pub use self::events::Control;

pub struct App {
    config: FormConfig,
    view: ViewState,
    pub(crate) focus: Focus,
    pub(crate) code_cursor: usize,
    pub(crate) url_cursor: usize,
    pub(crate) activity: ActivityLog,
    pub(crate) picker: Option<FilePicker>,
    picker_dir: PathBuf,
    pub(crate) show_keybinds: bool,
    keybinds_scroll: Cell<usize>,
    backend: Box<dyn AnalysisBackend>,
}

impl App {
    pub fn new(
        config: FormConfig,
        start_dir: Option<PathBuf>,
        backend: Box<dyn AnalysisBackend>,
    ) -> io::Result<Self> {
        let picker_dir = resolve_start_dir(start_dir)?;
        let view = ViewState::new(config.default_tab);
        let focus = first_focus(view.active_tab());

        Ok(Self {
            config,
            view,
            focus,
            code_cursor: 0,
            url_cursor: 0,
            activity: ActivityLog::with_greeting("Ready. Paste code, enter a repository URL, or drop files."),
            picker: None,
            picker_dir,
            show_keybinds: false,
            keybinds_scroll: Cell::new(0),
            backend,
        })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub(crate) fn dispatch(&mut self, event: ViewEvent) {
        tracing::trace!(?event, "view event");
        self.view = std::mem::take(&mut self.view).apply(event);
    }

    pub fn select_tab(&mut self, tab: ActiveTab) {
        let switching = tab != self.view.active_tab();
        self.dispatch(ViewEvent::SelectTab(tab));
        if switching {
            tracing::debug!(tab = tab.label(), "tab selected");
            self.set_focus(first_focus(tab));
        }
    }

    pub fn select_next_tab(&mut self) {
        self.select_tab(self.view.active_tab().next());
    }

    pub fn select_previous_tab(&mut self) {
        self.select_tab(self.view.active_tab().previous());
    }

    pub fn select_tab_by_number(&mut self, number: usize) -> bool {
        let Some(tab) = ActiveTab::from_number(number) else {
            return false;
        };
        self.select_tab(tab);
        true
    }

    pub fn focus_next(&mut self) {
        let order = self.view.active_tab().focus_order();
        let index = order.iter().position(|focus| *focus == self.focus).unwrap_or(0);
        self.set_focus(order[(index + 1) % order.len()]);
    }

    pub fn focus_previous(&mut self) {
        let order = self.view.active_tab().focus_order();
        let index = order.iter().position(|focus| *focus == self.focus).unwrap_or(0);
        self.set_focus(order[(index + order.len() - 1) % order.len()]);
    }

    /// Moving focus onto the drop target is a drag-enter, moving off it a
    /// drag-leave.
    pub(crate) fn set_focus(&mut self, focus: Focus) {
        let previous = self.focus;
        self.focus = focus;
        if previous == Focus::DropZone && focus != Focus::DropZone {
            self.dispatch(ViewEvent::DragLeave);
        } else if focus == Focus::DropZone && previous != Focus::DropZone {
            self.dispatch(ViewEvent::DragEnter);
        }
    }

    pub fn toggle_keybinds(&mut self) {
        self.show_keybinds = !self.show_keybinds;
        self.keybinds_scroll.set(0);
    }

    pub(crate) fn scroll_keybinds_by(&self, delta: isize) {
        let current = self.keybinds_scroll.get();
        self.keybinds_scroll.set(current.saturating_add_signed(delta));
    }

    /// Clamps the popup scroll to what the last render could show.
    pub(crate) fn clamp_keybinds_scroll(&self, max_scroll_top: usize) -> usize {
        let clamped = self.keybinds_scroll.get().min(max_scroll_top);
        self.keybinds_scroll.set(clamped);
        clamped
    }

    pub fn hide_keybinds(&mut self) {
        self.show_keybinds = false;
    }

    pub fn analyze(&mut self) {
        let request = match self.view.active_tab() {
            ActiveTab::Manual => AnalysisRequest::Code(self.view.code_input().to_string()),
            ActiveTab::GithubRepository => {
                AnalysisRequest::Repository(self.view.github_url().to_string())
            }
        };

        match self.backend.analyze(&request) {
            Ok(()) => self
                .activity
                .push(format!("{}: request submitted.", request.action_label())),
            Err(err) => {
                tracing::warn!(action = request.action_label(), %err, "analysis request failed");
                self.activity
                    .push(format!("{}: {err}.", request.action_label()));
            }
        }
    }

    /// Pasted text on the drop target is the drop itself. Paths are observed,
    /// never opened.
    pub fn drop_payload(&mut self, payload: &str) {
        self.dispatch(ViewEvent::DragOver);
        let files = parse_dropped_paths(payload)
            .into_iter()
            .map(ProvidedFile::observe)
            .collect::<Vec<_>>();
        self.dispatch(ViewEvent::Drop);

        if files.is_empty() {
            self.activity.push("Drop contained no file paths.");
            return;
        }
        self.provide_files(FileSource::Drop, files);
    }

    pub fn open_picker(&mut self) {
        match FilePicker::open(&self.picker_dir) {
            Ok(picker) => self.picker = Some(picker),
            Err(err) => {
                tracing::warn!(dir = %self.picker_dir.display(), %err, "cannot open file picker");
                self.activity.push(format!(
                    "Cannot open {}: {err}",
                    self.picker_dir.display()
                ));
            }
        }
    }

    pub fn close_picker(&mut self) {
        if let Some(picker) = self.picker.take() {
            self.picker_dir = picker.cwd().to_path_buf();
        }
    }

    pub(crate) fn activate_picker_selection(&mut self) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };

        match picker.activate_selected() {
            Ok(PickerOutcome::Confirmed(files)) => {
                self.close_picker();
                self.dispatch(ViewEvent::FileSelected);
                self.provide_files(FileSource::Picker, files);
            }
            Ok(PickerOutcome::Navigated | PickerOutcome::Nothing) => {}
            Err(err) => self.report_picker_error(err),
        }
    }

    pub(crate) fn with_picker(&mut self, action: impl FnOnce(&mut FilePicker) -> io::Result<()>) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        if let Err(err) = action(picker) {
            self.report_picker_error(err);
        }
    }

    fn report_picker_error(&mut self, err: io::Error) {
        tracing::warn!(%err, "file picker navigation failed");
        self.activity.push(format!("File picker: {err}"));
    }

    fn provide_files(&mut self, source: FileSource, files: Vec<ProvidedFile>) {
        match self.backend.on_files_provided(source, &files) {
            Ok(receipt) => {
                let names = files
                    .iter()
                    .map(describe_file)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.activity.push(format!(
                    "Files {} ({}): {names}",
                    source.label(),
                    receipt.observed
                ));
            }
            Err(err) => {
                tracing::warn!(source = source.label(), %err, "backend refused files");
                self.activity
                    .push(format!("Files {} but not accepted: {err}", source.label()));
            }
        }
    }
}

fn first_focus(tab: ActiveTab) -> Focus {
    tab.focus_order()[0]
}

fn describe_file(file: &ProvidedFile) -> String {
    match file.size_bytes {
        Some(bytes) => format!("{} ({})", file.name(), format_size(bytes)),
        None => format!("{} (missing)", file.name()),
    }
}

pub(crate) fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let bytes_f = bytes as f64;

    if bytes_f >= GB {
        format!("{:.1}G", bytes_f / GB)
    } else if bytes_f >= MB {
        format!("{:.1}M", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1}K", bytes_f / KB)
    } else {
        format!("{bytes}B")
    }
}

fn resolve_start_dir(start_dir: Option<PathBuf>) -> io::Result<PathBuf> {
    let Some(path) = start_dir else {
        return env::current_dir();
    };

    let absolute = if path.is_absolute() {
        path
    } else {
        env::current_dir()?.join(path)
    };

    let metadata = fs::metadata(&absolute).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid start directory '{}': {err}", absolute.display()),
        )
    })?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Start path is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}
