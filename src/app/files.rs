// File picker behind the upload area.
// - Reads/sorts directory entries and manages selection movement.
// - Handles directory navigation and multi-file marking.
// - Turns the confirmed selection into provided files; nothing is opened or read.
use std::{
    cell::Cell,
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use crate::model::{FileEntry, ProvidedFile};

const DEFAULT_PAGE_STEP: usize = 10;

#[derive(Debug)]
pub(crate) enum PickerOutcome {
    Navigated,
    Confirmed(Vec<ProvidedFile>),
    Nothing,
}

#[derive(Debug)]
pub(crate) struct FilePicker {
    cwd: PathBuf,
    initial_dir: PathBuf,
    entries: Vec<FileEntry>,
    selected: usize,
    marked: BTreeSet<PathBuf>,
    visible_rows: Cell<usize>,
}

impl FilePicker {
    pub(crate) fn open(dir: &Path) -> io::Result<Self> {
        let entries = read_entries(dir)?;
        Ok(Self {
            cwd: dir.to_path_buf(),
            initial_dir: dir.to_path_buf(),
            entries,
            selected: 0,
            marked: BTreeSet::new(),
            visible_rows: Cell::new(0),
        })
    }

    pub(crate) fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub(crate) fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn is_marked(&self, path: &Path) -> bool {
        self.marked.contains(path)
    }

    pub(crate) fn marked_count(&self) -> usize {
        self.marked.len()
    }

    pub(crate) fn set_visible_rows(&self, rows: usize) {
        self.visible_rows.set(rows);
    }

    pub(crate) fn next(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1).min(self.entries.len().saturating_sub(1));
        }
    }

    pub(crate) fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn page_down(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }

        let max_index = self.entries.len().saturating_sub(1);
        self.selected = (self.selected + self.page_step()).min(max_index);
    }

    pub(crate) fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_step());
    }

    pub(crate) fn reload(&mut self) -> io::Result<()> {
        self.entries = read_entries(&self.cwd)?;
        if self.entries.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.entries.len() {
            self.selected = self.entries.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn toggle_mark_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        if entry.is_dir {
            return;
        }

        let path = entry.path.clone();
        if !self.marked.remove(&path) {
            self.marked.insert(path);
        }
        self.next();
    }

    /// Enter on a directory navigates into it. Enter on a file confirms the
    /// marked files, or the highlighted file when nothing is marked.
    pub(crate) fn activate_selected(&mut self) -> io::Result<PickerOutcome> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(self.confirm_marked());
        };

        if entry.is_dir {
            self.change_dir(entry.path)?;
            return Ok(PickerOutcome::Navigated);
        }

        if self.marked.is_empty() {
            return Ok(PickerOutcome::Confirmed(vec![ProvidedFile {
                path: entry.path,
                size_bytes: entry.size_bytes,
            }]));
        }
        Ok(self.confirm_marked())
    }

    pub(crate) fn enter_selected_dir(&mut self) -> io::Result<()> {
        let Some(path) = self
            .selected_entry()
            .and_then(|entry| entry.is_dir.then(|| entry.path.clone()))
        else {
            return Ok(());
        };
        self.change_dir(path)
    }

    pub(crate) fn go_parent_dir(&mut self) -> io::Result<()> {
        let Some(parent) = self.cwd.parent() else {
            return Ok(());
        };
        self.change_dir(parent.to_path_buf())
    }

    pub(crate) fn go_initial_dir(&mut self) -> io::Result<()> {
        self.change_dir(self.initial_dir.clone())
    }

    fn confirm_marked(&mut self) -> PickerOutcome {
        if self.marked.is_empty() {
            return PickerOutcome::Nothing;
        }
        let files = std::mem::take(&mut self.marked)
            .into_iter()
            .map(ProvidedFile::observe)
            .collect();
        PickerOutcome::Confirmed(files)
    }

    fn change_dir(&mut self, new_cwd: PathBuf) -> io::Result<()> {
        let entries = read_entries(&new_cwd)?;
        self.cwd = new_cwd;
        self.entries = entries;
        self.selected = 0;
        Ok(())
    }

    fn page_step(&self) -> usize {
        match self.visible_rows.get() {
            0 => DEFAULT_PAGE_STEP,
            rows => rows.saturating_sub(1).max(1),
        }
    }

    fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }
}

pub(crate) fn read_entries(dir: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            let size_bytes = if is_dir {
                None
            } else {
                entry.metadata().ok().map(|meta| meta.len())
            };

            FileEntry {
                name,
                path,
                is_dir,
                size_bytes,
            }
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|entry| (!entry.is_dir, entry.name.to_ascii_lowercase()));
    Ok(entries)
}
