//! View-state of the intake form.
//!
//! The four fields the form renders from are kept in one immutable record.
//! Every user event produces a new record through [`ViewState::apply`]; the
//! host never mutates fields in place.

use crate::model::ActiveTab;

/// Discrete input events the form reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SelectTab(ActiveTab),
    SetCodeInput(String),
    SetGithubUrl(String),
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    FileSelected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    active_tab: ActiveTab,
    code_input: String,
    github_url: String,
    drag_active: bool,
}

impl ViewState {
    pub fn new(default_tab: ActiveTab) -> Self {
        Self {
            active_tab: default_tab,
            ..Self::default()
        }
    }

    pub fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::SelectTab(active_tab) => Self { active_tab, ..self },
            ViewEvent::SetCodeInput(code_input) => Self { code_input, ..self },
            ViewEvent::SetGithubUrl(github_url) => Self { github_url, ..self },
            ViewEvent::DragEnter | ViewEvent::DragOver => Self {
                drag_active: true,
                ..self
            },
            ViewEvent::DragLeave | ViewEvent::Drop => Self {
                drag_active: false,
                ..self
            },
            // Picker selections leave the form untouched.
            ViewEvent::FileSelected => self,
        }
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    pub fn github_url(&self) -> &str {
        &self.github_url
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn line_count(&self) -> usize {
        line_count(&self.code_input)
    }

    pub fn character_count(&self) -> usize {
        character_count(&self.code_input)
    }
}

/// Number of newline-delimited segments; an empty string has one.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Length in UTF-16 code units, the way browsers report string length.
pub fn character_count(text: &str) -> usize {
    text.encode_utf16().count()
}
