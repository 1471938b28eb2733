//! Capability interface between the form and whatever analysis service is
//! eventually attached.
//!
//! The form only hands over what the user provided. It never reads file
//! contents or checks extensions itself.

use thiserror::Error;

use crate::model::ProvidedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Drop,
    Picker,
}

impl FileSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Drop => "dropped",
            Self::Picker => "selected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Code(String),
    Repository(String),
}

impl AnalysisRequest {
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::Code(_) => "Analyze Code",
            Self::Repository(_) => "Analyze Repository",
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Self::Code(text) | Self::Repository(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeReceipt {
    pub observed: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("no analysis backend is attached")]
    Detached,
}

pub trait AnalysisBackend {
    /// Called with at least one file whenever files are dropped or picked.
    fn on_files_provided(
        &mut self,
        source: FileSource,
        files: &[ProvidedFile],
    ) -> Result<IntakeReceipt, BackendError>;

    fn analyze(&mut self, request: &AnalysisRequest) -> Result<(), BackendError>;
}

/// Default backend: records what it was given and analyzes nothing.
#[derive(Debug, Default)]
pub struct DetachedBackend;

impl AnalysisBackend for DetachedBackend {
    fn on_files_provided(
        &mut self,
        source: FileSource,
        files: &[ProvidedFile],
    ) -> Result<IntakeReceipt, BackendError> {
        for file in files {
            tracing::info!(
                source = source.label(),
                path = %file.path.display(),
                size_bytes = ?file.size_bytes,
                "file provided"
            );
        }
        Ok(IntakeReceipt {
            observed: files.len(),
        })
    }

    fn analyze(&mut self, request: &AnalysisRequest) -> Result<(), BackendError> {
        tracing::info!(
            action = request.action_label(),
            payload_chars = request.payload().chars().count(),
            "analysis requested without a backend"
        );
        Err(BackendError::Detached)
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn detached_backend_observes_every_file() {
        let files = vec![
            ProvidedFile {
                path: PathBuf::from("a.ts"),
                size_bytes: Some(10),
            },
            ProvidedFile {
                path: PathBuf::from("notes.txt"),
                size_bytes: None,
            },
        ];
        let receipt = DetachedBackend
            .on_files_provided(FileSource::Drop, &files)
            .unwrap();
        assert_eq!(receipt.observed, 2);
    }

    #[test]
    fn detached_backend_cannot_analyze() {
        let err = DetachedBackend
            .analyze(&AnalysisRequest::Repository("https://github.com/a/b".into()))
            .unwrap_err();
        assert_eq!(err, BackendError::Detached);
        assert_eq!(err.to_string(), "no analysis backend is attached");
    }
}
