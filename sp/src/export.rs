//! Plain-text export of a generated study module

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::generation::Session;

/// Errors writing an exported module
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// A rendered module ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedModule {
    pub file_name: String,
    pub contents: String,
}

impl ExportedModule {
    pub fn new(day: u32, sessions: &[Session]) -> Self {
        Self {
            file_name: export_file_name(day),
            contents: render_export(sessions),
        }
    }

    /// Hand the module to `sink`
    pub fn save(&self, sink: &dyn ExportSink) -> Result<PathBuf, ExportError> {
        sink.save(&self.file_name, &self.contents)
    }
}

/// Render sessions as `# Title (Type)` blocks separated by `---`
pub fn render_export(sessions: &[Session]) -> String {
    debug!(count = sessions.len(), "render_export: called");
    sessions
        .iter()
        .map(|s| format!("# {} ({})\n\n{}\n\n---\n", s.title, s.session_type, s.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_file_name(day: u32) -> String {
    format!("Day_{}_Study_Module.txt", day)
}

/// Somewhere an exported module can be written
pub trait ExportSink {
    /// Save `contents` as `file_name`, returning where it landed
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory, creating it if needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
        debug!(dir = %self.dir.display(), %file_name, "DirectorySink::save: called");
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, contents).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = contents.len(), "Exported study module");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::SessionType;
    use tempfile::TempDir;

    fn sessions() -> Vec<Session> {
        vec![
            Session::new("Soil phases", SessionType::Theory, "Solids, water, air."),
            Session::new("PYQs", SessionType::Application, "**Q1.** Find e."),
        ]
    }

    #[test]
    fn test_render_export_format() {
        let text = render_export(&sessions());
        assert_eq!(
            text,
            "# Soil phases (Theory)\n\nSolids, water, air.\n\n---\n\n# PYQs (Application)\n\n**Q1.** Find e.\n\n---\n"
        );
    }

    #[test]
    fn test_render_export_empty() {
        assert_eq!(render_export(&[]), "");
    }

    #[test]
    fn test_render_export_is_deterministic() {
        let sessions = sessions();
        assert_eq!(render_export(&sessions), render_export(&sessions));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(5), "Day_5_Study_Module.txt");
        assert_eq!(export_file_name(360), "Day_360_Study_Module.txt");
    }

    #[test]
    fn test_directory_sink_creates_dir() {
        let temp = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp.path().join("nested").join("exports"));

        let module = ExportedModule::new(7, &sessions());
        let path = module.save(&sink).unwrap();

        assert_eq!(path, sink.dir().join("Day_7_Study_Module.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), module.contents);
    }

    #[test]
    fn test_directory_sink_overwrites() {
        let temp = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp.path());
        sink.save("a.txt", "first").unwrap();
        let path = sink.save("a.txt", "second").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn test_directory_sink_reports_failure() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        // a regular file where the directory should be
        let sink = DirectorySink::new(blocker.join("sub"));
        let err = sink.save("a.txt", "x").unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
    }
}
