//! Notebook catalog: a small JSON file mapping notebook ids to URLs.
//!
//! The capture run only consumes two lookups (entry by id, active entry);
//! the rest is CLI convenience for maintaining the file.

use crate::auth::data_dir;
use crate::error::{CaptureError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One catalogued notebook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notebook {
    /// Short identifier used on the command line
    pub id: String,

    /// Human-readable title
    #[serde(default)]
    pub title: String,

    /// Full notebook URL
    pub url: String,
}

/// Collection of known notebooks plus the currently active one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotebookLibrary {
    #[serde(default)]
    notebooks: Vec<Notebook>,

    /// Id of the notebook used when none is specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active: Option<String>,
}

impl NotebookLibrary {
    /// Default library file location under the slidecap data directory
    pub fn default_path() -> PathBuf {
        data_dir().join("notebooks.json")
    }

    /// Load the library from the default location; a missing file is an
    /// empty library, not an error
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path())
    }

    /// Load the library from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| CaptureError::Library(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| CaptureError::Library(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Save the library to a specific path, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CaptureError::Library(format!("failed to create {}: {}", parent.display(), e)))?;
        }

        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| CaptureError::Library(format!("failed to serialize library: {}", e)))?;
        std::fs::write(path, raw)
            .map_err(|e| CaptureError::Library(format!("failed to write {}: {}", path.display(), e)))
    }

    /// Look up a notebook by id
    pub fn get(&self, id: &str) -> Option<&Notebook> {
        self.notebooks.iter().find(|n| n.id == id)
    }

    /// The active notebook, if one is set and still present
    pub fn active(&self) -> Option<&Notebook> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// Add or replace a notebook entry; the first entry added becomes active
    pub fn add(&mut self, notebook: Notebook) {
        if self.active.is_none() {
            self.active = Some(notebook.id.clone());
        }

        if let Some(existing) = self.notebooks.iter_mut().find(|n| n.id == notebook.id) {
            *existing = notebook;
        } else {
            self.notebooks.push(notebook);
        }
    }

    /// Mark a notebook as active; fails if the id is unknown
    pub fn set_active(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(CaptureError::Library(format!("unknown notebook id '{}'", id)));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// All catalogued notebooks in insertion order
    pub fn notebooks(&self) -> &[Notebook] {
        &self.notebooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> Notebook {
        Notebook {
            id: id.to_string(),
            title: format!("Notebook {}", id),
            url: format!("https://notebooklm.google.com/notebook/{}", id),
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut lib = NotebookLibrary::default();
        lib.add(sample("alpha"));
        lib.add(sample("beta"));

        assert_eq!(lib.get("alpha"), Some(&sample("alpha")));
        assert_eq!(lib.get("gamma"), None);
        assert_eq!(lib.notebooks().len(), 2);
    }

    #[test]
    fn test_first_added_becomes_active() {
        let mut lib = NotebookLibrary::default();
        assert!(lib.active().is_none());

        lib.add(sample("alpha"));
        lib.add(sample("beta"));
        assert_eq!(lib.active().map(|n| n.id.as_str()), Some("alpha"));

        lib.set_active("beta").unwrap();
        assert_eq!(lib.active().map(|n| n.id.as_str()), Some("beta"));
    }

    #[test]
    fn test_set_active_unknown_id() {
        let mut lib = NotebookLibrary::default();
        assert!(lib.set_active("missing").is_err());
    }

    #[test]
    fn test_add_replaces_existing() {
        let mut lib = NotebookLibrary::default();
        lib.add(sample("alpha"));

        let mut updated = sample("alpha");
        updated.title = "Renamed".to_string();
        lib.add(updated.clone());

        assert_eq!(lib.notebooks().len(), 1);
        assert_eq!(lib.get("alpha"), Some(&updated));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lib = NotebookLibrary::load(dir.path().join("notebooks.json")).unwrap();
        assert!(lib.notebooks().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notebooks.json");

        let mut lib = NotebookLibrary::default();
        lib.add(sample("alpha"));
        lib.save(&path).unwrap();

        let reloaded = NotebookLibrary::load(&path).unwrap();
        assert_eq!(reloaded.get("alpha"), Some(&sample("alpha")));
        assert_eq!(reloaded.active().map(|n| n.id.as_str()), Some("alpha"));
    }
}
