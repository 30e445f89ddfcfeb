//! Writes rendered slide documents into a working directory.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Persists rendered HTML under deterministic, index-keyed names.
#[derive(Debug, Clone)]
pub struct HtmlEmitter {
    work_dir: PathBuf,
}

impl HtmlEmitter {
    /// Create an emitter writing into `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Path of the document for a 1-based slide index: `slide{index}.html`.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.work_dir.join(format!("slide{}.html", index))
    }

    /// Write `html` for slide `index`, replacing any earlier file.
    pub fn emit(&self, index: usize, html: &str) -> Result<PathBuf> {
        if index == 0 {
            return Err(Error::StaticContent(
                "slide indices are 1-based; got 0".to_string(),
            ));
        }

        fs::create_dir_all(&self.work_dir)?;
        let path = self.path_for(index);
        fs::write(&path, html)?;

        log::info!("Created: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_is_index_keyed() {
        let emitter = HtmlEmitter::new("slides");
        assert_eq!(emitter.path_for(1), PathBuf::from("slides/slide1.html"));
        assert_eq!(emitter.path_for(15), PathBuf::from("slides/slide15.html"));
    }

    #[test]
    fn test_emit_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = HtmlEmitter::new(dir.path().join("nested").join("slides"));

        let path = emitter.emit(3, "<p>first</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>first</p>");

        let again = emitter.emit(3, "<p>second</p>").unwrap();
        assert_eq!(path, again);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>second</p>");
    }

    #[test]
    fn test_emit_rejects_zero_index() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = HtmlEmitter::new(dir.path());
        assert!(matches!(
            emitter.emit(0, "<p></p>"),
            Err(Error::StaticContent(_))
        ));
    }

    #[test]
    fn test_emit_fails_when_work_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("slides");
        fs::write(&blocker, "not a directory").unwrap();

        let emitter = HtmlEmitter::new(&blocker);
        assert!(matches!(emitter.emit(1, "<p></p>"), Err(Error::IoError(_))));
    }
}
