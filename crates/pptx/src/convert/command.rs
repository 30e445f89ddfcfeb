//! Converter that delegates layout to an external program.

use super::layout::LayoutDocument;
use super::{ConvertedSlide, SlideConverter};
use crate::document::Presentation;
use deck_core::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Runs `<program> [args..] <html path>` and reads a [`LayoutDocument`]
/// as JSON from its stdout.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// Create a converter for `program` with no extra arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments passed before the HTML path.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program and parse its layout document.
    fn layout_for(&self, html_path: &Path) -> Result<LayoutDocument> {
        log::debug!("Running {} {:?} {}", self.program, self.args, html_path.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(html_path)
            .output()
            .map_err(|e| Error::conversion(format!("failed to run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::conversion(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::conversion(format!("invalid layout from '{}': {}", self.program, e)))
    }
}

impl SlideConverter for CommandConverter {
    fn convert(&mut self, html_path: &Path, pres: &mut Presentation) -> Result<ConvertedSlide> {
        // Parse fully before touching the presentation
        let layout = self.layout_for(html_path)?;

        let handle = pres.add_slide();
        if let Some(slide) = pres.slide_mut(handle) {
            layout.apply_to(slide);
        }

        Ok(ConvertedSlide {
            slide: handle,
            placeholders: layout.placeholders,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::document::DocumentProperties;
    use std::fs;

    fn script(dir: &Path, body: &str) -> String {
        let path = dir.join("convert.sh");
        fs::write(&path, body).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_reads_layout_from_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(
            dir.path(),
            r#"printf '{"shapes":[{"kind":"text","x":35,"y":18,"w":500,"h":20,"text":"%s"}],"placeholders":[{"id":"table1","x":10,"y":20,"w":300,"h":150}]}' "$1""#,
        );
        let mut converter = CommandConverter::new("sh").with_args([program]);
        let mut pres = Presentation::new(DocumentProperties::default());

        let converted = converter
            .convert(Path::new("slide3.html"), &mut pres)
            .unwrap();

        assert_eq!(pres.slide_count(), 1);
        assert_eq!(converted.placeholders.len(), 1);
        assert_eq!(converted.placeholders[0].w, 300.0);
        let slide = pres.slide(converted.slide).unwrap();
        assert_eq!(slide.shapes.len(), 1);
    }

    #[test]
    fn test_non_zero_exit_is_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo 'unsupported CSS' >&2; exit 3");
        let mut converter = CommandConverter::new("sh").with_args([program]);
        let mut pres = Presentation::new(DocumentProperties::default());

        let err = converter
            .convert(Path::new("slide2.html"), &mut pres)
            .unwrap_err();

        match err {
            Error::ConversionError { message, .. } => assert!(message.contains("unsupported CSS")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn test_malformed_output_is_conversion_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo 'not json'");
        let mut converter = CommandConverter::new("sh").with_args([program]);
        let mut pres = Presentation::new(DocumentProperties::default());

        let result = converter.convert(Path::new("slide1.html"), &mut pres);

        assert!(matches!(result, Err(Error::ConversionError { .. })));
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn test_missing_program_is_conversion_error() {
        let mut converter = CommandConverter::new("/nonexistent/html2pptx");
        let mut pres = Presentation::new(DocumentProperties::default());

        let result = converter.convert(Path::new("slide1.html"), &mut pres);
        assert!(matches!(result, Err(Error::ConversionError { .. })));
    }
}
