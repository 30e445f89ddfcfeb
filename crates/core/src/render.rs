//! Standalone HTML documents for slide records.
//!
//! Every document is sized to the slide canvas so the converter can map
//! layout points one-to-one onto slide coordinates.

use crate::types::SlideRecord;
use std::fmt::Write;

/// Universal reset rules, emitted first in every document.
const RESET_RULES: &str = "* { margin: 0; padding: 0; box-sizing: border-box; }";

/// Header, footer, and typography conventions shared by all content slides.
pub const BASE_STYLESHEET: &str = "\
.slide-header { background: #22523B; height: 55pt; display: flex; align-items: center; padding: 0 35pt; }
.slide-header h1 { color: #FFFFFF; font-size: 18pt; }
.page-num { color: #FFFFFF; font-size: 10pt; opacity: 0.8; margin-left: auto; }
.slide-body { padding: 12pt 35pt; flex: 1; }
.slide-footer { display: flex; justify-content: space-between; font-size: 7pt; color: #767171; padding: 8pt 35pt; }
.sub-title { color: #22523B; font-size: 11pt; font-weight: bold; margin-bottom: 8pt; }
.sub-title-wrap { margin-bottom: 8pt; }
.sub-title-bar { height: 2pt; background: #8BAFA2; margin-top: 4pt; }
.two-cols { display: flex; gap: 20pt; }
.col { flex: 1; }
.placeholder { background: #f0f0f0; }
";

/// Physical slide size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl Canvas {
    /// 16:9 widescreen slide, 10in × 5.625in.
    pub const WIDESCREEN: Canvas = Canvas {
        width_pt: 720.0,
        height_pt: 405.0,
    };
}

impl Default for Canvas {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

/// Wraps slide fragments into complete HTML documents.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    canvas: Canvas,
}

impl HtmlRenderer {
    /// Create a renderer for the default 16:9 canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer for a custom canvas.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Render one slide record into a complete HTML5 document.
    ///
    /// Order inside `<style>`: reset, canvas rules, [`BASE_STYLESHEET`],
    /// then the record's own styles. The record's body becomes the body.
    pub fn render(&self, record: &SlideRecord) -> String {
        let mut html = String::with_capacity(
            512 + BASE_STYLESHEET.len() + record.styles.len() + record.body.len(),
        );

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
        html.push_str(RESET_RULES);
        html.push('\n');
        // Writing into a String cannot fail
        let _ = write!(
            html,
            "html, body {{\n  width: {}pt; height: {}pt; margin: 0; padding: 0;\n  \
             font-family: Arial, sans-serif; background: #FFFFFF;\n  \
             display: flex; flex-direction: column;\n}}\n",
            self.canvas.width_pt, self.canvas.height_pt
        );
        html.push_str(BASE_STYLESHEET);
        html.push_str(&record.styles);
        html.push_str("\n</style>\n</head>\n<body>\n");
        html.push_str(&record.body);
        html.push_str("\n</body>\n</html>\n");

        html
    }
}
