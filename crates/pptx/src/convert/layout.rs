//! Layout documents: the JSON form of a converted slide.
//!
//! External converters print one of these on stdout. Every length is in
//! points on the slide canvas.
//!
//! ```json
//! {
//!   "background": "22523B",
//!   "shapes": [
//!     {"kind": "rect", "x": 0, "y": 0, "w": 720, "h": 55, "fill": "22523B"},
//!     {"kind": "text", "x": 35, "y": 18, "w": 500, "h": 20, "text": "1. 프로젝트 개요",
//!      "font_size": 18, "color": "FFFFFF", "bold": true}
//!   ],
//!   "placeholders": [{"id": "table1", "x": 35, "y": 150, "w": 295, "h": 120}]
//! }
//! ```

use crate::document::{Frame, RectShape, Slide, TextBox, TextStyle};
use deck_core::{Align, PlaceholderDescriptor};
use serde::{Deserialize, Serialize};

/// One converted slide: background, shapes in z-order, and placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default)]
    pub shapes: Vec<LayoutShape>,

    #[serde(default)]
    pub placeholders: Vec<PlaceholderDescriptor>,
}

/// A shape in a layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutShape {
    Text {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        align: Align,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<String>,
    },
}

impl LayoutDocument {
    /// Materialize the shapes and background onto `slide`.
    pub fn apply_to(&self, slide: &mut Slide) {
        slide.background = self.background.clone();

        for shape in &self.shapes {
            match shape {
                LayoutShape::Text {
                    x,
                    y,
                    w,
                    h,
                    text,
                    font_size,
                    color,
                    bold,
                    align,
                    fill,
                } => {
                    let defaults = TextStyle::default();
                    slide.add_text(TextBox {
                        frame: Frame::new(*x, *y, *w, *h),
                        text: text.clone(),
                        style: TextStyle {
                            font_size: font_size.unwrap_or(defaults.font_size),
                            color: color.clone().unwrap_or(defaults.color),
                            bold: *bold,
                            align: *align,
                        },
                        fill: fill.clone(),
                    });
                }
                LayoutShape::Rect {
                    x,
                    y,
                    w,
                    h,
                    fill,
                    line,
                } => slide.add_rect(RectShape {
                    frame: Frame::new(*x, *y, *w, *h),
                    fill: fill.clone(),
                    line: line.clone(),
                }),
            }
        }
    }
}
