//! In-memory presentation document.
//!
//! Geometry is kept in points, matching the HTML canvas; conversion to EMU
//! happens only when the package is written.

use deck_core::{Align, Canvas, ResolvedTable, TableCanvas};

/// EMU (English Metric Units) per typographic point.
pub const EMU_PER_PT: f64 = 12_700.0;

/// Convert points to EMU, rounding to the nearest unit.
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMU_PER_PT).round() as i64
}

/// Document-level properties stored in `docProps`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentProperties {
    pub title: String,
    pub author: String,
    pub company: String,
    pub subject: String,
}

/// A rectangle on the slide, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Run formatting for a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub color: String,
    pub bold: bool,
    pub align: Align,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: "333333".to_string(),
            bold: false,
            align: Align::Left,
        }
    }
}

/// A text box. Each line of `text` becomes one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub frame: Frame,
    pub text: String,
    pub style: TextStyle,
    /// Optional background fill.
    pub fill: Option<String>,
}

/// A plain filled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub frame: Frame,
    pub fill: Option<String>,
    /// Outline color; no outline when `None`.
    pub line: Option<String>,
}

/// A shape on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text(TextBox),
    Rect(RectShape),
    Table(ResolvedTable),
}

/// One slide: an optional background color and shapes in z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub background: Option<String>,
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn add_text(&mut self, text_box: TextBox) {
        self.shapes.push(Shape::Text(text_box));
    }

    pub fn add_rect(&mut self, rect: RectShape) {
        self.shapes.push(Shape::Rect(rect));
    }

    /// Tables on this slide, in drawing order.
    pub fn tables(&self) -> impl Iterator<Item = &ResolvedTable> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Table(table) => Some(table),
            _ => None,
        })
    }
}

impl TableCanvas for Slide {
    fn draw_table(&mut self, table: ResolvedTable) {
        self.shapes.push(Shape::Table(table));
    }
}

/// Handle to a slide appended to a [`Presentation`] (0-based position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideHandle(usize);

impl SlideHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A presentation being assembled slide by slide.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    properties: DocumentProperties,
    canvas: Canvas,
    slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty 16:9 presentation.
    pub fn new(properties: DocumentProperties) -> Self {
        Self {
            properties,
            canvas: Canvas::default(),
            slides: Vec::new(),
        }
    }

    /// Use a custom slide size.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Append an empty slide and return its handle.
    pub fn add_slide(&mut self) -> SlideHandle {
        self.slides.push(Slide::default());
        SlideHandle(self.slides.len() - 1)
    }

    pub fn slide(&self, handle: SlideHandle) -> Option<&Slide> {
        self.slides.get(handle.0)
    }

    pub fn slide_mut(&mut self, handle: SlideHandle) -> Option<&mut Slide> {
        self.slides.get_mut(handle.0)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Drop every slide past the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.slides.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{PlaceholderDescriptor, TableBinding};

    #[test]
    fn test_pt_to_emu() {
        assert_eq!(pt_to_emu(1.0), 12_700);
        assert_eq!(pt_to_emu(720.0), 9_144_000);
        assert_eq!(pt_to_emu(405.0), 5_143_500);
        assert_eq!(pt_to_emu(0.5), 6_350);
    }

    #[test]
    fn test_add_and_truncate_slides() {
        let mut pres = Presentation::new(DocumentProperties::default());
        let first = pres.add_slide();
        let second = pres.add_slide();
        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(pres.slide_count(), 2);

        pres.truncate(1);
        assert_eq!(pres.slide_count(), 1);
        assert!(pres.slide(second).is_none());
    }

    #[test]
    fn test_slide_draws_tables() {
        let mut pres = Presentation::new(DocumentProperties::default());
        let handle = pres.add_slide();
        let binding = TableBinding::new("table1", vec![vec!["a".into()]]);
        let frame = PlaceholderDescriptor::new("table1", 10.0, 20.0, 300.0, 150.0);

        let slide = pres.slide_mut(handle).unwrap();
        slide.draw_table(binding.resolve(&frame));

        assert_eq!(pres.slide(handle).unwrap().tables().count(), 1);
    }
}
