//! Table data bound to slide placeholders.
//!
//! A [`TableBinding`] is pure literal data: which placeholder it targets, the
//! grid of cells, and table-wide options. Resolving a binding against a
//! [`PlaceholderDescriptor`] yields a [`ResolvedTable`] whose frame is the
//! placeholder's geometry and whose every cell has its style settled.

use crate::error::{Error, Result};
use crate::types::PlaceholderDescriptor;
use serde::{Deserialize, Serialize};

/// Shared deck colors as RGB hex without the leading `#`.
pub mod palette {
    pub const DEEP_GREEN: &str = "22523B";
    pub const DARK_GREEN: &str = "153325";
    pub const PALE_GREEN: &str = "8BAFA2";
    pub const TEXT_DARK: &str = "333333";
    pub const WHITE: &str = "FFFFFF";
    pub const BORDER_GRAY: &str = "DDDDDD";
}

/// Font size used when a binding does not specify one.
pub const DEFAULT_FONT_SIZE: f64 = 8.0;

/// Reusable cell styles applied consistently across every table in a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// Dark fill, light bold text. Used for header rows.
    Header,
    /// Pale fill, dark bold text. Used for label columns.
    Label,
}

impl StylePreset {
    /// The cell style this preset stands for.
    pub fn style(self) -> CellStyle {
        match self {
            StylePreset::Header => CellStyle {
                fill: Some(palette::DEEP_GREEN.to_string()),
                color: Some(palette::WHITE.to_string()),
                bold: Some(true),
                ..CellStyle::default()
            },
            StylePreset::Label => CellStyle {
                fill: Some(palette::PALE_GREEN.to_string()),
                color: Some(palette::DARK_GREEN.to_string()),
                bold: Some(true),
                ..CellStyle::default()
            },
        }
    }
}

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Optional styling attributes of a cell. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl CellStyle {
    /// Return a copy of `self` with every attribute set in `over` replaced.
    pub fn overlay(&self, over: &CellStyle) -> CellStyle {
        CellStyle {
            fill: over.fill.clone().or_else(|| self.fill.clone()),
            color: over.color.clone().or_else(|| self.color.clone()),
            bold: over.bold.or(self.bold),
            align: over.align.or(self.align),
            font_size: over.font_size.or(self.font_size),
        }
    }
}

/// A styled cell: text plus an optional preset and explicit overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledCell {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<StylePreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl StyledCell {
    /// Preset style (if any) with the explicit attributes laid over it.
    pub fn style(&self) -> CellStyle {
        let explicit = CellStyle {
            fill: self.fill.clone(),
            color: self.color.clone(),
            bold: self.bold,
            align: self.align,
            font_size: self.font_size,
        };
        match self.preset {
            Some(preset) => preset.style().overlay(&explicit),
            None => explicit,
        }
    }
}

/// One cell of a table binding, as written in deck content.
///
/// Plain cells are bare JSON strings; styled cells are objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellSpec {
    Text(String),
    Styled(StyledCell),
}

impl CellSpec {
    /// A cell using one of the shared presets.
    pub fn preset(text: impl Into<String>, preset: StylePreset) -> Self {
        CellSpec::Styled(StyledCell {
            text: text.into(),
            preset: Some(preset),
            fill: None,
            color: None,
            bold: None,
            align: None,
            font_size: None,
        })
    }

    /// Shorthand for a header-styled cell.
    pub fn header(text: impl Into<String>) -> Self {
        Self::preset(text, StylePreset::Header)
    }

    /// Shorthand for a label-styled cell.
    pub fn label(text: impl Into<String>) -> Self {
        Self::preset(text, StylePreset::Label)
    }

    pub fn text(&self) -> &str {
        match self {
            CellSpec::Text(text) => text,
            CellSpec::Styled(cell) => &cell.text,
        }
    }

    pub fn style(&self) -> CellStyle {
        match self {
            CellSpec::Text(_) => CellStyle::default(),
            CellSpec::Styled(cell) => cell.style(),
        }
    }
}

impl From<&str> for CellSpec {
    fn from(text: &str) -> Self {
        CellSpec::Text(text.to_string())
    }
}

/// Outer and inner border lines of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBorder {
    /// Line weight in points.
    pub pt: f64,
    /// Line color as RGB hex.
    pub color: String,
}

impl Default for TableBorder {
    fn default() -> Self {
        Self {
            pt: 0.5,
            color: palette::BORDER_GRAY.to_string(),
        }
    }
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

/// Literal table data targeting one named placeholder on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBinding {
    /// Id of the placeholder element in the slide body.
    pub placeholder: String,

    /// Table-wide font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    #[serde(default)]
    pub border: TableBorder,

    /// Relative column weights. Scaled to the placeholder width when drawn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub col_widths: Vec<f64>,

    /// Table-wide alignment; cells may override it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,

    /// Rows of cells, first row first.
    pub rows: Vec<Vec<CellSpec>>,
}

impl TableBinding {
    /// Create a binding with default options.
    pub fn new(placeholder: impl Into<String>, rows: Vec<Vec<CellSpec>>) -> Self {
        Self {
            placeholder: placeholder.into(),
            font_size: DEFAULT_FONT_SIZE,
            border: TableBorder::default(),
            col_widths: Vec::new(),
            align: None,
            rows,
        }
    }

    /// Set relative column weights.
    pub fn with_col_widths(mut self, widths: Vec<f64>) -> Self {
        self.col_widths = widths;
        self
    }

    /// Number of columns: the length of the longest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check that the binding can be drawn at all.
    pub fn validate(&self) -> Result<()> {
        if self.placeholder.trim().is_empty() {
            return Err(Error::StaticContent(
                "table binding has an empty placeholder id".to_string(),
            ));
        }
        if self.rows.is_empty() || self.column_count() == 0 {
            return Err(Error::StaticContent(format!(
                "table for placeholder '{}' has no cells",
                self.placeholder
            )));
        }
        if self.col_widths.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::StaticContent(format!(
                "table for placeholder '{}' has an invalid column width",
                self.placeholder
            )));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(Error::StaticContent(format!(
                "table for placeholder '{}' has an invalid font size",
                self.placeholder
            )));
        }
        Ok(())
    }

    /// Absolute column widths in points summing to `total`.
    ///
    /// Falls back to equal columns when the weights don't match the column
    /// count or sum to zero.
    fn column_widths(&self, total: f64) -> Vec<f64> {
        let cols = self.column_count();
        let sum: f64 = self.col_widths.iter().sum();
        if self.col_widths.len() == cols && sum > 0.0 {
            self.col_widths.iter().map(|w| total * w / sum).collect()
        } else {
            vec![total / cols as f64; cols]
        }
    }

    /// Resolve the binding at a placeholder's exact geometry.
    pub fn resolve(&self, frame: &PlaceholderDescriptor) -> ResolvedTable {
        let cols = self.column_count();
        let base = CellStyle {
            fill: None,
            color: Some(palette::TEXT_DARK.to_string()),
            bold: Some(false),
            align: Some(self.align.unwrap_or_default()),
            font_size: Some(self.font_size),
        };

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<ResolvedCell> = row
                    .iter()
                    .map(|cell| ResolvedCell::new(cell.text(), base.overlay(&cell.style())))
                    .collect();
                // Short rows are padded so every row spans the full grid
                while cells.len() < cols {
                    cells.push(ResolvedCell::new("", base.clone()));
                }
                cells
            })
            .collect();

        ResolvedTable {
            placeholder: self.placeholder.clone(),
            x: frame.x,
            y: frame.y,
            w: frame.w,
            h: frame.h,
            col_widths: self.column_widths(frame.w),
            border: self.border.clone(),
            rows,
        }
    }
}

/// A cell with every style attribute settled.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCell {
    pub text: String,
    pub fill: Option<String>,
    pub color: String,
    pub bold: bool,
    pub align: Align,
    pub font_size: f64,
}

impl ResolvedCell {
    fn new(text: &str, style: CellStyle) -> Self {
        Self {
            text: text.to_string(),
            fill: style.fill,
            color: style
                .color
                .unwrap_or_else(|| palette::TEXT_DARK.to_string()),
            bold: style.bold.unwrap_or(false),
            align: style.align.unwrap_or_default(),
            font_size: style.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        }
    }
}

/// A draw-ready table. All lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTable {
    /// Placeholder the table was bound to.
    pub placeholder: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub col_widths: Vec<f64>,
    pub border: TableBorder,
    pub rows: Vec<Vec<ResolvedCell>>,
}

impl ResolvedTable {
    /// Height of each row: the frame height split evenly.
    pub fn row_height(&self) -> f64 {
        if self.rows.is_empty() {
            0.0
        } else {
            self.h / self.rows.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> PlaceholderDescriptor {
        PlaceholderDescriptor::new("table1", 10.0, 20.0, 300.0, 150.0)
    }

    #[test]
    fn test_resolve_uses_placeholder_geometry() {
        let binding = TableBinding::new("table1", vec![vec!["a".into(), "b".into()]]);
        let table = binding.resolve(&frame());
        assert_eq!((table.x, table.y, table.w, table.h), (10.0, 20.0, 300.0, 150.0));
    }

    #[test]
    fn test_column_weights_scale_to_width() {
        let binding = TableBinding::new("table1", vec![vec!["a".into(), "b".into()]])
            .with_col_widths(vec![1.0, 2.0]);
        let table = binding.resolve(&frame());
        assert_eq!(table.col_widths, vec![100.0, 200.0]);
    }

    #[test]
    fn test_mismatched_weights_fall_back_to_equal_columns() {
        let binding = TableBinding::new("table1", vec![vec!["a".into(), "b".into(), "c".into()]])
            .with_col_widths(vec![1.0, 2.0]);
        let table = binding.resolve(&frame());
        assert_eq!(table.col_widths, vec![100.0, 100.0, 100.0]);
    }

    #[test]
    fn test_presets_style_cells() {
        let binding = TableBinding::new(
            "table1",
            vec![
                vec![CellSpec::header("구분"), CellSpec::header("범위")],
                vec![CellSpec::label("재고 관리"), "실시간 추적".into()],
            ],
        );
        let table = binding.resolve(&frame());

        let header = &table.rows[0][0];
        assert_eq!(header.fill.as_deref(), Some(palette::DEEP_GREEN));
        assert_eq!(header.color, palette::WHITE);
        assert!(header.bold);

        let label = &table.rows[1][0];
        assert_eq!(label.fill.as_deref(), Some(palette::PALE_GREEN));
        assert_eq!(label.color, palette::DARK_GREEN);
        assert!(label.bold);

        let plain = &table.rows[1][1];
        assert_eq!(plain.fill, None);
        assert_eq!(plain.color, palette::TEXT_DARK);
        assert!(!plain.bold);
        assert_eq!(plain.font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_explicit_attributes_override_preset() {
        let cell: CellSpec =
            serde_json::from_str(r#"{"text": "상", "preset": "label", "color": "C0392B"}"#).unwrap();
        let style = cell.style();
        assert_eq!(style.fill.as_deref(), Some(palette::PALE_GREEN));
        assert_eq!(style.color.as_deref(), Some("C0392B"));
    }

    #[test]
    fn test_table_align_applies_unless_cell_overrides() {
        let mut binding = TableBinding::new(
            "table1",
            vec![vec![
                "a".into(),
                serde_json::from_str(r#"{"text": "b", "align": "right"}"#).unwrap(),
            ]],
        );
        binding.align = Some(Align::Center);
        let table = binding.resolve(&frame());
        assert_eq!(table.rows[0][0].align, Align::Center);
        assert_eq!(table.rows[0][1].align, Align::Right);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let binding = TableBinding::new(
            "table1",
            vec![vec!["a".into(), "b".into()], vec!["c".into()]],
        );
        let table = binding.resolve(&frame());
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.rows[1][1].text, "");
        assert_eq!(table.row_height(), 75.0);
    }

    #[test]
    fn test_cells_deserialize_from_strings_and_objects() {
        let row: Vec<CellSpec> =
            serde_json::from_str(r#"["plain", {"text": "head", "preset": "header"}]"#).unwrap();
        assert_eq!(row[0], CellSpec::Text("plain".to_string()));
        assert_eq!(row[1], CellSpec::header("head"));
    }

    #[test]
    fn test_validate_rejects_empty_tables() {
        assert!(TableBinding::new("table1", vec![]).validate().is_err());
        assert!(TableBinding::new("table1", vec![vec![]]).validate().is_err());
        assert!(TableBinding::new(" ", vec![vec!["a".into()]]).validate().is_err());
        assert!(TableBinding::new("table1", vec![vec!["a".into()]]).validate().is_ok());
    }
}
