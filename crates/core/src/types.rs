//! Domain types for slide records and placeholder geometry.

use crate::placeholder::scan_placeholder_tags;
use crate::table::TableBinding;
use serde::{Deserialize, Serialize};

/// The static definition of one output slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// CSS specific to this slide, composed after the shared base stylesheet.
    #[serde(default)]
    pub styles: String,

    /// HTML fragment for the slide's visible content.
    pub body: String,

    /// Tables to inject after conversion. Empty when the slide has none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableBinding>,
}

impl SlideRecord {
    /// Create a slide record without tables.
    pub fn new(styles: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            styles: styles.into(),
            body: body.into(),
            tables: Vec::new(),
        }
    }

    /// Add a table binding to this record.
    pub fn with_table(mut self, table: TableBinding) -> Self {
        self.tables.push(table);
        self
    }

    /// Whether this slide declares any table injection.
    pub fn has_tables(&self) -> bool {
        !self.tables.is_empty()
    }

    /// Ids of the placeholder elements declared in the body, in document order.
    pub fn placeholder_ids(&self) -> Vec<String> {
        scan_placeholder_tags(&self.body)
            .into_iter()
            .map(|tag| tag.id)
            .collect()
    }

    /// Table bindings whose placeholder id is not declared in the body.
    pub fn unbound_tables(&self) -> Vec<&TableBinding> {
        let declared = self.placeholder_ids();
        self.tables
            .iter()
            .filter(|t| !declared.iter().any(|id| *id == t.placeholder))
            .collect()
    }
}

/// One insertion point discovered on a converted slide.
///
/// Geometry is absolute on the slide canvas, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderDescriptor {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PlaceholderDescriptor {
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellSpec;

    #[test]
    fn test_placeholder_ids_from_body() {
        let record = SlideRecord::new(
            "",
            r#"<div class="col"><div id="table1" class="placeholder" style="width: 295pt;"></div></div>
<div id="table2" class="placeholder"></div>"#,
        );
        assert_eq!(record.placeholder_ids(), vec!["table1", "table2"]);
    }

    #[test]
    fn test_unbound_tables() {
        let record = SlideRecord::new("", r#"<div id="table1" class="placeholder"></div>"#)
            .with_table(crate::table::TableBinding::new(
                "table2",
                vec![vec![CellSpec::from("x")]],
            ));
        assert!(record.has_tables());
        let unbound = record.unbound_tables();
        assert_eq!(unbound.len(), 1);
        assert_eq!(unbound[0].placeholder, "table2");
    }

    #[test]
    fn test_record_without_tables() {
        let record: SlideRecord = serde_json::from_str(r#"{"body": "<h1>감사합니다</h1>"}"#).unwrap();
        assert!(!record.has_tables());
        assert_eq!(record.styles, "");
    }
}
