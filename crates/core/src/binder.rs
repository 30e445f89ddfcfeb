//! Table injection: binds literal table data to converted placeholders.

use crate::placeholder::PlaceholderMap;
use crate::table::{ResolvedTable, TableBinding};

/// Something a resolved table can be drawn onto, typically a converted slide.
pub trait TableCanvas {
    /// Draw `table` at its own frame. Implementations must not move or
    /// resize it.
    fn draw_table(&mut self, table: ResolvedTable);
}

/// What happened to the table bindings of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Placeholder ids a table was drawn at, in binding order.
    pub drawn: Vec<String>,
    /// Placeholder ids that were not found on the slide.
    pub skipped: Vec<String>,
}

impl BindReport {
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Draw every binding whose placeholder exists on the slide.
///
/// A binding whose placeholder is missing is skipped; that is not an error.
/// Drawn tables take the placeholder's geometry exactly.
pub fn bind_tables<C: TableCanvas + ?Sized>(
    canvas: &mut C,
    bindings: &[TableBinding],
    placeholders: &PlaceholderMap,
) -> BindReport {
    let mut report = BindReport::default();

    for binding in bindings {
        match placeholders.get(&binding.placeholder) {
            Some(frame) => {
                canvas.draw_table(binding.resolve(frame));
                report.drawn.push(binding.placeholder.clone());
            }
            None => {
                log::debug!(
                    "Placeholder '{}' not found; table skipped",
                    binding.placeholder
                );
                report.skipped.push(binding.placeholder.clone());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellSpec;
    use crate::types::PlaceholderDescriptor;

    #[derive(Default)]
    struct RecordingCanvas {
        tables: Vec<ResolvedTable>,
    }

    impl TableCanvas for RecordingCanvas {
        fn draw_table(&mut self, table: ResolvedTable) {
            self.tables.push(table);
        }
    }

    fn binding(id: &str) -> TableBinding {
        TableBinding::new(
            id,
            vec![
                vec![CellSpec::header("구분"), CellSpec::header("비고")],
                vec!["회계 시스템".into(), "인터페이스만 개발".into()],
            ],
        )
    }

    #[test]
    fn test_table_drawn_at_exact_placeholder_geometry() {
        let map = PlaceholderMap::from_descriptors(vec![PlaceholderDescriptor::new(
            "table1", 10.0, 20.0, 300.0, 150.0,
        )]);
        let mut canvas = RecordingCanvas::default();

        let report = bind_tables(&mut canvas, &[binding("table1")], &map);

        assert_eq!(report.drawn, vec!["table1"]);
        assert!(report.skipped.is_empty());
        assert_eq!(canvas.tables.len(), 1);
        let t = &canvas.tables[0];
        assert_eq!((t.x, t.y, t.w, t.h), (10.0, 20.0, 300.0, 150.0));
    }

    #[test]
    fn test_missing_placeholder_is_skipped() {
        let map = PlaceholderMap::from_descriptors(vec![PlaceholderDescriptor::new(
            "table1", 10.0, 20.0, 300.0, 150.0,
        )]);
        let mut canvas = RecordingCanvas::default();

        let report = bind_tables(&mut canvas, &[binding("table2")], &map);

        assert!(canvas.tables.is_empty());
        assert_eq!(report.skipped, vec!["table2"]);
        assert_eq!(report.drawn_count(), 0);
    }

    #[test]
    fn test_partial_placeholders() {
        let map = PlaceholderMap::from_descriptors(vec![PlaceholderDescriptor::new(
            "table2", 380.0, 200.0, 295.0, 95.0,
        )]);
        let mut canvas = RecordingCanvas::default();

        let report = bind_tables(&mut canvas, &[binding("table1"), binding("table2")], &map);

        assert_eq!(report.drawn, vec!["table2"]);
        assert_eq!(report.skipped, vec!["table1"]);
        assert_eq!(canvas.tables[0].x, 380.0);
    }

    #[test]
    fn test_empty_placeholder_list_skips_everything() {
        let map = PlaceholderMap::default();
        let mut canvas = RecordingCanvas::default();

        let report = bind_tables(&mut canvas, &[binding("table1")], &map);

        assert!(canvas.tables.is_empty());
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn test_extra_placeholders_are_ignored() {
        let map = PlaceholderMap::from_descriptors(vec![
            PlaceholderDescriptor::new("table1", 0.0, 0.0, 100.0, 50.0),
            PlaceholderDescriptor::new("chart9", 0.0, 60.0, 100.0, 50.0),
        ]);
        let mut canvas = RecordingCanvas::default();

        let report = bind_tables(&mut canvas, &[binding("table1")], &map);

        assert_eq!(canvas.tables.len(), 1);
        assert_eq!(report.drawn_count(), 1);
    }
}
