//! Reads a written `.pptx` package back into a summary.
//!
//! Used to report what a build produced and to check packages in tests.
//! Only the parts this crate writes are understood: text boxes and tables.

use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Summary of one package, slides in presentation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageSummary {
    pub slides: Vec<SlideSummary>,
}

impl PackageSummary {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Total tables across all slides.
    pub fn table_count(&self) -> usize {
        self.slides.iter().map(|s| s.tables.len()).sum()
    }
}

/// One slide part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSummary {
    /// Part name inside the archive, e.g. `ppt/slides/slide1.xml`.
    pub path: String,
    /// Text of each text shape; paragraphs separated by `\n`.
    pub texts: Vec<String>,
    pub tables: Vec<TableSummary>,
}

/// A table graphic frame. Geometry is in EMU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSummary {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
    /// Widths of the grid columns.
    pub grid_cols: Vec<i64>,
    /// Cell text, row by row.
    pub rows: Vec<Vec<String>>,
}

/// Reader for packages produced by [`PptxWriter`](crate::PptxWriter).
pub struct PackageInspector;

impl PackageInspector {
    pub fn new() -> Self {
        Self
    }

    /// Summarize the package at `path`.
    pub fn inspect_file(&self, path: &Path) -> Result<PackageSummary> {
        let file = File::open(path)?;
        self.inspect(BufReader::new(file))
    }

    /// Summarize a package from a reader.
    pub fn inspect<R: Read + Seek>(&self, reader: R) -> Result<PackageSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut summary = PackageSummary::default();
        for path in self.slide_order(&mut archive)? {
            let xml = read_part(&mut archive, &path)?;
            let mut slide = summarize_slide(&xml)?;
            slide.path = path;
            summary.slides.push(slide);
        }

        Ok(summary)
    }

    /// Slide part names from the presentation relationships, by slide number.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = read_part(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let rel_type = attr_string(e, b"Type").unwrap_or_default();
                    let target = attr_string(e, b"Target").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order = extract_slide_number(&target);
                        let path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((path, order));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }
}

impl Default for PackageInspector {
    fn default() -> Self {
        Self::new()
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Walk one slide's XML, collecting text shapes and tables.
fn summarize_slide(xml: &str) -> Result<SlideSummary> {
    let mut slide = SlideSummary::default();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut shape_text: Option<String> = None;
    let mut table: Option<TableSummary> = None;
    let mut cell_text: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => shape_text = Some(String::new()),
                b"graphicFrame" => table = Some(TableSummary::default()),
                b"tr" => {
                    if let Some(t) = table.as_mut() {
                        t.rows.push(Vec::new());
                    }
                }
                b"tc" => cell_text = Some(String::new()),
                b"p" => {
                    // New paragraph inside the current text container
                    let buffer = cell_text.as_mut().or(shape_text.as_mut());
                    if let Some(text) = buffer.filter(|t| !t.is_empty()) {
                        text.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if let Some(t) = table.as_mut() {
                    match local_name(e.name().as_ref()) {
                        b"off" => {
                            t.x = attr_i64(e, b"x").unwrap_or_default();
                            t.y = attr_i64(e, b"y").unwrap_or_default();
                        }
                        b"ext" => {
                            t.cx = attr_i64(e, b"cx").unwrap_or_default();
                            t.cy = attr_i64(e, b"cy").unwrap_or_default();
                        }
                        b"gridCol" => t.grid_cols.push(attr_i64(e, b"w").unwrap_or_default()),
                        _ => {}
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::XmlError(format!("Bad text in slide: {}", e)))?;
                if let Some(buffer) = cell_text.as_mut().or(shape_text.as_mut()) {
                    buffer.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(text) = shape_text.take() {
                        let text = text.trim_end_matches('\n').to_string();
                        if !text.is_empty() {
                            slide.texts.push(text);
                        }
                    }
                }
                b"tc" => {
                    let text = cell_text.take().unwrap_or_default();
                    if let Some(row) = table.as_mut().and_then(|t| t.rows.last_mut()) {
                        row.push(text.trim_end_matches('\n').to_string());
                    }
                }
                b"graphicFrame" => {
                    if let Some(t) = table.take() {
                        slide.tables.push(t);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error parsing slide: {}", e))),
            _ => {}
        }
    }

    Ok(slide)
}

fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn attr_i64(e: &BytesStart, key: &[u8]) -> Option<i64> {
    attr_string(e, key)?.parse().ok()
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Extract a slide number from a part name like "slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");
    let stem = s.trim_end_matches(|c: char| c.is_ascii_digit());
    s[stem.len()..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentProperties, Frame, Presentation, TextBox, TextStyle};
    use crate::writer::PptxWriter;
    use deck_core::{CellSpec, PlaceholderDescriptor, TableBinding, TableCanvas};
    use std::io::Cursor;

    fn package() -> Vec<u8> {
        let mut pres = Presentation::new(DocumentProperties::default());
        for n in 1..=11 {
            let handle = pres.add_slide();
            let slide = pres.slide_mut(handle).unwrap();
            slide.add_text(TextBox {
                frame: Frame::new(35.0, 18.0, 500.0, 20.0),
                text: format!("슬라이드 {}\n둘째 줄", n),
                style: TextStyle::default(),
                fill: None,
            });
            if n == 3 {
                let binding = TableBinding::new(
                    "table1",
                    vec![
                        vec![CellSpec::header("구분"), CellSpec::header("내용")],
                        vec!["A & B".into(), "<1>".into()],
                    ],
                );
                let frame = PlaceholderDescriptor::new("table1", 10.0, 20.0, 300.0, 150.0);
                slide.draw_table(binding.resolve(&frame));
            }
        }
        PptxWriter::new()
            .write(&pres, Cursor::new(Vec::new()))
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_inspect_orders_slides_numerically() {
        let summary = PackageInspector::new().inspect(Cursor::new(package())).unwrap();
        assert_eq!(summary.slide_count(), 11);
        assert_eq!(summary.slides[1].path, "ppt/slides/slide2.xml");
        assert_eq!(summary.slides[9].path, "ppt/slides/slide10.xml");
        assert_eq!(summary.slides[9].texts, vec!["슬라이드 10\n둘째 줄"]);
    }

    #[test]
    fn test_inspect_reads_table_frame() {
        let summary = PackageInspector::new().inspect(Cursor::new(package())).unwrap();
        assert_eq!(summary.table_count(), 1);

        let table = &summary.slides[2].tables[0];
        assert_eq!((table.x, table.y), (127_000, 254_000));
        assert_eq!((table.cx, table.cy), (3_810_000, 1_905_000));
        assert_eq!(table.grid_cols.iter().sum::<i64>(), 3_810_000);
        assert_eq!(
            table.rows,
            vec![
                vec!["구분".to_string(), "내용".to_string()],
                vec!["A & B".to_string(), "<1>".to_string()],
            ]
        );
    }

    #[test]
    fn test_inspect_rejects_non_zip() {
        let result = PackageInspector::new().inspect(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(result, Err(Error::ZipError(_))));
    }

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("slides/slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("slides/slide15.xml"), Some(15));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("nodigits"), None);
        assert_eq!(extract_slide_number("slides/슬라이드7.xml"), Some(7));
        assert_eq!(extract_slide_number("slides/슬라이드.xml"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:graphicFrame"), b"graphicFrame");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }
}
