//! PPTX package writer.
//!
//! Serializes a [`Presentation`] into an Office Open XML package: a ZIP
//! archive of XML parts. Output is deterministic: no timestamps are written
//! into the parts or the archive entries.

use crate::document::{pt_to_emu, Frame, Presentation, RectShape, Shape, Slide, TextBox, TextStyle};
use crate::template::*;
use deck_core::{Align, Error, ResolvedCell, ResolvedTable, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// East Asian typeface for Korean text runs.
const EA_TYPEFACE: &str = "Malgun Gothic";
const LATIN_TYPEFACE: &str = "Arial";

/// Cell insets in EMU (0.05in left/right, 0.025in top/bottom).
const CELL_MARGIN_X: i64 = 45_720;
const CELL_MARGIN_Y: i64 = 22_860;

/// Writes presentations as `.pptx` packages.
#[derive(Debug, Clone, Default)]
pub struct PptxWriter;

impl PptxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the complete package into `sink`.
    pub fn write<W: Write + Seek>(&self, pres: &Presentation, sink: W) -> Result<W> {
        let mut zip = ZipWriter::new(sink);
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let mut put = |name: &str, data: &[u8]| -> Result<()> {
            zip.start_file(name, options)
                .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", name, e)))?;
            zip.write_all(data)
                .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))
        };

        put("[Content_Types].xml", &content_types_xml(pres.slide_count())?)?;
        put("_rels/.rels", &root_rels_xml()?)?;
        put("docProps/core.xml", &core_props_xml(pres)?)?;
        put("docProps/app.xml", &app_props_xml(pres)?)?;
        put("ppt/presentation.xml", &presentation_xml(pres)?)?;
        put("ppt/_rels/presentation.xml.rels", &presentation_rels_xml(pres.slide_count())?)?;
        put("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML.as_bytes())?;
        put("ppt/slideMasters/_rels/slideMaster1.xml.rels", SLIDE_MASTER_RELS.as_bytes())?;
        put("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT_XML.as_bytes())?;
        put("ppt/slideLayouts/_rels/slideLayout1.xml.rels", SLIDE_LAYOUT_RELS.as_bytes())?;
        put("ppt/theme/theme1.xml", THEME_XML.as_bytes())?;

        for (i, slide) in pres.slides().iter().enumerate() {
            let number = i + 1;
            put(&format!("ppt/slides/slide{}.xml", number), &slide_xml(slide)?)?;
            put(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                SLIDE_RELS.as_bytes(),
            )?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    /// Write the package to `path`, creating parent directories.
    pub fn save(&self, pres: &Presentation, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::SerializationError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let file = File::create(path).map_err(|e| {
            Error::SerializationError(format!("Failed to create {}: {}", path.display(), e))
        })?;

        let mut out = self.write(pres, BufWriter::new(file))?;
        out.flush().map_err(|e| {
            Error::SerializationError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}

impl Presentation {
    /// Serialize this presentation to a `.pptx` file.
    pub fn save(&self, path: &Path) -> Result<()> {
        PptxWriter::new().save(self, path)
    }
}

/// Thin event writer that maps quick-xml errors into ours.
struct XmlOut {
    inner: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Result<Self> {
        let mut inner = Writer::new(Vec::with_capacity(4096));
        inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_error)?;
        Ok(Self { inner })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Start(elem)).map_err(xml_error)
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.inner
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Empty(elem)).map_err(xml_error)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.inner
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)
    }

    /// `<name>text</name>`
    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.text(text)?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

fn xml_error(e: quick_xml::Error) -> Error {
    Error::XmlError(e.to_string())
}

fn content_types_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut x = XmlOut::new()?;
    x.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    x.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    x.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;

    let mut overrides: Vec<(String, &str)> = vec![
        ("/ppt/presentation.xml".to_string(), CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml".to_string(), CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml".to_string(), CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml".to_string(), CT_THEME),
        ("/docProps/core.xml".to_string(), CT_CORE),
        ("/docProps/app.xml".to_string(), CT_APP),
    ];
    for n in 1..=slide_count {
        overrides.push((format!("/ppt/slides/slide{}.xml", n), CT_SLIDE));
    }
    for (part, content_type) in &overrides {
        x.empty("Override", &[("PartName", part.as_str()), ("ContentType", *content_type)])?;
    }

    x.end("Types")?;
    Ok(x.finish())
}

fn relationships_xml(rels: &[(String, &str, String)]) -> Result<Vec<u8>> {
    let mut x = XmlOut::new()?;
    x.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    for (id, rel_type, target) in rels {
        x.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *rel_type), ("Target", target.as_str())],
        )?;
    }
    x.end("Relationships")?;
    Ok(x.finish())
}

fn root_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        ("rId1".to_string(), REL_OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
        ("rId2".to_string(), REL_CORE_PROPERTIES, "docProps/core.xml".to_string()),
        ("rId3".to_string(), REL_EXTENDED_PROPERTIES, "docProps/app.xml".to_string()),
    ])
}

/// Relationship ids: master is rId1, slides rId2.., theme last.
fn presentation_rels_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![(
        "rId1".to_string(),
        REL_SLIDE_MASTER,
        "slideMasters/slideMaster1.xml".to_string(),
    )];
    for n in 1..=slide_count {
        rels.push((
            format!("rId{}", n + 1),
            REL_SLIDE,
            format!("slides/slide{}.xml", n),
        ));
    }
    rels.push((
        format!("rId{}", slide_count + 2),
        REL_THEME,
        "theme/theme1.xml".to_string(),
    ));
    relationships_xml(&rels)
}

fn presentation_xml(pres: &Presentation) -> Result<Vec<u8>> {
    let canvas = pres.canvas();
    let mut x = XmlOut::new()?;
    x.start(
        "p:presentation",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;

    x.start("p:sldMasterIdLst", &[])?;
    x.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    x.end("p:sldMasterIdLst")?;

    if pres.slide_count() > 0 {
        x.start("p:sldIdLst", &[])?;
        for n in 1..=pres.slide_count() {
            // Slide ids start at 256
            let id = (255 + n).to_string();
            let rel = format!("rId{}", n + 1);
            x.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel.as_str())])?;
        }
        x.end("p:sldIdLst")?;
    }

    let cx = pt_to_emu(canvas.width_pt).to_string();
    let cy = pt_to_emu(canvas.height_pt).to_string();
    x.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    x.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;

    x.end("p:presentation")?;
    Ok(x.finish())
}

fn core_props_xml(pres: &Presentation) -> Result<Vec<u8>> {
    let props = pres.properties();
    let mut x = XmlOut::new()?;
    x.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    x.text_element("dc:title", &props.title)?;
    x.text_element("dc:subject", &props.subject)?;
    x.text_element("dc:creator", &props.author)?;
    x.text_element("cp:lastModifiedBy", &props.author)?;
    x.text_element("cp:revision", "1")?;
    x.end("cp:coreProperties")?;
    Ok(x.finish())
}

fn app_props_xml(pres: &Presentation) -> Result<Vec<u8>> {
    let mut x = XmlOut::new()?;
    x.start(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    x.text_element("Application", env!("CARGO_PKG_NAME"))?;
    x.text_element("Slides", &pres.slide_count().to_string())?;
    x.text_element("Company", &pres.properties().company)?;
    x.end("Properties")?;
    Ok(x.finish())
}

fn slide_xml(slide: &Slide) -> Result<Vec<u8>> {
    let mut x = XmlOut::new()?;
    x.start("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    x.start("p:cSld", &[])?;

    if let Some(color) = &slide.background {
        x.start("p:bg", &[])?;
        x.start("p:bgPr", &[])?;
        solid_fill(&mut x, color)?;
        x.empty("a:effectLst", &[])?;
        x.end("p:bgPr")?;
        x.end("p:bg")?;
    }

    x.start("p:spTree", &[])?;
    x.start("p:nvGrpSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    x.empty("p:cNvGrpSpPr", &[])?;
    x.empty("p:nvPr", &[])?;
    x.end("p:nvGrpSpPr")?;
    x.start("p:grpSpPr", &[])?;
    x.start("a:xfrm", &[])?;
    x.empty("a:off", &[("x", "0"), ("y", "0")])?;
    x.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    x.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    x.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    x.end("a:xfrm")?;
    x.end("p:grpSpPr")?;

    // Id 1 is the group itself
    for (i, shape) in slide.shapes.iter().enumerate() {
        let id = (i + 2).to_string();
        match shape {
            Shape::Text(text_box) => write_text_box(&mut x, &id, text_box)?,
            Shape::Rect(rect) => write_rect(&mut x, &id, rect)?,
            Shape::Table(table) => write_table(&mut x, &id, table)?,
        }
    }

    x.end("p:spTree")?;
    x.end("p:cSld")?;
    x.start("p:clrMapOvr", &[])?;
    x.empty("a:masterClrMapping", &[])?;
    x.end("p:clrMapOvr")?;
    x.end("p:sld")?;
    Ok(x.finish())
}

fn solid_fill(x: &mut XmlOut, color: &str) -> Result<()> {
    x.start("a:solidFill", &[])?;
    x.empty("a:srgbClr", &[("val", color)])?;
    x.end("a:solidFill")
}

fn line(x: &mut XmlOut, tag: &str, width_pt: f64, color: &str) -> Result<()> {
    let w = pt_to_emu(width_pt).to_string();
    x.start(tag, &[("w", w.as_str())])?;
    solid_fill(x, color)?;
    x.end(tag)
}

fn xfrm(x: &mut XmlOut, tag: &str, frame: &Frame) -> Result<()> {
    let (px, py) = (pt_to_emu(frame.x).to_string(), pt_to_emu(frame.y).to_string());
    let (cx, cy) = (pt_to_emu(frame.w).to_string(), pt_to_emu(frame.h).to_string());
    x.start(tag, &[])?;
    x.empty("a:off", &[("x", px.as_str()), ("y", py.as_str())])?;
    x.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    x.end(tag)
}

fn align_attr(align: Align) -> &'static str {
    match align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    }
}

fn shape_props(x: &mut XmlOut, frame: &Frame, fill: Option<&str>, outline: Option<&str>) -> Result<()> {
    x.start("p:spPr", &[])?;
    xfrm(x, "a:xfrm", frame)?;
    x.start("a:prstGeom", &[("prst", "rect")])?;
    x.empty("a:avLst", &[])?;
    x.end("a:prstGeom")?;
    match fill {
        Some(color) => solid_fill(x, color)?,
        None => x.empty("a:noFill", &[])?,
    }
    match outline {
        Some(color) => line(x, "a:ln", 1.0, color)?,
        None => {
            x.start("a:ln", &[])?;
            x.empty("a:noFill", &[])?;
            x.end("a:ln")?;
        }
    }
    x.end("p:spPr")
}

/// Paragraphs of one text body; each line of `text` is a paragraph.
fn paragraphs(x: &mut XmlOut, text: &str, style: &TextStyle) -> Result<()> {
    let size = ((style.font_size * 100.0).round() as i64).to_string();
    let bold = if style.bold { "1" } else { "0" };

    for line in text.split('\n') {
        x.start("a:p", &[])?;
        x.empty("a:pPr", &[("algn", align_attr(style.align))])?;
        if line.is_empty() {
            x.empty("a:endParaRPr", &[("lang", "ko-KR"), ("sz", size.as_str())])?;
        } else {
            x.start("a:r", &[])?;
            x.start(
                "a:rPr",
                &[("lang", "ko-KR"), ("sz", size.as_str()), ("b", bold), ("dirty", "0")],
            )?;
            solid_fill(x, &style.color)?;
            x.empty("a:latin", &[("typeface", LATIN_TYPEFACE)])?;
            x.empty("a:ea", &[("typeface", EA_TYPEFACE)])?;
            x.end("a:rPr")?;
            x.text_element("a:t", line)?;
            x.end("a:r")?;
        }
        x.end("a:p")?;
    }
    Ok(())
}

fn write_text_box(x: &mut XmlOut, id: &str, text_box: &TextBox) -> Result<()> {
    let name = format!("TextBox {}", id);
    x.start("p:sp", &[])?;
    x.start("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", id), ("name", name.as_str())])?;
    x.empty("p:cNvSpPr", &[("txBox", "1")])?;
    x.empty("p:nvPr", &[])?;
    x.end("p:nvSpPr")?;

    shape_props(x, &text_box.frame, text_box.fill.as_deref(), None)?;

    x.start("p:txBody", &[])?;
    x.empty(
        "a:bodyPr",
        &[
            ("wrap", "square"),
            ("lIns", "0"),
            ("tIns", "0"),
            ("rIns", "0"),
            ("bIns", "0"),
            ("rtlCol", "0"),
            ("anchor", "t"),
        ],
    )?;
    x.empty("a:lstStyle", &[])?;
    paragraphs(x, &text_box.text, &text_box.style)?;
    x.end("p:txBody")?;
    x.end("p:sp")
}

fn write_rect(x: &mut XmlOut, id: &str, rect: &RectShape) -> Result<()> {
    let name = format!("Rectangle {}", id);
    x.start("p:sp", &[])?;
    x.start("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", id), ("name", name.as_str())])?;
    x.empty("p:cNvSpPr", &[])?;
    x.empty("p:nvPr", &[])?;
    x.end("p:nvSpPr")?;
    shape_props(x, &rect.frame, rect.fill.as_deref(), rect.line.as_deref())?;
    x.end("p:sp")
}

/// Split `total` EMU over weights so the parts sum exactly to `total`.
fn distribute_emu(total: i64, parts_pt: &[f64]) -> Vec<i64> {
    let mut out: Vec<i64> = parts_pt.iter().map(|pt| pt_to_emu(*pt)).collect();
    if let Some(last) = out.len().checked_sub(1) {
        let head: i64 = out[..last].iter().sum();
        out[last] = total - head;
    }
    out
}

fn write_table(x: &mut XmlOut, id: &str, table: &ResolvedTable) -> Result<()> {
    let frame = Frame::new(table.x, table.y, table.w, table.h);
    let name = format!("Table {}", id);

    x.start("p:graphicFrame", &[])?;
    x.start("p:nvGraphicFramePr", &[])?;
    x.empty("p:cNvPr", &[("id", id), ("name", name.as_str())])?;
    x.start("p:cNvGraphicFramePr", &[])?;
    x.empty("a:graphicFrameLocks", &[("noGrp", "1")])?;
    x.end("p:cNvGraphicFramePr")?;
    x.empty("p:nvPr", &[])?;
    x.end("p:nvGraphicFramePr")?;
    xfrm(x, "p:xfrm", &frame)?;

    x.start("a:graphic", &[])?;
    x.start("a:graphicData", &[("uri", TABLE_URI)])?;
    x.start("a:tbl", &[])?;
    x.empty("a:tblPr", &[])?;

    x.start("a:tblGrid", &[])?;
    for width in distribute_emu(pt_to_emu(table.w), &table.col_widths) {
        x.empty("a:gridCol", &[("w", width.to_string().as_str())])?;
    }
    x.end("a:tblGrid")?;

    let row_heights = distribute_emu(pt_to_emu(table.h), &vec![table.row_height(); table.rows.len()]);
    for (row, height) in table.rows.iter().zip(row_heights) {
        x.start("a:tr", &[("h", height.to_string().as_str())])?;
        for cell in row {
            write_cell(x, cell, table)?;
        }
        x.end("a:tr")?;
    }

    x.end("a:tbl")?;
    x.end("a:graphicData")?;
    x.end("a:graphic")?;
    x.end("p:graphicFrame")
}

fn write_cell(x: &mut XmlOut, cell: &ResolvedCell, table: &ResolvedTable) -> Result<()> {
    let style = TextStyle {
        font_size: cell.font_size,
        color: cell.color.clone(),
        bold: cell.bold,
        align: cell.align,
    };
    let (mar_x, mar_y) = (CELL_MARGIN_X.to_string(), CELL_MARGIN_Y.to_string());

    x.start("a:tc", &[])?;
    x.start("a:txBody", &[])?;
    x.empty("a:bodyPr", &[])?;
    x.empty("a:lstStyle", &[])?;
    paragraphs(x, &cell.text, &style)?;
    x.end("a:txBody")?;

    x.start(
        "a:tcPr",
        &[
            ("marL", mar_x.as_str()),
            ("marR", mar_x.as_str()),
            ("marT", mar_y.as_str()),
            ("marB", mar_y.as_str()),
            ("anchor", "ctr"),
        ],
    )?;
    for tag in ["a:lnL", "a:lnR", "a:lnT", "a:lnB"] {
        line(x, tag, table.border.pt, &table.border.color)?;
    }
    match &cell.fill {
        Some(color) => solid_fill(x, color)?,
        None => x.empty("a:noFill", &[])?,
    }
    x.end("a:tcPr")?;
    x.end("a:tc")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentProperties;
    use deck_core::{CellSpec, PlaceholderDescriptor, TableBinding, TableCanvas};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn sample() -> Presentation {
        let mut pres = Presentation::new(DocumentProperties {
            title: "스마트 물류 <계획>".to_string(),
            author: "(주)테크솔루션".to_string(),
            company: "(주)테크솔루션".to_string(),
            subject: "수행계획서".to_string(),
        });
        let first = pres.add_slide();
        pres.slide_mut(first).unwrap().add_text(TextBox {
            frame: Frame::new(35.0, 20.0, 650.0, 30.0),
            text: "1. 프로젝트 개요\nR&R".to_string(),
            style: TextStyle::default(),
            fill: None,
        });

        let second = pres.add_slide();
        let binding = TableBinding::new(
            "table1",
            vec![
                vec![CellSpec::header("구분"), CellSpec::header("범위")],
                vec!["재고 관리".into(), "".into()],
            ],
        )
        .with_col_widths(vec![1.5, 1.6]);
        let frame = PlaceholderDescriptor::new("table1", 10.0, 20.0, 300.0, 150.0);
        pres.slide_mut(second)
            .unwrap()
            .draw_table(binding.resolve(&frame));
        pres
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn write_bytes(pres: &Presentation) -> Vec<u8> {
        PptxWriter::new()
            .write(pres, Cursor::new(Vec::new()))
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_package_parts_present() {
        let bytes = write_bytes(&sample());
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
            "ppt/theme/theme1.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn test_presentation_lists_slides_and_size() {
        let bytes = write_bytes(&sample());
        let xml = read_part(&bytes, "ppt/presentation.xml");
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));

        let rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId4""#));
        assert!(rels.contains("theme/theme1.xml"));
    }

    #[test]
    fn test_table_geometry_in_emu() {
        let bytes = write_bytes(&sample());
        let xml = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(xml.contains("<p:graphicFrame>"));
        assert!(xml.contains(r#"<a:off x="127000" y="254000"/>"#));
        assert!(xml.contains(r#"<a:ext cx="3810000" cy="1905000"/>"#));
        // 300pt split 1.5 : 1.6
        assert!(xml.contains(r#"<a:gridCol w="1843548"/>"#));
        assert!(xml.contains(r#"<a:gridCol w="1966452"/>"#));
        assert!(xml.contains(r#"<a:srgbClr val="22523B"/>"#));
    }

    #[test]
    fn test_text_is_escaped_and_split_into_paragraphs() {
        let bytes = write_bytes(&sample());
        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("<a:t>1. 프로젝트 개요</a:t>"));
        assert!(slide.contains("<a:t>R&amp;R</a:t>"));

        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>스마트 물류 &lt;계획&gt;</dc:title>"));
        assert!(core.contains("<dc:creator>(주)테크솔루션</dc:creator>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(write_bytes(&sample()), write_bytes(&sample()));
    }

    #[test]
    fn test_distribute_emu_sums_exactly() {
        let parts = distribute_emu(1_000_000, &[33.3, 33.3, 33.3]);
        assert_eq!(parts.iter().sum::<i64>(), 1_000_000);
        assert!(distribute_emu(10, &[]).is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("deck.pptx");
        sample().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_failure_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("output");
        fs::write(&blocker, "file, not dir").unwrap();

        let err = sample().save(&blocker.join("deck.pptx")).unwrap_err();
        assert!(matches!(err, Error::SerializationError(_)));
    }
}
