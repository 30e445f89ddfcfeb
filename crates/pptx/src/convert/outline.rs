//! Built-in converter that keeps a slide's text but not its layout.
//!
//! Headings, paragraphs, list items and table placeholders are stacked top
//! to bottom in document order. Each placeholder gets a slot in that flow
//! sized from its inline `width`/`height`; a placeholder whose inline style
//! gives absolute `left`, `top`, `width` and `height` keeps that geometry
//! instead. When the flow is taller than the slide, everything is scaled
//! down together, to a floor; text that still does not fit is dropped, and
//! placeholders are pulled back inside the canvas.

use super::{ConvertedSlide, SlideConverter};
use crate::document::{Frame, Presentation, Slide, TextBox, TextStyle};
use deck_core::{scan_placeholder_tags, Canvas, Error, PlaceholderDescriptor, PlaceholderTag, Result};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Regex matching a text block and capturing its tag and inner markup.
static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(h[1-3]|p|li)\b[^>]*>(.*?)</(?:h[1-3]|p|li)\s*>").unwrap()
});

/// Regex matching `<br>` line breaks.
static BR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Regex matching any remaining tag.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Regex matching the document body.
static BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").unwrap());

const MARGIN_PT: f64 = 30.0;
const LINE_SPACING: f64 = 1.4;
/// Space after a placeholder slot.
const PLACEHOLDER_GAP_PT: f64 = 6.0;
/// Slot height for a placeholder without an inline `height`.
const DEFAULT_PLACEHOLDER_HEIGHT_PT: f64 = 100.0;
/// Smallest factor an overfull slide is scaled by.
const MIN_SCALE: f64 = 0.5;

/// Stacks the visible text of a slide into text boxes.
#[derive(Debug, Clone, Default)]
pub struct OutlineConverter;

impl OutlineConverter {
    pub fn new() -> Self {
        Self
    }
}

/// One text block found in the markup.
#[derive(Debug, Clone, PartialEq)]
struct TextBlock {
    tag: String,
    text: String,
}

impl TextBlock {
    fn font_size(&self) -> f64 {
        match self.tag.as_str() {
            "h1" => 24.0,
            "h2" => 18.0,
            "h3" => 14.0,
            _ => 11.0,
        }
    }

    fn is_heading(&self) -> bool {
        self.tag.starts_with('h')
    }

    fn display_text(&self) -> String {
        if self.tag == "li" {
            format!("• {}", self.text)
        } else {
            self.text.clone()
        }
    }

    /// Box height and the space after it, unscaled.
    fn extent(&self) -> (f64, f64) {
        let font_size = self.font_size();
        let lines = self.display_text().lines().count().max(1) as f64;
        (lines * font_size * LINE_SPACING, font_size * 0.4)
    }
}

/// Something stacked in the outline flow.
#[derive(Debug, Clone, PartialEq)]
enum FlowItem {
    Text(TextBlock),
    Placeholder(PlaceholderTag),
}

impl FlowItem {
    /// Height and trailing gap this item takes in the flow, unscaled.
    fn extent(&self) -> (f64, f64) {
        match self {
            FlowItem::Text(block) => block.extent(),
            FlowItem::Placeholder(tag) if absolute_frame(tag).is_some() => (0.0, 0.0),
            FlowItem::Placeholder(tag) => (
                tag.style_pt("height").unwrap_or(DEFAULT_PLACEHOLDER_HEIGHT_PT),
                PLACEHOLDER_GAP_PT,
            ),
        }
    }
}

/// The content of `<body>`, or the whole input when there is none.
fn body_of(html: &str) -> &str {
    BODY_REGEX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str())
}

/// Collect text blocks from `body`, in document order.
fn extract_blocks(body: &str) -> Vec<(usize, TextBlock)> {
    BLOCK_REGEX
        .captures_iter(body)
        .filter_map(|caps| {
            let offset = caps.get(0)?.start();
            let text = inner_text(&caps[2]);
            if text.is_empty() {
                return None;
            }
            Some((
                offset,
                TextBlock {
                    tag: caps[1].to_ascii_lowercase(),
                    text,
                },
            ))
        })
        .collect()
}

/// Text blocks and placeholders of `body`, merged in document order.
fn extract_flow(body: &str) -> Vec<FlowItem> {
    let mut items: Vec<(usize, FlowItem)> = extract_blocks(body)
        .into_iter()
        .map(|(offset, block)| (offset, FlowItem::Text(block)))
        .collect();
    items.extend(
        scan_placeholder_tags(body)
            .into_iter()
            .map(|tag| (tag.offset, FlowItem::Placeholder(tag))),
    );
    items.sort_by_key(|(offset, _)| *offset);
    items.into_iter().map(|(_, item)| item).collect()
}

/// Strip markup from an element's content and decode character references.
fn inner_text(markup: &str) -> String {
    let with_breaks = BR_REGEX.replace_all(markup, "\n");
    let stripped = TAG_REGEX.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode HTML character references; text with a malformed reference is
/// kept as written.
fn decode_entities(text: &str) -> String {
    match unescape_with(text, resolve_html5_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::debug!("Keeping undecoded text ({}): {}", e, text);
            text.to_string()
        }
    }
}

/// Geometry of a placeholder pinned by absolute inline style.
fn absolute_frame(tag: &PlaceholderTag) -> Option<Frame> {
    Some(Frame::new(
        tag.style_pt("left")?,
        tag.style_pt("top")?,
        tag.style_pt("width")?,
        tag.style_pt("height")?,
    ))
}

/// Lay the flow out top to bottom and return the placeholder slots.
fn layout_flow(items: &[FlowItem], slide: &mut Slide, canvas: Canvas) -> Vec<PlaceholderDescriptor> {
    let content_width = (canvas.width_pt - 2.0 * MARGIN_PT).max(0.0);
    let bottom = canvas.height_pt - MARGIN_PT;
    let available = (bottom - MARGIN_PT).max(0.0);

    let natural: f64 = items
        .iter()
        .map(|item| {
            let (height, gap) = item.extent();
            height + gap
        })
        .sum();
    let scale = if natural > available {
        (available / natural).max(MIN_SCALE)
    } else {
        1.0
    };

    let mut placeholders = Vec::new();
    let mut dropped = 0;
    let mut y = MARGIN_PT;

    for item in items {
        match item {
            FlowItem::Text(block) => {
                let (height, gap) = block.extent();
                let (height, gap) = (height * scale, gap * scale);
                if y + height > bottom {
                    dropped += 1;
                    continue;
                }

                slide.add_text(TextBox {
                    frame: Frame::new(MARGIN_PT, y, content_width, height),
                    text: block.display_text(),
                    style: TextStyle {
                        font_size: block.font_size() * scale,
                        bold: block.is_heading(),
                        ..TextStyle::default()
                    },
                    fill: None,
                });
                y += height + gap;
            }
            FlowItem::Placeholder(tag) => {
                if let Some(frame) = absolute_frame(tag) {
                    placeholders.push(PlaceholderDescriptor::new(
                        tag.id.clone(),
                        frame.x,
                        frame.y,
                        frame.w,
                        frame.h,
                    ));
                    continue;
                }

                let (height, gap) = item.extent();
                let height = (height * scale).min(available);
                let width = tag
                    .style_pt("width")
                    .map_or(content_width, |w| w.min(content_width));
                // Pulled up so the slot never crosses the bottom margin
                let top = y.min(bottom - height);

                placeholders.push(PlaceholderDescriptor::new(
                    tag.id.clone(),
                    MARGIN_PT,
                    top,
                    width,
                    height,
                ));
                y = top + height + gap * scale;
            }
        }
    }

    if dropped > 0 {
        log::debug!("Outline overflow: dropped {} text block(s)", dropped);
    }

    placeholders
}

impl SlideConverter for OutlineConverter {
    fn convert(&mut self, html_path: &Path, pres: &mut Presentation) -> Result<ConvertedSlide> {
        let html = fs::read_to_string(html_path).map_err(|e| {
            Error::conversion(format!("cannot read {}: {}", html_path.display(), e))
        })?;

        let flow = extract_flow(body_of(&html));
        let canvas = pres.canvas();

        let handle = pres.add_slide();
        let placeholders = match pres.slide_mut(handle) {
            Some(slide) => layout_flow(&flow, slide, canvas),
            None => Vec::new(),
        };

        Ok(ConvertedSlide {
            slide: handle,
            placeholders,
        })
    }
}
