//! Placeholder markers in slide HTML and the id → geometry mapping.
//!
//! A placeholder is any element carrying both an `id` attribute and the
//! [`PLACEHOLDER_CLASS`] class. The conversion boundary resolves each one to
//! absolute slide geometry; the binder looks them up by id.

use crate::types::PlaceholderDescriptor;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Class name that marks an element as a table placeholder.
pub const PLACEHOLDER_CLASS: &str = "placeholder";

/// Regex matching an opening tag and capturing its attribute text.
static OPEN_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)(\s[^<>]*?)?/?>").unwrap());

/// Regex matching a single quoted attribute.
static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// A placeholder element as declared in slide markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderTag {
    pub id: String,
    /// Byte offset of the opening tag in the scanned markup.
    pub offset: usize,
    /// Raw inline `style` attribute, if present.
    pub style: Option<String>,
}

impl PlaceholderTag {
    /// Read a `pt` length from the inline style, e.g. `width: 295pt`.
    pub fn style_pt(&self, property: &str) -> Option<f64> {
        let style = self.style.as_deref()?;
        style.split(';').find_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            if !name.trim().eq_ignore_ascii_case(property) {
                return None;
            }
            value.trim().strip_suffix("pt")?.trim().parse().ok()
        })
    }
}

/// Find every placeholder element in an HTML fragment, in document order.
pub fn scan_placeholder_tags(html: &str) -> Vec<PlaceholderTag> {
    OPEN_TAG_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let offset = caps.get(0)?.start();
            let attrs = caps.get(2)?.as_str();
            let mut id = None;
            let mut class = None;
            let mut style = None;

            for attr in ATTRIBUTE_REGEX.captures_iter(attrs) {
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                match attr[1].to_ascii_lowercase().as_str() {
                    "id" => id = Some(value),
                    "class" => class = Some(value),
                    "style" => style = Some(value),
                    _ => {}
                }
            }

            let is_placeholder = class
                .as_deref()
                .is_some_and(|c| c.split_whitespace().any(|name| name == PLACEHOLDER_CLASS));
            match id {
                Some(id) if is_placeholder && !id.is_empty() => Some(PlaceholderTag { id, offset, style }),
                _ => None,
            }
        })
        .collect()
}

/// Placeholder descriptors of one slide, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderMap {
    by_id: HashMap<String, PlaceholderDescriptor>,
}

impl PlaceholderMap {
    /// Build the map from a converter's descriptor list.
    ///
    /// Ids should be unique; if one repeats, the first descriptor wins.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = PlaceholderDescriptor>) -> Self {
        let mut by_id = HashMap::new();
        for descriptor in descriptors {
            if by_id.contains_key(&descriptor.id) {
                log::warn!(
                    "Duplicate placeholder id '{}' ignored (keeping first)",
                    descriptor.id
                );
                continue;
            }
            by_id.insert(descriptor.id.clone(), descriptor);
        }
        Self { by_id }
    }

    /// Look up a placeholder by id.
    pub fn get(&self, id: &str) -> Option<&PlaceholderDescriptor> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<PlaceholderDescriptor> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = PlaceholderDescriptor>>(iter: I) -> Self {
        Self::from_descriptors(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_requires_class_and_id() {
        let html = r#"
<div id="table1" class="placeholder" style="width: 295pt; height: 120pt;"></div>
<div id="chart" class="card"></div>
<div class="placeholder"></div>
<div class="wide placeholder" id='table2'></div>
"#;
        let tags = scan_placeholder_tags(html);
        let ids: Vec<&str> = tags.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["table1", "table2"]);
        assert_eq!(tags[0].offset, html.find("<div id=\"table1\"").unwrap());
        assert!(tags[0].offset < tags[1].offset);
    }

    #[test]
    fn test_class_must_match_whole_name() {
        let tags = scan_placeholder_tags(r#"<div id="x" class="placeholder-box"></div>"#);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_style_pt() {
        let tag = PlaceholderTag {
            id: "table1".to_string(),
            offset: 0,
            style: Some("width: 295pt; height:120pt; left: 4em".to_string()),
        };
        assert_eq!(tag.style_pt("width"), Some(295.0));
        assert_eq!(tag.style_pt("height"), Some(120.0));
        assert_eq!(tag.style_pt("left"), None);
        assert_eq!(tag.style_pt("top"), None);
    }

    #[test]
    fn test_map_lookup() {
        let map = PlaceholderMap::from_descriptors(vec![
            PlaceholderDescriptor::new("table1", 10.0, 20.0, 300.0, 150.0),
            PlaceholderDescriptor::new("table2", 0.0, 0.0, 1.0, 1.0),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("table1").map(|p| p.w), Some(300.0));
        assert!(map.get("table3").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let map: PlaceholderMap = vec![
            PlaceholderDescriptor::new("table1", 1.0, 1.0, 1.0, 1.0),
            PlaceholderDescriptor::new("table1", 9.0, 9.0, 9.0, 9.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("table1").map(|p| p.x), Some(1.0));
    }
}
