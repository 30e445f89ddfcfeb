//! Deck content: presentation metadata plus the ordered slide records.
//!
//! Content is data, not code. The built-in project plan deck ships as JSON
//! compiled into the crate; other decks can be loaded from disk.

use crate::error::{Error, Result};
use crate::types::SlideRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The project plan deck bundled with the crate.
const BUILTIN_PROJECT_PLAN: &str = include_str!("../decks/project_plan.json");

/// A complete deck definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckContent {
    /// Document title stored in the presentation properties.
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub subject: String,

    /// Slides in output order.
    pub slides: Vec<SlideRecord>,
}

impl DeckContent {
    /// Create an untitled deck from slide records.
    pub fn new(slides: Vec<SlideRecord>) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            company: String::new(),
            subject: String::new(),
            slides,
        }
    }

    /// The bundled fifteen-slide project plan.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_PROJECT_PLAN)
    }

    /// Parse and validate a deck from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let deck: DeckContent = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Read, parse, and validate a deck JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json).map_err(|e| match e {
            Error::ContentError(msg) => {
                Error::ContentError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Check the deck is renderable: at least one slide, and every table
    /// binding well formed.
    pub fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(Error::StaticContent("deck has no slides".to_string()));
        }
        for (i, slide) in self.slides.iter().enumerate() {
            for table in &slide.tables {
                table.validate().map_err(|e| match e {
                    Error::StaticContent(msg) => {
                        Error::StaticContent(format!("slide {}: {}", i + 1, msg))
                    }
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Iterate slides with their 1-based index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &SlideRecord)> {
        self.slides.iter().enumerate().map(|(i, s)| (i + 1, s))
    }

    /// Placeholder ids declared in the body of slide `index` (1-based), in
    /// document order. `None` when there is no such slide.
    pub fn declared_placeholders(&self, index: usize) -> Option<Vec<String>> {
        let record = self.slides.get(index.checked_sub(1)?)?;
        Some(record.placeholder_ids())
    }
}
