//! The HTML → slide conversion boundary.
//!
//! A converter turns one rendered slide document into a slide appended to
//! the presentation, and reports where the document's placeholders landed.

pub mod command;
pub mod layout;
pub mod outline;

pub use command::CommandConverter;
pub use layout::{LayoutDocument, LayoutShape};
pub use outline::OutlineConverter;

use crate::document::{Presentation, SlideHandle};
use deck_core::{PlaceholderDescriptor, Result};
use std::path::Path;

/// Result of converting one slide document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedSlide {
    /// The slide appended to the presentation.
    pub slide: SlideHandle,
    /// Every placeholder the converter resolved, in points.
    pub placeholders: Vec<PlaceholderDescriptor>,
}

/// Converts a rendered HTML slide into a native presentation slide.
///
/// On error the converter should leave `pres` unchanged; the pipeline also
/// drops any slide appended by a failed conversion.
pub trait SlideConverter {
    fn convert(&mut self, html_path: &Path, pres: &mut Presentation) -> Result<ConvertedSlide>;
}

impl<C: SlideConverter + ?Sized> SlideConverter for Box<C> {
    fn convert(&mut self, html_path: &Path, pres: &mut Presentation) -> Result<ConvertedSlide> {
        (**self).convert(html_path, pres)
    }
}
