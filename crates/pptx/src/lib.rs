//! Presentation assembly for rendered slide decks.
//!
//! Holds the in-memory presentation, the `.pptx` package writer, the
//! HTML → slide conversion boundary, and the pipeline that ties them to the
//! deck content in `deck-core`.

pub mod convert;
pub mod document;
pub mod inspect;
pub mod pipeline;
pub mod template;
pub mod writer;

pub use convert::{CommandConverter, ConvertedSlide, LayoutDocument, OutlineConverter, SlideConverter};
pub use document::{
    DocumentProperties, Frame, Presentation, RectShape, Shape, Slide, SlideHandle, TextBox, TextStyle,
};
pub use inspect::{PackageInspector, PackageSummary, SlideSummary, TableSummary};
pub use pipeline::{BuildReport, Pipeline, SlideOutcome, DEFAULT_OUTPUT, DEFAULT_WORK_DIR};
pub use writer::PptxWriter;
