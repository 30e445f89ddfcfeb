//! Core slide records, HTML rendering, and placeholder-to-table binding
//! for the slide deck builder.

pub mod binder;
pub mod deck;
pub mod emit;
pub mod error;
pub mod placeholder;
pub mod render;
pub mod table;
pub mod types;

pub use binder::{bind_tables, BindReport, TableCanvas};
pub use deck::DeckContent;
pub use emit::HtmlEmitter;
pub use error::{Error, Result};
pub use placeholder::{scan_placeholder_tags, PlaceholderMap, PlaceholderTag};
pub use render::{Canvas, HtmlRenderer};
pub use table::{
    Align, CellSpec, CellStyle, ResolvedCell, ResolvedTable, StylePreset, TableBinding,
    TableBorder,
};
pub use types::{PlaceholderDescriptor, SlideRecord};
