//! End-to-end build: render, emit, convert, bind tables, save.

use crate::convert::SlideConverter;
use crate::document::{DocumentProperties, Presentation};
use deck_core::{bind_tables, BindReport, DeckContent, HtmlEmitter, HtmlRenderer, PlaceholderMap, Result};
use std::path::{Path, PathBuf};

/// Default directory for the intermediate HTML files.
pub const DEFAULT_WORK_DIR: &str = "slides";

/// Default output package path.
pub const DEFAULT_OUTPUT: &str = "output/project-plan-slides.pptx";

/// Outcome of converting one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideOutcome {
    Converted {
        index: usize,
        tables_drawn: usize,
        tables_skipped: usize,
    },
    Failed {
        index: usize,
        message: String,
    },
}

impl SlideOutcome {
    /// 1-based slide index.
    pub fn index(&self) -> usize {
        match self {
            SlideOutcome::Converted { index, .. } | SlideOutcome::Failed { index, .. } => *index,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SlideOutcome::Failed { .. })
    }
}

/// Result of a completed build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    /// One outcome per input slide, in index order.
    pub outcomes: Vec<SlideOutcome>,
    pub output_path: PathBuf,
    /// Slides written to the package.
    pub slide_count: usize,
}

impl BuildReport {
    pub fn failures(&self) -> impl Iterator<Item = &SlideOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn converted_count(&self) -> usize {
        self.outcomes.len() - self.failures().count()
    }
}

/// Drives a deck through rendering, conversion, and serialization.
#[derive(Debug, Clone)]
pub struct Pipeline {
    renderer: HtmlRenderer,
    emitter: HtmlEmitter,
    output_path: PathBuf,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_DIR, DEFAULT_OUTPUT)
    }
}

impl Pipeline {
    pub fn new(work_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            renderer: HtmlRenderer::new(),
            emitter: HtmlEmitter::new(work_dir),
            output_path: output_path.into(),
        }
    }

    pub fn with_renderer(mut self, renderer: HtmlRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn work_dir(&self) -> &Path {
        self.emitter.work_dir()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Build the deck.
    ///
    /// Rendering, writing the HTML files, and saving the package are fatal
    /// on error. A slide that fails to convert is logged, left out of the
    /// package, and recorded in the report.
    pub fn run<C>(&self, deck: &DeckContent, converter: &mut C) -> Result<BuildReport>
    where
        C: SlideConverter + ?Sized,
    {
        // Phase 1: every HTML file exists before any conversion starts
        let mut html_paths = Vec::with_capacity(deck.len());
        for (index, record) in deck.indexed() {
            let html = self.renderer.render(record);
            html_paths.push(self.emitter.emit(index, &html)?);
        }

        // Phase 2: convert in index order
        let mut pres = Presentation::new(DocumentProperties {
            title: deck.title.clone(),
            author: deck.author.clone(),
            company: deck.company.clone(),
            subject: deck.subject.clone(),
        })
        .with_canvas(self.renderer.canvas());

        let mut outcomes = Vec::with_capacity(deck.len());
        for ((index, record), html_path) in deck.indexed().zip(&html_paths) {
            let before = pres.slide_count();

            let converted = match converter.convert(html_path, &mut pres) {
                Ok(converted) => converted,
                Err(e) => {
                    pres.truncate(before);
                    let e = e.at_slide(index);
                    log::error!("Error on slide {}: {}", index, e);
                    outcomes.push(SlideOutcome::Failed {
                        index,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let placeholders = PlaceholderMap::from_descriptors(converted.placeholders);
            let report = match pres.slide_mut(converted.slide) {
                Some(slide) if record.has_tables() => {
                    bind_tables(slide, &record.tables, &placeholders)
                }
                _ => BindReport::default(),
            };

            log::info!(
                "Converted slide {} ({} table(s) drawn, {} skipped)",
                index,
                report.drawn_count(),
                report.skipped_count()
            );
            outcomes.push(SlideOutcome::Converted {
                index,
                tables_drawn: report.drawn_count(),
                tables_skipped: report.skipped_count(),
            });
        }

        // Phase 3
        pres.save(&self.output_path)?;

        Ok(BuildReport {
            outcomes,
            output_path: self.output_path.clone(),
            slide_count: pres.slide_count(),
        })
    }
}
