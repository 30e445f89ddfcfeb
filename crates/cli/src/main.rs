//! CLI tool for building the project plan slide deck.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::DeckContent;
use deck_pptx::{
    CommandConverter, OutlineConverter, PackageInspector, Pipeline, SlideConverter, SlideOutcome,
    DEFAULT_OUTPUT, DEFAULT_WORK_DIR,
};
use std::path::PathBuf;

/// Render the slide deck to HTML and assemble it into a PowerPoint file.
#[derive(Parser, Debug)]
#[command(name = "deck-build")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Deck content JSON (default: the built-in project plan)
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Directory for the intermediate slide HTML files
    #[arg(long, default_value = DEFAULT_WORK_DIR)]
    work_dir: PathBuf,

    /// Output .pptx file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// External HTML → slide converter program (default: built-in outline converter)
    #[arg(long)]
    converter: Option<String>,

    /// Extra argument for the converter program (repeatable)
    #[arg(long = "converter-arg", requires = "converter")]
    converter_args: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let deck = match &args.deck {
        Some(path) => DeckContent::load(path)
            .with_context(|| format!("Failed to load deck {}", path.display()))?,
        None => DeckContent::builtin().context("Built-in deck is invalid")?,
    };
    log::debug!("Loaded deck '{}' with {} slides", deck.title, deck.len());

    for (index, record) in deck.indexed() {
        for table in record.unbound_tables() {
            log::debug!(
                "Slide {}: no placeholder '{}' in markup",
                index,
                table.placeholder
            );
        }
    }

    let mut converter: Box<dyn SlideConverter> = match &args.converter {
        Some(program) => {
            log::info!("Using converter: {}", program);
            Box::new(CommandConverter::new(program.as_str()).with_args(args.converter_args.iter().cloned()))
        }
        None => {
            log::info!("Using built-in outline converter");
            Box::new(OutlineConverter::new())
        }
    };

    let pipeline = Pipeline::new(&args.work_dir, &args.output);
    let report = pipeline
        .run(&deck, &mut converter)
        .context("Failed to build presentation")?;

    println!("PPTX created: {}", report.output_path.display());

    let failed: Vec<usize> = report.failures().map(SlideOutcome::index).collect();
    if failed.is_empty() {
        println!("All {} slides converted", report.slide_count);
    } else {
        println!(
            "{} of {} slides failed: {:?}",
            failed.len(),
            report.outcomes.len(),
            failed
        );
    }

    match PackageInspector::new().inspect_file(&report.output_path) {
        Ok(summary) => log::debug!(
            "Package contains {} slides and {} tables",
            summary.slide_count(),
            summary.table_count()
        ),
        Err(e) => log::warn!("Could not read back {}: {}", report.output_path.display(), e),
    }

    Ok(())
}
