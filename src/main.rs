mod config;
mod dataset;
mod merge;
mod pdf;
mod segment;
mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pdfium_render::prelude::*;

use config::{Config, DEFAULT_DATASET_PATH, DEFAULT_PDF_PATH};
use types::{ExtractedPoems, MergeReport, Section, SegmentConfig};

#[derive(Parser)]
#[command(name = "poemextract", about = "Fill poem content in a JSON dataset from a PDF")]
struct Cli {
    /// PDF file to read poems from
    #[arg(long, env = "POEMEXTRACT_PDF", default_value = DEFAULT_PDF_PATH)]
    pdf: PathBuf,

    /// JSON dataset with a top-level `poems` array, updated in place
    #[arg(long, env = "POEMEXTRACT_DATASET", default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Single-line sections shorter than this many characters are titles
    #[arg(long, env = "POEMEXTRACT_MAX_TITLE_CHARS", default_value_t = 50)]
    max_title_chars: usize,

    /// Show section classification and exit (debug)
    #[arg(long)]
    debug_sections: bool,

    /// Merge and report, but do not write the dataset
    #[arg(long)]
    dry_run: bool,

    /// Override pdfium library path
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_path: Option<String>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            pdf_path: self.pdf.clone(),
            dataset_path: self.dataset.clone(),
            segment: SegmentConfig {
                max_title_chars: self.max_title_chars,
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.config();

    if let Some((label, path)) = config.missing_input() {
        println!("{label} file not found: {}", path.display());
        return Ok(());
    }

    let pdfium = bind_pdfium(&cli.pdfium_path)?;
    println!("Extracting poems from PDF...");
    let full_text = extract_full_text(&pdfium, &config)?;

    if cli.debug_sections {
        print_debug_sections(&segment::classify_sections(&full_text, &config.segment));
        return Ok(());
    }

    let poems = segment::segment(&full_text, &config.segment);
    if poems.is_empty() {
        log::warn!("no title/content sections found in {}", config.pdf_path.display());
    }
    print_found_titles(&poems);

    println!("\nUpdating JSON file...");
    let report = dataset::update(&config.dataset_path, &poems, cli.dry_run)?;
    print_updates(&report);
    if cli.dry_run {
        println!("Dry run: {} left unchanged", config.dataset_path.display());
    }
    println!("\nUpdated {} poems with content from PDF", report.updated_count());
    println!("Done!");
    Ok(())
}

fn bind_pdfium(pdfium_path: &Option<String>) -> Result<Pdfium> {
    let bindings = if let Some(path) = pdfium_path {
        Pdfium::bind_to_library(path)
            .with_context(|| format!("Failed to load pdfium from: {path}"))?
    } else {
        Pdfium::bind_to_system_library()
            .context("Failed to find pdfium. Install pdfium-binaries or use --pdfium-path")?
    };
    Ok(Pdfium::new(bindings))
}

fn extract_full_text(pdfium: &Pdfium, config: &Config) -> Result<String> {
    let pages = pdf::extract_page_texts(pdfium, &config.pdf_path)?;
    let full_text = pdf::join_pages(&pages);
    log::info!("extracted {} pages, {} chars", pages.len(), full_text.chars().count());
    Ok(full_text)
}

fn print_found_titles(poems: &ExtractedPoems) {
    println!("Found {} potential poems in PDF:", poems.len());
    for title in poems.titles() {
        println!("  - {title}");
    }
}

fn print_updates(report: &MergeReport) {
    for update in &report.updates {
        println!("Updated '{}' with {} lines", update.title, update.line_count);
    }
}

fn print_debug_sections(sections: &[Section]) {
    for (idx, section) in sections.iter().enumerate() {
        let kind_label = format!("{:?}", section.kind);
        let first_line = section.text.lines().next().unwrap_or("");
        let preview: String = first_line.chars().take(60).collect();
        println!(
            "#{idx:<4} [{kind_label:<7}] lines={:<3} | {preview}",
            section.text.lines().count()
        );
    }
}
