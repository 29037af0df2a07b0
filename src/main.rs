// src/main.rs
mod docx;
mod extractors;
mod manifest;
mod pipeline;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use docx::{read_paragraphs, ReadOptions};
use extractors::{BioSegmenter, EntryMode, HeadingSet, RenderOptions, SectionFallback, SegmenterConfig};
use manifest::{Manifest, ManifestOptions};
use pipeline::EmptyBodyPolicy;
use storage::StorageManager;
use utils::AppError;

/// Extract per-candidate bios from a Word document, guided by a CSV manifest
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Word document holding the candidate entries
    #[arg(long, default_value = "Aggregate Mini Wiki.docx")]
    docx: PathBuf,

    /// CSV manifest with a bio column; rewritten in place
    #[arg(short, long, default_value = "materials.csv")]
    manifest: PathBuf,

    /// Output directory for bio files
    #[arg(short, long, default_value = "bio")]
    output_dir: PathBuf,

    /// Manifest column holding the bio path
    #[arg(long, default_value = "bio_name")]
    bio_column: String,

    /// How candidate entries are located in the document
    #[arg(long, value_enum, default_value_t = EntryMode::Auto)]
    mode: EntryMode,

    /// Section layout for bodies without headings
    #[arg(long, value_enum, default_value_t = SectionFallback::Whole)]
    fallback: SectionFallback,

    /// What to write when a matched entry has no section text
    #[arg(long, value_enum, default_value_t = EmptyBodyPolicy::FullBody)]
    empty_policy: EmptyBodyPolicy,

    /// Keep trailing commas and empty parentheses
    #[arg(long)]
    no_clean: bool,

    /// Do not prefix content lines with a bullet
    #[arg(long)]
    no_bullets: bool,

    /// Do not put the candidate's name on the first line
    #[arg(long)]
    no_title: bool,

    /// Bullet prefix for content lines
    #[arg(long, default_value = extractors::render::DEFAULT_BULLET)]
    bullet: String,

    /// Keep text that sits inside hyperlinks
    #[arg(long)]
    keep_hyperlinks: bool,

    /// Candidate names to ignore (repeatable)
    #[arg(long, default_values_t = ["*".to_string(), "fill_img".to_string()])]
    exclude: Vec<String>,

    /// Lines this long or longer are never treated as a name
    #[arg(long, default_value = "50")]
    max_name_len: usize,

    /// How many unmatched names to list in the summary
    #[arg(long, default_value = "50")]
    unmatched_limit: usize,

    /// Parse and report without writing bios or rewriting the manifest
    #[arg(long)]
    dry_run: bool,

    /// Debug mode - save an annotated paragraph listing
    #[arg(short, long)]
    debug: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(&args.log_level);
    tracing::info!("Starting processing for args: {:?}", args);

    if args.max_name_len == 0 {
        return Err(AppError::Config("--max-name-len must be greater than zero".to_string()));
    }

    // 3. Load both inputs before any output is written
    let manifest_options = ManifestOptions {
        column: args.bio_column.clone(),
        bio_dir: bio_dir_label(&args.output_dir),
        ..ManifestOptions::default()
    };
    let mut manifest = Manifest::read(&args.manifest, &manifest_options)?;
    let paragraphs = read_paragraphs(
        &args.docx,
        ReadOptions { strip_hyperlinks: !args.keep_hyperlinks },
    )?;

    // 4. Reconcile the manifest and collect candidates
    let reconciliation = manifest.reconcile(&manifest_options);
    tracing::info!(
        "Extracted {} candidate names from {} ({} rows rewritten, {} left unchanged)",
        reconciliation.candidates.len(),
        args.manifest.display(),
        reconciliation.rewritten,
        reconciliation.passed_through
    );
    let candidates = pipeline::unique_candidates(reconciliation.candidates, &args.exclude);
    tracing::info!("{} unique candidates to look up", candidates.len());

    // 5. Initialize segmenter and rendering policy
    let segmenter = BioSegmenter::new(SegmenterConfig {
        headings: HeadingSet::default(),
        mode: args.mode,
        fallback: args.fallback,
        max_name_line_chars: args.max_name_len,
    });
    let render = RenderOptions {
        clean_lines: !args.no_clean,
        bullet: (!args.no_bullets).then(|| args.bullet.clone()),
        title: !args.no_title,
    };

    // 6. Segment and render
    let mut outcome = pipeline::run_batch(&paragraphs, &candidates, &segmenter, &render, args.empty_policy);

    // 7. Write outputs
    if args.dry_run {
        tracing::info!("Dry run: {} bios rendered, nothing written", outcome.bios.len());
    } else {
        let storage = StorageManager::new(&args.output_dir)?;

        if args.debug {
            let debug_dir = storage.subdir("debug")?;
            let dump_path = debug_dir.join("paragraphs.txt");
            if let Err(e) = utils::paragraph_debug::save_paragraph_dump(
                &paragraphs,
                &segmenter.config().headings,
                args.max_name_len,
                &dump_path,
            ) {
                tracing::warn!("Failed to create paragraph dump: {}", e);
            }
        }

        for bio in &outcome.bios {
            match storage.save_bio(&bio.candidate, &bio.text) {
                Ok(path) => {
                    tracing::info!("Saved bio for {} -> {}", bio.candidate, path.display());
                    outcome.report.saved.push(bio.candidate.clone());
                }
                Err(e) => {
                    tracing::error!("Failed to save bio for {}: {}", bio.candidate, e);
                    outcome.report.failed_writes.push(bio.candidate.clone());
                }
            }
        }

        if reconciliation.rewritten > 0 {
            manifest.write(&args.manifest)?;
        }
    }

    pipeline::log_summary(&outcome.report, args.unmatched_limit);

    if let Some(report_path) = &args.report {
        storage::save_report(&outcome.report, &args.docx, &args.manifest, report_path)?;
    }

    if outcome.report.saved.is_empty() && !outcome.report.failed_writes.is_empty() {
        return Err(AppError::Processing(format!(
            "Failed to write any of {} bios",
            outcome.report.failed_writes.len()
        )));
    }

    Ok(())
}

/// Directory label used inside rewritten manifest values. The manifest
/// stores paths relative to itself, so only the last path component is used.
fn bio_dir_label(output_dir: &std::path::Path) -> String {
    output_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bio".to_string())
}
