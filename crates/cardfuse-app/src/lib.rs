//! Application layer: file I/O around the merge pipeline.

pub mod cli;

use std::fs;

use anyhow::Context as _;
use cardfuse_merge::{RunSummary, SourceText, merge_sources};
use cardfuse_vcard::parse::bytes_to_text;

pub use cli::Args;

/// Runs a merge: reads every input, merges, writes the output.
///
/// ## Errors
/// A missing or unreadable input file and an unwritable output path are
/// fatal, reported with the offending path and the underlying I/O reason.
pub fn run(args: &Args) -> anyhow::Result<RunSummary> {
    let options = args.merge_options();

    let mut sources = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        // Read as bytes: Latin-1 exports are not valid UTF-8.
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        sources.push(SourceText {
            path: path.display().to_string(),
            text: bytes_to_text(&bytes),
        });
        tracing::debug!(path = %path.display(), "Read input file");
    }

    let outcome = merge_sources(&sources, &options)?;

    fs::write(&args.output, &outcome.output)
        .with_context(|| format!("failed to write output file {}", args.output.display()))?;
    tracing::debug!(path = %args.output.display(), "Wrote merged output");

    Ok(outcome.summary)
}
