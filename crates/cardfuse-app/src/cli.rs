//! Command-line interface.

use std::path::PathBuf;

use cardfuse_core::{Grouping, MergeOptions, PhoneMatch};
use clap::Parser;

/// Merge and deduplicate VCF (vCard) contact files.
#[derive(Debug, Parser)]
#[command(name = "cardfuse", version, about)]
pub struct Args {
    /// Input vCard files to merge.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Path of the merged output file.
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Only treat phone numbers as equal when their digit sequences match
    /// exactly (by default a 7+ digit suffix match also counts, to
    /// tolerate missing country codes).
    #[arg(long)]
    pub strict_phone_match: bool,

    /// Only group records that match each other directly, instead of
    /// chaining matches transitively.
    #[arg(long)]
    pub pairwise_only: bool,

    /// Separator placed between distinct NOTE values of a merged contact.
    #[arg(long, value_name = "SEP", default_value = "\n", hide_default_value = true)]
    pub note_delimiter: String,
}

impl Args {
    /// Builds the merge options selected by the flags.
    #[must_use]
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            phone_match: if self.strict_phone_match {
                PhoneMatch::Strict
            } else {
                PhoneMatch::Lenient
            },
            grouping: if self.pairwise_only {
                Grouping::PairwiseOnly
            } else {
                Grouping::Transitive
            },
            note_delimiter: self.note_delimiter.clone(),
        }
    }
}
