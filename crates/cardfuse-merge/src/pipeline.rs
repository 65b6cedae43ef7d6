//! The merge pipeline: parse → group → merge → serialize.
//!
//! Operates on in-memory sources; reading input files and writing the
//! output file belong to the application layer. Expected inputs are
//! thousands of contacts, so grouping does the straightforward O(n²)
//! pairwise comparison feeding a disjoint-set.

use cardfuse_core::{CoreResult, Grouping, MergeOptions};
use cardfuse_vcard::{VCard, parse_lenient, serialize};

use crate::disjoint::DisjointSet;
use crate::key::ContactKey;
use crate::matcher::is_match;
use crate::merger::merge_group;

/// One input file, already read into memory.
#[derive(Debug, Clone)]
pub struct SourceText {
    /// Display path for diagnostics.
    pub path: String,
    pub text: String,
}

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub records_read: usize,
    pub groups: usize,
    pub duplicates_removed: usize,
    pub skipped_blocks: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records read, {} contacts written, {} duplicates removed",
            self.records_read, self.groups, self.duplicates_removed
        )?;
        if self.skipped_blocks > 0 {
            write!(f, ", {} malformed blocks skipped", self.skipped_blocks)?;
        }
        Ok(())
    }
}

/// Result of a merge run.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Serialized vCard text for the output file.
    pub output: String,
    pub summary: RunSummary,
}

/// Runs the full merge pipeline over the given sources.
///
/// Malformed blocks are skipped with a warning naming their source;
/// everything else parses, groups, and merges. Records keep their source
/// tagging only for diagnostics — grouping looks at all records across
/// all sources at once.
///
/// ## Errors
/// Only a broken grouping invariant can error here (an empty group
/// reaching the merger), which indicates a bug rather than bad input.
#[tracing::instrument(skip(sources, options), fields(sources = sources.len()))]
pub fn merge_sources(sources: &[SourceText], options: &MergeOptions) -> CoreResult<MergeOutcome> {
    let mut records: Vec<VCard> = Vec::new();
    let mut skipped_blocks = 0;

    for source in sources {
        let parsed = parse_lenient(&source.text);
        for err in &parsed.skipped {
            tracing::warn!(source = %source.path, line = err.line, error = %err, "Skipped malformed record");
        }
        skipped_blocks += parsed.skipped.len();
        tracing::debug!(source = %source.path, records = parsed.cards.len(), "Parsed source");
        records.extend(parsed.cards);
    }

    let groups = build_groups(&records, options);
    let records_read = records.len();

    let mut merged: Vec<VCard> = Vec::with_capacity(groups.len());
    for group in &groups {
        let members: Vec<&VCard> = group.iter().map(|&i| &records[i]).collect();
        merged.push(merge_group(&members, options)?);
    }

    let summary = RunSummary {
        records_read,
        groups: merged.len(),
        duplicates_removed: records_read - merged.len(),
        skipped_blocks,
    };

    tracing::info!(
        records = summary.records_read,
        groups = summary.groups,
        duplicates = summary.duplicates_removed,
        "Merge complete"
    );

    Ok(MergeOutcome {
        output: serialize(&merged),
        summary,
    })
}

/// Consolidates records into groups of duplicates under the configured
/// policy. Groups and their members are in first-seen order.
fn build_groups(records: &[VCard], options: &MergeOptions) -> Vec<Vec<usize>> {
    let keys: Vec<ContactKey> = records.iter().map(ContactKey::from_card).collect();

    match options.grouping {
        Grouping::Transitive => {
            let mut set = DisjointSet::new(records.len());
            for i in 0..keys.len() {
                for j in (i + 1)..keys.len() {
                    if is_match(&keys[i], &keys[j], options) {
                        set.union(i, j);
                    }
                }
            }
            set.groups()
        }
        Grouping::PairwiseOnly => {
            // A record only joins a group it matches every member of.
            let mut groups: Vec<Vec<usize>> = Vec::new();
            for (i, key) in keys.iter().enumerate() {
                let joined = groups
                    .iter()
                    .position(|group| group.iter().all(|&j| is_match(key, &keys[j], options)));
                match joined {
                    Some(slot) => groups[slot].push(i),
                    None => groups.push(vec![i]),
                }
            }
            groups
        }
    }
}
