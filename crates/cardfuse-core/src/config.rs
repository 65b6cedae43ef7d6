//! Run configuration.
//!
//! Options are carried as an explicit value through matcher and merger
//! calls rather than read from process-wide state, so two runs in the same
//! process cannot observe each other's settings.

/// How two telephone numbers are compared after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneMatch {
    /// Equal digit sequences, or one is a suffix of the other with at
    /// least seven digits. Tolerates a missing country or area code.
    #[default]
    Lenient,
    /// Equal digit sequences only.
    Strict,
}

/// How matching records are consolidated into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// Matching is treated as an equivalence relation: if A matches B and
    /// B matches C, all three land in one group even when A and C do not
    /// match directly. Can over-merge chains of weak matches.
    #[default]
    Transitive,
    /// A record only joins a group it matches every member of directly.
    PairwiseOnly,
}

/// Options threaded through a merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    pub phone_match: PhoneMatch,
    pub grouping: Grouping,
    /// Separator placed between distinct NOTE values of a merged contact.
    pub note_delimiter: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            phone_match: PhoneMatch::default(),
            grouping: Grouping::default(),
            note_delimiter: "\n".to_string(),
        }
    }
}
