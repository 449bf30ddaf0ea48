#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;
mod sources;

pub use api::{Normalizer, RunSummary, extract_year, normalize, normalize_record, run, strip_season};
pub use error::{Error, Result};
pub use sources::{Lines, Source};

use std::fmt;
use std::str::FromStr;

// --- Records -----------------------------------------------------------------

/// One logical `(id, pubdate)` pair read from the metadata stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// PMID; always positive.
    pub id: u64,
    /// Free-text publication date, quotes stripped and JSON escapes decoded.
    pub pubdate: String,
    /// Where the record's `pubdate` line was read.
    pub location: Location,
}

/// A normalized output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub id: u64,
    /// Four-digit year in [`Mode::IdYear`], untruncated pubdate in [`Mode::IdPubdate`].
    pub value: String,
}

impl NormalizedRecord {
    /// Render as `id<TAB>value`, without a trailing newline.
    pub fn to_tsv_line(&self) -> String {
        format!("{}\t{}", self.id, self.value)
    }
}

/// Position of a line within the concatenated input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path, or `<stdin>`.
    pub source: String,
    /// 1-based line number within `source`.
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

// --- Options -----------------------------------------------------------------

/// What the right-hand column of each output row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `id<TAB>year`: season stripped, truncated to the four-digit year.
    #[default]
    IdYear,
    /// `id<TAB>pubdate`: the date text with a leading season word dropped but
    /// no year truncation.
    IdPubdate,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "id_year" => Ok(Mode::IdYear),
            "id_pubdate" => Ok(Mode::IdPubdate),
            other => Err(format!("unknown mode '{other}' (expected id_year or id_pubdate)")),
        }
    }
}

/// What to do with a pubdate that has no four-digit year in [`Mode::IdYear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingYearPolicy {
    /// Emit the raw pubdate unchanged and log a warning.
    #[default]
    PassThrough,
    /// Abort the run with [`Error::MissingYear`].
    Fail,
}

impl FromStr for MissingYearPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pass" | "pass-through" => Ok(MissingYearPolicy::PassThrough),
            "fail" => Ok(MissingYearPolicy::Fail),
            other => Err(format!("unknown missing-year policy '{other}' (expected pass or fail)")),
        }
    }
}

/// Options that affect normalization.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub mode: Mode,
    pub missing_year: MissingYearPolicy,
    /// Only emit records whose id is strictly greater than this.
    pub pmid_greater_than: Option<u64>,
    /// Only emit records whose id is strictly less than this.
    pub pmid_less_than: Option<u64>,
}

impl Options {
    /// Whether `id` falls inside the configured PMID window.
    pub fn admits(&self, id: u64) -> bool {
        self.pmid_greater_than.is_none_or(|lower| id > lower) && self.pmid_less_than.is_none_or(|upper| id < upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_both_spellings() {
        assert_eq!("id_year".parse::<Mode>(), Ok(Mode::IdYear));
        assert_eq!("id_pubdate".parse::<Mode>(), Ok(Mode::IdPubdate));
        assert!("year".parse::<Mode>().is_err());
    }

    #[test]
    fn missing_year_policy_parses() {
        assert_eq!("pass".parse::<MissingYearPolicy>(), Ok(MissingYearPolicy::PassThrough));
        assert_eq!("fail".parse::<MissingYearPolicy>(), Ok(MissingYearPolicy::Fail));
        assert!("skip".parse::<MissingYearPolicy>().is_err());
    }

    #[test]
    fn pmid_window_is_exclusive() {
        let opts = Options { pmid_greater_than: Some(10), pmid_less_than: Some(20), ..Options::default() };
        assert!(!opts.admits(10));
        assert!(opts.admits(11));
        assert!(opts.admits(19));
        assert!(!opts.admits(20));
        assert!(Options::default().admits(1));
    }

    #[test]
    fn tsv_line_uses_a_single_tab() {
        let rec = NormalizedRecord { id: 12345, value: "1999 Nov-Dec".to_string() };
        assert_eq!(rec.to_tsv_line(), "12345\t1999 Nov-Dec");
    }
}
