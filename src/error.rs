//! Error types for pubdate normalization.

use crate::Location;
use thiserror::Error;

/// Everything that can abort a normalization run.
///
/// Every variant is fatal: the run stops at the first error instead of
/// emitting a partial or mangled row.
#[derive(Error, Debug)]
pub enum Error {
    /// A keyed line did not have the expected shape, or a field was left
    /// unpaired (an `id` without a `pubdate`, or the reverse).
    #[error("malformed record at {location}: {reason}\n  offending line: {line}")]
    MalformedRecord { location: Location, line: String, reason: String },

    /// No four-digit year could be found and the run was configured to fail
    /// on that.
    #[error("no four-digit year for id {id} at {location}: {pubdate:?}")]
    MissingYear { location: Location, id: u64, pubdate: String },

    /// An input could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing normalized output failed.
    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(location: &Location, line: &str, reason: impl Into<String>) -> Self {
        Error::MalformedRecord { location: location.clone(), line: line.to_string(), reason: reason.into() }
    }
}

/// Convenience alias for [`std::result::Result`] with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_names_location_and_line() {
        let loc = Location { source: "medline.json".to_string(), line: 7 };
        let err = Error::malformed(&loc, "\"id\": abc,", "id is not numeric");
        let msg = err.to_string();

        assert!(msg.contains("medline.json:7"));
        assert!(msg.contains("id is not numeric"));
        assert!(msg.contains("\"id\": abc,"));
    }

    #[test]
    fn missing_year_display_quotes_pubdate() {
        let loc = Location { source: "<stdin>".to_string(), line: 2 };
        let err = Error::MissingYear { location: loc, id: 42, pubdate: "circa 2000s".to_string() };

        assert_eq!(err.to_string(), "no four-digit year for id 42 at <stdin>:2: \"circa 2000s\"");
    }
}
