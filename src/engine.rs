//! Streaming record engine.
//!
//! Turning raw extractor output into records is a two-stage pipeline:
//!
//! ```text
//! lines ── scan_line (scanner.rs) ──> Field::Id / Field::Pubdate / ignored
//!                                          │
//!                                          v
//!                              Framer::push (framer.rs)
//!                                - one pending record at a time
//!                                - last pubdate wins
//!                                - unpaired fields are errors
//!                                          │
//!                                          v
//!                                  MetadataRecord
//! ```
//!
//! Normalization of the record's pubdate happens above this layer, in
//! `api.rs`, using the rule list from `rules/`.
//!
//! ## Responsibilities by module
//!
//! - `scanner.rs`: recognises `id` / `pubdate` lines and parses their values.
//! - `framer.rs`: pairs fields into records and enforces the framing policy.
//! - `metrics.rs`: per-run counters.

#[path = "engine/framer.rs"]
mod framer;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/scanner.rs"]
mod scanner;

pub use framer::Framer;
pub use metrics::RunSummary;
pub use scanner::scan_line;
