use crate::engine::{Framer, scan_line};
use crate::rules::pubdate::{SEASON_RULES, YEAR_RULES, YEAR_TOKEN};
use crate::rules::rewrite;
use crate::{Error, Location, MetadataRecord, MissingYearPolicy, Mode, NormalizedRecord, Options, Result};
use std::io::{BufWriter, Write};
use std::iter::Fuse;
use std::time::Instant;

pub use crate::engine::RunSummary;

/// Return the four-digit year of a free-text pubdate, if it has one.
///
/// A season word directly in front of the year is stripped first, then the
/// first word-bounded run of four digits is taken.
///
/// # Example
/// ```
/// use pubdate_normalizer::extract_year;
///
/// assert_eq!(extract_year("Spring 2003").as_deref(), Some("2003"));
/// assert_eq!(extract_year("1998 Dec-1999 Jan").as_deref(), Some("1998"));
/// assert_eq!(extract_year("circa 2000s"), None);
/// ```
pub fn extract_year(pubdate: &str) -> Option<String> {
    let out = rewrite(pubdate, &YEAR_RULES);
    out.fired(YEAR_TOKEN).then(|| out.text.into_owned())
}

/// Reduce a pubdate to its year, or return it trimmed but otherwise unchanged
/// when it has none.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// # Example
/// ```
/// use pubdate_normalizer::normalize;
///
/// assert_eq!(normalize("Fall 2010"), "2010");
/// assert_eq!(normalize("2003 Jan-Feb"), "2003");
/// assert_eq!(normalize("circa 2000s"), "circa 2000s");
/// ```
pub fn normalize(pubdate: &str) -> String {
    extract_year(pubdate).unwrap_or_else(|| pubdate.trim().to_string())
}

/// Drop a season word in front of a year but keep the rest of the date.
///
/// This is what `id_pubdate` mode emits: "Spring 2003" becomes "2003", while
/// "1999 Nov-Dec" is left alone.
pub fn strip_season(pubdate: &str) -> String {
    rewrite(pubdate, &SEASON_RULES).text.into_owned()
}

/// Normalize one record according to `options.mode` and
/// `options.missing_year`.
///
/// The PMID window in `options` is not consulted here; see [`Normalizer`].
pub fn normalize_record(record: &MetadataRecord, options: &Options) -> Result<NormalizedRecord> {
    normalize_counted(record, options).map(|(out, _)| out)
}

/// As [`normalize_record`], also reporting whether the raw value was passed
/// through for lack of a year.
fn normalize_counted(record: &MetadataRecord, options: &Options) -> Result<(NormalizedRecord, bool)> {
    let id = record.id;
    match options.mode {
        Mode::IdPubdate => Ok((NormalizedRecord { id, value: strip_season(&record.pubdate) }, false)),
        Mode::IdYear => match extract_year(&record.pubdate) {
            Some(year) => Ok((NormalizedRecord { id, value: year }, false)),
            None => match options.missing_year {
                MissingYearPolicy::Fail => Err(Error::MissingYear {
                    location: record.location.clone(),
                    id,
                    pubdate: record.pubdate.clone(),
                }),
                MissingYearPolicy::PassThrough => {
                    tracing::warn!(
                        id,
                        pubdate = %record.pubdate,
                        location = %record.location,
                        "no four-digit year; passing pubdate through"
                    );
                    Ok((NormalizedRecord { id, value: record.pubdate.trim().to_string() }, true))
                }
            },
        },
    }
}

/// Lazy stream of normalized records over input lines.
///
/// Yields one item per emitted record, in input order. Ignored lines and
/// records outside the PMID window produce nothing. After the first error the
/// iterator is exhausted.
#[derive(Debug)]
pub struct Normalizer<I: Iterator> {
    lines: Fuse<I>,
    options: Options,
    framer: Framer,
    summary: RunSummary,
    done: bool,
}

impl<I> Normalizer<I>
where
    I: Iterator<Item = Result<(Location, String)>>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I>, options: Options) -> Self {
        Normalizer { lines: lines.into_iter().fuse(), options, framer: Framer::new(), summary: RunSummary::default(), done: false }
    }

    /// Counters so far. `elapsed` is left at zero; [`run`] fills it in.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    fn next_record(&mut self) -> Result<Option<MetadataRecord>> {
        for item in self.lines.by_ref() {
            let (location, line) = item?;
            self.summary.lines_read += 1;

            let Some(field) = scan_line(&location, &line)? else {
                self.summary.lines_ignored += 1;
                continue;
            };
            if let Some(record) = self.framer.push(location, &line, field)? {
                return Ok(Some(record));
            }
        }
        self.framer.finish()
    }

    fn advance(&mut self) -> Result<Option<NormalizedRecord>> {
        while let Some(record) = self.next_record()? {
            self.summary.records_read += 1;

            if !self.options.admits(record.id) {
                self.summary.records_skipped += 1;
                tracing::debug!(id = record.id, "skipping record outside PMID window");
                continue;
            }

            let (out, passed_through) = normalize_counted(&record, &self.options)?;
            if passed_through {
                self.summary.years_passed_through += 1;
            }
            self.summary.records_emitted += 1;
            return Ok(Some(out));
        }
        Ok(None)
    }
}

impl<I> Iterator for Normalizer<I>
where
    I: Iterator<Item = Result<(Location, String)>>,
{
    type Item = Result<NormalizedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Normalize every record in `lines`, writing `id<TAB>value` rows to
/// `writer`.
///
/// Output is buffered and flushed before returning. On error, rows already
/// emitted have been written; nothing after the offending record is.
pub fn run<I, W>(lines: I, options: &Options, writer: W) -> Result<RunSummary>
where
    I: IntoIterator<Item = Result<(Location, String)>>,
    W: Write,
{
    let start = Instant::now();
    let mut out = BufWriter::new(writer);
    let mut normalizer = Normalizer::new(lines, options.clone());

    for record in normalizer.by_ref() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                out.flush()?;
                return Err(err);
            }
        };
        writeln!(out, "{}", record.to_tsv_line())?;
    }
    out.flush()?;

    let summary = RunSummary { elapsed: start.elapsed(), ..normalizer.summary().clone() };
    tracing::info!(
        emitted = summary.records_emitted,
        skipped = summary.records_skipped,
        passed_through = summary.years_passed_through,
        "done"
    );
    Ok(summary)
}
