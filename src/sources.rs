//! Input sources.
//!
//! Inputs are concatenated in argument order, the way `cat a b | ...` would
//! present them, but every line keeps the name of the source it came from so
//! errors can point at `file:line`. Files are opened lazily: an unreadable
//! third file only fails the run once the first two have been consumed.

use crate::{Error, Location, Result};
use flate2::read::MultiGzDecoder;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

const STDIN_NAME: &str = "<stdin>";

/// One input named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    /// A plain file, or a gzip file when the name ends in `.gz`.
    Path(PathBuf),
}

impl Source {
    /// `-` means standard input; anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" { Source::Stdin } else { Source::Path(PathBuf::from(arg)) }
    }

    pub fn name(&self) -> String {
        match self {
            Source::Stdin => STDIN_NAME.to_string(),
            Source::Path(path) => path.display().to_string(),
        }
    }

    fn is_gzip(&self) -> bool {
        matches!(self, Source::Path(path) if path.extension().is_some_and(|ext| ext == "gz"))
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Source::Stdin => Ok(Box::new(io::stdin().lock())),
            Source::Path(path) => {
                let file = File::open(path).map_err(|source| Error::Io { path: self.name(), source })?;
                if self.is_gzip() {
                    Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
                } else {
                    Ok(Box::new(BufReader::new(file)))
                }
            }
        }
    }
}

struct OpenSource {
    name: String,
    reader: Box<dyn BufRead>,
    line: usize,
}

/// Iterator over `(Location, line)` pairs across all sources.
///
/// Line terminators (`\n` or `\r\n`) are stripped. After the first error the
/// iterator is exhausted.
pub struct Lines {
    pending: VecDeque<Source>,
    current: Option<OpenSource>,
    buf: String,
    failed: bool,
}

impl std::fmt::Debug for Lines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lines")
            .field("pending", &self.pending)
            .field("current", &self.current.as_ref().map(|s| (&s.name, s.line)))
            .finish()
    }
}

impl Lines {
    /// Lines from `sources` in order; no sources means standard input.
    pub fn open(sources: Vec<Source>) -> Self {
        let pending = if sources.is_empty() { VecDeque::from([Source::Stdin]) } else { VecDeque::from(sources) };
        Lines { pending, current: None, buf: String::new(), failed: false }
    }

    /// Lines from an already-open reader, reported under `name`.
    pub fn from_reader(name: impl Into<String>, reader: impl BufRead + 'static) -> Self {
        let current = OpenSource { name: name.into(), reader: Box::new(reader), line: 0 };
        Lines { pending: VecDeque::new(), current: Some(current), buf: String::new(), failed: false }
    }

    fn next_line(&mut self) -> Result<Option<(Location, String)>> {
        loop {
            if self.current.is_none() {
                let Some(source) = self.pending.pop_front() else {
                    return Ok(None);
                };
                tracing::debug!(source = %source.name(), "opening input");
                let reader = source.open()?;
                self.current = Some(OpenSource { name: source.name(), reader, line: 0 });
            }

            let Some(open) = self.current.as_mut() else { continue };
            self.buf.clear();
            let read = open
                .reader
                .read_line(&mut self.buf)
                .map_err(|source| Error::Io { path: open.name.clone(), source })?;

            if read == 0 {
                self.current = None;
                continue;
            }

            open.line += 1;
            let text = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
            let text = text.strip_suffix('\r').unwrap_or(text);
            let location = Location { source: open.name.clone(), line: open.line };
            return Ok(Some((location, text.to_string())));
        }
    }
}

impl Iterator for Lines {
    type Item = Result<(Location, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_line() {
            Ok(item) => item.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
