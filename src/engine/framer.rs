//! Record framing.
//!
//! The input has no explicit record delimiters: a record starts at an `id`
//! line and owns every `pubdate` line up to the next `id`. The framer holds at
//! most one pending record, so memory stays constant however long the stream.
//!
//! Policy for irregular input:
//!
//! - several `pubdate` lines for one id: the last one wins;
//! - a `pubdate` before any `id`: malformed;
//! - an `id` that never receives a `pubdate`: malformed.

use super::scanner::Field;
use crate::{Error, Location, MetadataRecord, Result};

#[derive(Debug)]
struct Pending {
    id: u64,
    id_location: Location,
    id_line: String,
    pubdate: Option<(String, Location)>,
}

impl Pending {
    fn complete(self) -> Result<MetadataRecord> {
        match self.pubdate {
            Some((pubdate, location)) => Ok(MetadataRecord { id: self.id, pubdate, location }),
            None => Err(Error::malformed(
                &self.id_location,
                &self.id_line,
                format!("id {} has no pubdate before the next record", self.id),
            )),
        }
    }
}

/// Accumulates fields into [`MetadataRecord`]s.
#[derive(Debug, Default)]
pub struct Framer {
    pending: Option<Pending>,
}

impl Framer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one field. Returns the previous record when `field` starts a new one.
    pub fn push(&mut self, location: Location, line: &str, field: Field) -> Result<Option<MetadataRecord>> {
        match field {
            Field::Id(id) => {
                let next = Pending { id, id_location: location, id_line: line.to_string(), pubdate: None };
                self.pending.replace(next).map(Pending::complete).transpose()
            }
            Field::Pubdate(pubdate) => {
                let Some(pending) = self.pending.as_mut() else {
                    return Err(Error::malformed(&location, line, "pubdate without a preceding id"));
                };
                if let Some((previous, _)) = &pending.pubdate {
                    tracing::debug!(id = pending.id, %previous, replacement = %pubdate, "later pubdate replaces earlier one");
                }
                pending.pubdate = Some((pubdate, location));
                Ok(None)
            }
        }
    }

    /// Flush the pending record at end of input.
    pub fn finish(&mut self) -> Result<Option<MetadataRecord>> {
        self.pending.take().map(Pending::complete).transpose()
    }
}
