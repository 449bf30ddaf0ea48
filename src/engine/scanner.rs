//! Line classification.
//!
//! The upstream extractor prints one `key: value` pair per line. Only `id` and
//! `pubdate` keys matter; every other line (braces, other keys, blanks) is
//! ignored. A line that *is* keyed but whose value cannot be read fails the
//! run instead of being dropped.

use crate::{Error, Location, Result};

/// A recognised field from one keyed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Id(u64),
    Pubdate(String),
}

/// Classify `line`, returning `None` for lines that carry neither key.
pub fn scan_line(location: &Location, line: &str) -> Result<Option<Field>> {
    let Some(caps) = regex!(r#"^\s*"?(id|pubdate)"?\s*:\s*(.*?)\s*$"#).captures(line) else {
        return Ok(None);
    };
    let (Some(key), Some(raw)) = (caps.get(1), caps.get(2)) else {
        return Ok(None);
    };

    let raw = raw.as_str();
    let raw = raw.strip_suffix(',').unwrap_or(raw).trim_end();
    let value = unquote(location, line, raw)?;
    if let Some(c) = value.chars().find(|c| c.is_control()) {
        return Err(Error::malformed(location, line, format!("value contains control character {c:?}")));
    }

    match key.as_str() {
        "id" => parse_id(location, line, &value).map(|id| Some(Field::Id(id))),
        _ => Ok(Some(Field::Pubdate(value))),
    }
}

/// Decode a JSON string literal, or pass an unquoted value through. Bare
/// `null` reads as an empty value.
fn unquote(location: &Location, line: &str, raw: &str) -> Result<String> {
    if raw.starts_with('"') {
        return serde_json::from_str::<String>(raw)
            .map(|s| s.trim().to_string())
            .map_err(|err| Error::malformed(location, line, format!("unreadable quoted value ({err})")));
    }
    if raw == "null" {
        return Ok(String::new());
    }
    Ok(raw.to_string())
}

fn parse_id(location: &Location, line: &str, value: &str) -> Result<u64> {
    let digits_end = value.find(|c: char| !c.is_ascii_digit()).unwrap_or(value.len());
    let (digits, rest) = value.split_at(digits_end);

    if digits.is_empty() {
        let reason = if value.is_empty() { "empty id".to_string() } else { format!("id {value:?} is not numeric") };
        return Err(Error::malformed(location, line, reason));
    }

    let id: u64 =
        digits.parse().map_err(|_| Error::malformed(location, line, format!("id {digits} does not fit in 64 bits")))?;
    if id == 0 {
        return Err(Error::malformed(location, line, "id must be positive"));
    }
    if !rest.is_empty() {
        tracing::debug!(%location, id, trailing = rest, "ignoring text after id digits");
    }

    Ok(id)
}
