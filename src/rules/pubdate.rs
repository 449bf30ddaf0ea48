//! Season and year rules

use crate::rules::Rule;
use once_cell::sync::Lazy;

pub const SEASON_YEAR: &str = "season <year>";
pub const YEAR_TOKEN: &str = "year token";

/// "Spring 2003", "summer 1998", "FALL 2010" -> the year alone.
///
/// Only a season word directly in front of a four-digit year is removed; a
/// bare season ("Winter") is left for the year rule to reject.
pub fn rule_season_year() -> Rule {
    rule! {
        name: SEASON_YEAR,
        pattern: r"(?i)\b(?:spring|summer|autumn|fall|winter)\s+([0-9]{4})\b",
        rewrite: |text, caps| {
            let (Some(whole), Some(year)) = (caps.get(0), caps.get(1)) else {
                return text.to_string();
            };
            format!("{}{}{}", &text[..whole.start()], year.as_str(), &text[whole.end()..])
        }
    }
}

/// "2003 Jan-Feb", "1998 Dec-1999 Jan" -> first word-bounded 4-digit run.
///
/// "2000s" and "20031" do not count as years: the run must end on a word
/// boundary.
pub fn rule_year_token() -> Rule {
    rule! {
        name: YEAR_TOKEN,
        pattern: r"\b([0-9]{4})\b",
        rewrite: |text, caps| caps.get(1).map_or_else(|| text.to_string(), |m| m.as_str().to_string())
    }
}

/// The rules applied in `id_pubdate` mode: season stripping only.
pub(crate) static SEASON_RULES: Lazy<Vec<Rule>> = Lazy::new(|| vec![rule_season_year()]);

/// The rules applied when reducing a pubdate to its year, in order.
pub(crate) static YEAR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| vec![rule_season_year(), rule_year_token()]);
