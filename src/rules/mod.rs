//! Pubdate rewrite rules.
//!
//! A free-text publication date is reduced to its year by running an ordered
//! list of [`Rule`]s over it. Each rule looks for its first match in the
//! current text and, if one is found, rewrites the text. The next rule then
//! sees the rewritten value.
//!
//! ```text
//! "Spring 2003 Mar-May"
//!     │  season <year>   (strip a season word in front of a year)
//!     v
//! "2003 Mar-May"
//!     │  year token      (keep the first word-bounded 4-digit run)
//!     v
//! "2003"
//! ```
//!
//! Rules are plain data (a name, a static regex, a rewrite function) so the
//! order of application is explicit and each step is traceable by name.

use regex::{Captures, Regex};
use std::borrow::Cow;

pub(crate) mod pubdate;


/// A single named rewrite over a pubdate string.
pub(crate) struct Rule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    /// Receives the whole current text and the captures of the first match.
    pub rewrite: fn(&str, &Captures<'_>) -> String,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).field("pattern", &self.pattern.as_str()).finish()
    }
}

impl Rule {
    /// Apply the rule to `text`, returning `None` when the pattern does not match.
    pub fn apply(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        Some((self.rewrite)(text, &caps))
    }
}

/// Outcome of running the rule list over one pubdate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rewritten<'a> {
    pub text: Cow<'a, str>,
    /// Names of the rules that matched, in application order.
    pub fired: Vec<&'static str>,
}

impl Rewritten<'_> {
    pub fn fired(&self, name: &str) -> bool {
        self.fired.iter().any(|n| *n == name)
    }
}

/// Run `rules` over `input` in order.
pub(crate) fn rewrite<'a>(input: &'a str, rules: &[Rule]) -> Rewritten<'a> {
    let mut text = Cow::Borrowed(input.trim());
    let mut fired = Vec::new();

    for rule in rules {
        if let Some(next) = rule.apply(&text) {
            fired.push(rule.name);
            text = Cow::Owned(next);
        }
    }

    Rewritten { text, fired }
}
