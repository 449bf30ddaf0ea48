use pubdate_normalizer::{Mode, Options, RunSummary};

use std::fmt::Display;

/// Roles in the summary, each mapped to one SGR parameter string.
#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Rule,
    Count,
    Warn,
    Faint,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Heading => "1;36",
            Tone::Rule => "90",
            Tone::Count => "32",
            Tone::Warn => "33",
            Tone::Faint => "2",
        }
    }
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, tone: Tone, text: impl Display) -> String {
        if self.color { format!("\x1b[{}m{text}\x1b[0m", tone.sgr()) } else { text.to_string() }
    }
}

/// Print the end-of-run summary to stderr; stdout carries only TSV rows.
pub fn print_summary(options: &Options, summary: &RunSummary, color: bool) {
    eprint!("{}", render_summary(options, summary, color));
}

fn render_summary(options: &Options, summary: &RunSummary, color: bool) -> String {
    let p = Painter { color };
    let mut out = String::new();

    let mode = match options.mode {
        Mode::IdYear => "id_year",
        Mode::IdPubdate => "id_pubdate",
    };
    out.push_str(&format!("\n{}\n", p.paint(Tone::Heading, format_args!("normalize-pubdates ({mode})"))));

    out.push_str(&format!("{}\n", p.paint(Tone::Rule, "━━━ Input ━━━")));
    out.push_str(&format!(
        "  Lines: {}  │  Ignored: {}  │  Records: {}\n",
        summary.lines_read,
        p.paint(Tone::Faint, summary.lines_ignored),
        summary.records_read,
    ));

    out.push_str(&format!("{}\n", p.paint(Tone::Rule, "━━━ Output ━━━")));
    out.push_str(&format!("  Emitted: {}\n", p.paint(Tone::Count, summary.records_emitted)));
    if summary.records_skipped > 0 {
        out.push_str(&format!(
            "  Skipped: {} {}\n",
            p.paint(Tone::Warn, summary.records_skipped),
            p.paint(Tone::Faint, pmid_window(options)),
        ));
    }
    if summary.years_passed_through > 0 {
        out.push_str(&format!(
            "  No year: {} {}\n",
            p.paint(Tone::Warn, summary.years_passed_through),
            p.paint(Tone::Faint, "(raw pubdate emitted)"),
        ));
    }

    out.push_str(&format!("  Elapsed: {}\n", p.paint(Tone::Faint, format_args!("{:?}", summary.elapsed))));
    out
}

fn pmid_window(options: &Options) -> String {
    match (options.pmid_greater_than, options.pmid_less_than) {
        (Some(lower), Some(upper)) => format!("(outside {lower} < id < {upper})"),
        (Some(lower), None) => format!("(id <= {lower})"),
        (None, Some(upper)) => format!("(id >= {upper})"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_summary_has_no_escape_codes() {
        let summary = RunSummary { lines_read: 10, records_read: 4, records_emitted: 3, records_skipped: 1, ..Default::default() };
        let options = Options { pmid_greater_than: Some(500), ..Options::default() };

        let text = render_summary(&options, &summary, false);

        assert!(!text.contains('\x1b'));
        assert!(text.contains("normalize-pubdates (id_year)"));
        assert!(text.contains("Emitted: 3"));
        assert!(text.contains("Skipped: 1 (id <= 500)"));
        assert!(!text.contains("No year"));
    }

    #[test]
    fn colored_summary_wraps_counts() {
        let summary = RunSummary { records_emitted: 2, years_passed_through: 1, ..Default::default() };
        let text = render_summary(&Options::default(), &summary, true);

        assert!(text.contains("\x1b[32m2\x1b[0m"));
        assert!(text.contains("\x1b[33m1\x1b[0m"));
        assert!(text.contains("\x1b[1;36mnormalize-pubdates (id_year)\x1b[0m"));
        assert!(text.contains("No year"));
    }
}
