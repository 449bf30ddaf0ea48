mod report;

use pubdate_normalizer::{Error, Lines, MissingYearPolicy, Mode, Options, Source, run};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(config.verbosity);

    let lines = Lines::open(config.sources);
    let stdout = io::stdout().lock();
    match run(lines, &config.options, stdout) {
        Ok(summary) => {
            if config.stats {
                report::print_summary(&config.options, &summary, config.color);
            }
        }
        Err(Error::Output(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

struct CliConfig {
    sources: Vec<Source>,
    options: Options,
    stats: bool,
    color: bool,
    verbosity: Verbosity,
}

fn init_logging(verbosity: Verbosity) {
    let level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("pubdate_normalizer={level},normalize_pubdates={level}")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_args() -> Result<CliConfig, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from(args: impl IntoIterator<Item = String>) -> Result<CliConfig, String> {
    let mut sources = Vec::new();
    let mut options = Options::default();
    let mut stats = false;
    let mut color = io::stderr().is_terminal();
    let mut verbosity = Verbosity::Normal;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("normalize-pubdates {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--stats" => stats = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "-v" | "--verbose" => verbosity = Verbosity::Verbose,
            "-q" | "--quiet" => verbosity = Verbosity::Quiet,
            "-" => sources.push(Source::Stdin),
            "--mode" => {
                let value = args.next().ok_or_else(|| "error: --mode expects a value".to_string())?;
                options.mode = parse_mode(&value)?;
            }
            "--missing-year" => {
                let value = args.next().ok_or_else(|| "error: --missing-year expects a value".to_string())?;
                options.missing_year = parse_policy(&value)?;
            }
            "--gt" => {
                let value = args.next().ok_or_else(|| "error: --gt expects a PMID".to_string())?;
                options.pmid_greater_than = Some(parse_pmid("--gt", &value)?);
            }
            "--lt" => {
                let value = args.next().ok_or_else(|| "error: --lt expects a PMID".to_string())?;
                options.pmid_less_than = Some(parse_pmid("--lt", &value)?);
            }
            "--" => {
                sources.extend(args.by_ref().map(|a| Source::from_arg(&a)));
                break;
            }
            _ if arg.starts_with("--mode=") => {
                options.mode = parse_mode(arg.trim_start_matches("--mode="))?;
            }
            _ if arg.starts_with("--missing-year=") => {
                options.missing_year = parse_policy(arg.trim_start_matches("--missing-year="))?;
            }
            _ if arg.starts_with("--gt=") => {
                options.pmid_greater_than = Some(parse_pmid("--gt", arg.trim_start_matches("--gt="))?);
            }
            _ if arg.starts_with("--lt=") => {
                options.pmid_less_than = Some(parse_pmid("--lt", arg.trim_start_matches("--lt="))?);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
            _ => sources.push(Source::from_arg(&arg)),
        }
    }

    if let (Some(lower), Some(upper)) = (options.pmid_greater_than, options.pmid_less_than) {
        if lower >= upper {
            return Err(format!("error: empty PMID window (--gt {lower} is not below --lt {upper})"));
        }
    }

    Ok(CliConfig { sources, options, stats, color, verbosity })
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    value.parse().map_err(|err| format!("error: --mode: {err}"))
}

fn parse_policy(value: &str) -> Result<MissingYearPolicy, String> {
    value.parse().map_err(|err| format!("error: --missing-year: {err}"))
}

fn parse_pmid(flag: &str, value: &str) -> Result<u64, String> {
    value.parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a PMID)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "normalize-pubdates {version}

Reduce PubMed metadata records to id<TAB>year (or id<TAB>pubdate) rows.

Usage:
  normalize-pubdates [OPTIONS] [FILE...]

Reads the key/value metadata printed by the extraction tool from each FILE
in order (`-` or no files: stdin; `.gz` files are decompressed).

Options:
  --mode <id_year|id_pubdate>   Output column: four-digit year (default) or
                                the publication date without year truncation.
  --missing-year <pass|fail>    id_year mode, pubdate without a year: emit it
                                unchanged with a warning (default) or abort.
  --gt <PMID>                   Only emit records with id greater than PMID.
  --lt <PMID>                   Only emit records with id less than PMID.
  --stats                       Print a run summary to stderr.
  --color                       Force ANSI color in the summary.
  --no-color                    Disable ANSI color in the summary.
  -v, --verbose                 Debug logging on stderr.
  -q, --quiet                   Only log errors.
  -h, --help                    Show this help message.
  -V, --version                 Print version information.

Exit codes:
  0  Success.
  1  Malformed record, missing year (with --missing-year fail) or I/O error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
