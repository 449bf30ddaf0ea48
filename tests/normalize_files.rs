//! Integration tests over on-disk inputs.

use flate2::Compression;
use flate2::write::GzEncoder;
use pubdate_normalizer::{Error, Lines, MissingYearPolicy, Mode, Options, Source, run};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const FIRST: &str = r#"[
  {
    "id": 12345,
    "title": "Seasonal variation in Summer 1990 admissions",
    "pubdate": "Spring 2003"
  },
  {
    "id": 67890,
    "pubdate": "1999 Nov-Dec"
  }
]
"#;

const SECOND: &str = r#"[
  {
    "id": 24680,
    "pubdate": "2003 Jan-Feb"
  },
  {
    "id": 13579,
    "pubdate": "circa 2000s"
  }
]
"#;

fn write_plain(dir: &Path, name: &str, body: &str) -> Source {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fixture");
    Source::Path(path)
}

fn write_gzip(dir: &Path, name: &str, body: &str) -> Source {
    let path = dir.join(name);
    let mut enc = GzEncoder::new(File::create(&path).expect("create fixture"), Compression::default());
    enc.write_all(body.as_bytes()).expect("compress fixture");
    enc.finish().expect("finish gzip");
    Source::Path(path)
}

fn normalize_sources(sources: Vec<Source>, options: &Options) -> Result<String, Error> {
    let mut out = Vec::new();
    run(Lines::open(sources), options, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn files_are_concatenated_in_argument_order() {
    let dir = TempDir::new().unwrap();
    let sources = vec![write_plain(dir.path(), "b.json", SECOND), write_plain(dir.path(), "a.json", FIRST)];

    let out = normalize_sources(sources, &Options::default()).unwrap();

    assert_eq!(out, "24680\t2003\n13579\tcirca 2000s\n12345\t2003\n67890\t1999\n");
}

#[test]
fn gzip_and_plain_inputs_mix() {
    let dir = TempDir::new().unwrap();
    let sources = vec![write_gzip(dir.path(), "first.json.gz", FIRST), write_plain(dir.path(), "second.json", SECOND)];
    let options = Options { mode: Mode::IdPubdate, ..Options::default() };

    let out = normalize_sources(sources, &options).unwrap();

    assert_eq!(out, "12345\t2003\n67890\t1999 Nov-Dec\n24680\t2003 Jan-Feb\n13579\tcirca 2000s\n");
}

#[test]
fn missing_year_fail_policy_aborts_with_location() {
    let dir = TempDir::new().unwrap();
    let sources = vec![write_plain(dir.path(), "second.json", SECOND)];
    let options = Options { missing_year: MissingYearPolicy::Fail, ..Options::default() };

    match normalize_sources(sources, &options) {
        Err(Error::MissingYear { id, pubdate, location }) => {
            assert_eq!(id, 13579);
            assert_eq!(pubdate, "circa 2000s");
            assert!(location.source.ends_with("second.json"));
            assert_eq!(location.line, 8);
        }
        other => panic!("expected MissingYear, got {other:?}"),
    }
}

#[test]
fn unreadable_file_aborts_after_earlier_output() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let sources = vec![write_plain(dir.path(), "first.json", FIRST), Source::Path(missing.clone())];

    let mut out = Vec::new();
    let err = run(Lines::open(sources), &Options::default(), &mut out).unwrap_err();

    // The first file's last record is only flushed at end of input, so only
    // the first row made it out.
    assert_eq!(String::from_utf8(out).unwrap(), "12345\t2003\n");
    match err {
        Error::Io { path, .. } => assert_eq!(path, missing.display().to_string()),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn malformed_id_names_file_and_line() {
    let dir = TempDir::new().unwrap();
    let body = "{\n  \"id\": \"PMC12345\",\n  \"pubdate\": \"2003\"\n}\n";
    let sources = vec![write_plain(dir.path(), "bad.json", body)];

    let err = normalize_sources(sources, &Options::default()).unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("bad.json:2"), "{msg}");
    assert!(msg.contains("\"PMC12345\""), "{msg}");
}

#[test]
fn pmid_window_and_summary() {
    let dir = TempDir::new().unwrap();
    let sources = vec![write_plain(dir.path(), "a.json", FIRST), write_plain(dir.path(), "b.json", SECOND)];
    let options = Options { pmid_greater_than: Some(13579), pmid_less_than: Some(67890), ..Options::default() };

    let mut out = Vec::new();
    let summary = run(Lines::open(sources), &options, &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "24680\t2003\n");
    assert_eq!(summary.records_read, 4);
    assert_eq!(summary.records_skipped, 3);
    assert_eq!(summary.records_emitted, 1);
    assert_eq!(summary.years_passed_through, 0);
}
