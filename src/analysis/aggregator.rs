//! Package version aggregation.
//!
//! This module classifies raw input lines and groups the versions
//! they carry under their package names.

use crate::error::AggregateError;
use crate::models::{Aggregation, PackageVersion, ParsedLine, VERSION_SEPARATOR};
use crate::scanner::LineScanner;
use std::path::Path;
use tracing::{debug, info};

/// Whitespace stripped from both ends of a line.
///
/// Unicode whitespace plus the ASCII information separators `\x1c`..=`\x1f`.
fn is_line_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Classify a single raw line.
///
/// The line is trimmed first. Anything left that contains an `@` is split
/// at the *last* `@`, so scoped names such as `@types/node@20.1.0` or
/// `scope@pkg@1.0.0` keep their inner `@` in the package name.
pub fn parse_line(raw: &str) -> ParsedLine {
    let line = raw.trim_matches(is_line_whitespace);
    if line.is_empty() {
        return ParsedLine::Blank;
    }

    match line.rsplit_once(VERSION_SEPARATOR) {
        Some((name, version)) => ParsedLine::Entry(PackageVersion::new(name, version)),
        None => ParsedLine::NoSeparator,
    }
}

/// Group every line produced by `lines`.
///
/// Stops at the first read error; nothing aggregated so far is returned.
pub fn aggregate<I, E>(lines: I) -> Result<Aggregation, E>
where
    I: IntoIterator<Item = Result<String, E>>,
{
    let mut aggregation = Aggregation::default();

    for (index, line) in lines.into_iter().enumerate() {
        let parsed = parse_line(&line?);
        aggregation.stats.record(&parsed);

        match parsed {
            ParsedLine::Entry(entry) => {
                debug!("Line {}: {}", index + 1, entry);
                aggregation.packages.insert(entry);
            }
            ParsedLine::Blank => debug!("Line {}: blank, skipped", index + 1),
            ParsedLine::NoSeparator => {
                debug!("Line {}: no '{}', skipped", index + 1, VERSION_SEPARATOR)
            }
        }
    }

    Ok(aggregation)
}

/// Open `path` and group the versions it lists.
pub fn aggregate_file(path: &Path) -> Result<Aggregation, AggregateError> {
    let scanner = LineScanner::open(path)?;
    let aggregation = aggregate(scanner)?;

    let stats = &aggregation.stats;
    info!(
        "Read {} lines from {}: {} entries, {} skipped ({} blank, {} without '{}')",
        stats.total,
        path.display(),
        stats.accepted,
        stats.skipped(),
        stats.blank,
        stats.no_separator,
        VERSION_SEPARATOR
    );
    info!(
        "Grouped {} versions under {} packages",
        aggregation.packages.version_count(),
        aggregation.packages.len()
    );

    Ok(aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::io::{self, Write};
    use tempfile::NamedTempFile;

    fn ok_lines(input: &str) -> impl Iterator<Item = Result<String, Infallible>> + '_ {
        input.lines().map(|line| Ok(line.to_string()))
    }

    fn grouped(aggregation: &Aggregation) -> Vec<(String, Vec<String>)> {
        aggregation
            .packages
            .iter()
            .map(|(name, versions)| (name.to_string(), versions.to_vec()))
            .collect()
    }

    fn entry(name: &str, version: &str) -> ParsedLine {
        ParsedLine::Entry(PackageVersion::new(name, version))
    }

    #[test]
    fn test_parse_simple_line() {
        assert_eq!(parse_line("foo@1.0.0"), entry("foo", "1.0.0"));
    }

    #[test]
    fn test_parse_splits_at_last_separator() {
        assert_eq!(parse_line("scope@pkg@1.0.0"), entry("scope@pkg", "1.0.0"));
        assert_eq!(
            parse_line("@types/node@20.1.0"),
            entry("@types/node", "20.1.0")
        );
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(parse_line("  foo@1.0.0 \r"), entry("foo", "1.0.0"));
        assert_eq!(parse_line("\tfoo @ 1.0 "), entry("foo ", " 1.0"));
    }

    #[test]
    fn test_parse_trims_information_separators() {
        assert_eq!(parse_line("foo@1.0.0\x1c"), entry("foo", "1.0.0"));
        assert_eq!(parse_line("\x1f\x1dfoo@1.0.0\x1e"), entry("foo", "1.0.0"));
        assert_eq!(parse_line("\x1c \x1f"), ParsedLine::Blank);
        assert_eq!(parse_line("a\x1cb@1"), entry("a\x1cb", "1"));
    }

    #[test]
    fn test_parse_skipped_lines() {
        assert_eq!(parse_line(""), ParsedLine::Blank);
        assert_eq!(parse_line(" \t "), ParsedLine::Blank);
        assert_eq!(parse_line("not-a-valid-line"), ParsedLine::NoSeparator);
    }

    #[test]
    fn test_parse_empty_name_or_version() {
        assert_eq!(parse_line("@1.0.0"), entry("", "1.0.0"));
        assert_eq!(parse_line("pkg@"), entry("pkg", ""));
        assert_eq!(parse_line("a@b@"), entry("a@b", ""));
    }

    #[test]
    fn test_aggregate_scenario() {
        let input = "foo@1.0.0\nbar@2.0.0\nfoo@1.1.0\n\nnot-a-valid-line\nbaz@scope@3.0.0\n";
        let aggregation = aggregate(ok_lines(input)).unwrap();

        assert_eq!(
            grouped(&aggregation),
            vec![
                ("foo".to_string(), vec!["1.0.0".to_string(), "1.1.0".to_string()]),
                ("bar".to_string(), vec!["2.0.0".to_string()]),
                ("baz@scope".to_string(), vec!["3.0.0".to_string()]),
            ]
        );
        assert_eq!(aggregation.stats.total, 6);
        assert_eq!(aggregation.stats.accepted, 4);
        assert_eq!(aggregation.stats.blank, 1);
        assert_eq!(aggregation.stats.no_separator, 1);
    }

    #[test]
    fn test_aggregate_first_seen_order_ignores_later_repeats() {
        let input = "b@1\na@1\nb@2\nc@1\na@2\nb@3";
        let aggregation = aggregate(ok_lines(input)).unwrap();

        let names: Vec<&str> = aggregation.packages.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_aggregate_retains_duplicates() {
        let aggregation = aggregate(ok_lines("foo@1.0.0\nfoo@1.0.0\n")).unwrap();

        assert_eq!(
            grouped(&aggregation),
            vec![(
                "foo".to_string(),
                vec!["1.0.0".to_string(), "1.0.0".to_string()]
            )]
        );
    }

    #[test]
    fn test_aggregate_empty_input() {
        let aggregation = aggregate(ok_lines("")).unwrap();

        assert!(aggregation.packages.is_empty());
        assert_eq!(aggregation.stats.total, 0);
    }

    #[test]
    fn test_aggregate_stops_on_read_error() {
        let lines = vec![
            Ok("foo@1.0.0".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
            Ok("bar@2.0.0".to_string()),
        ];

        let err = aggregate(lines).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_aggregate_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "foo@1.0.0").unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "foo@2.0.0").unwrap();

        let aggregation = aggregate_file(file.path()).unwrap();

        assert_eq!(
            grouped(&aggregation),
            vec![(
                "foo".to_string(),
                vec!["1.0.0".to_string(), "2.0.0".to_string()]
            )]
        );
        assert_eq!(aggregation.stats.blank, 1);
    }

    #[test]
    fn test_aggregate_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = aggregate_file(&dir.path().join("missing.txt"));

        assert!(matches!(result, Err(AggregateError::FileAccess { .. })));
    }

    #[test]
    fn test_aggregate_file_rejects_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"foo@1.0.0\n\xc3\x28@1\n").unwrap();

        assert!(aggregate_file(file.path()).is_err());
    }
}
