//! Data models for package version aggregation.
//!
//! This module contains the core data structures used throughout
//! the application for representing parsed lines, the grouped
//! package map, and scan statistics.

use indexmap::IndexMap;
use std::fmt;

/// Separator between the package name and its version.
pub const VERSION_SEPARATOR: char = '@';

/// A single `name@version` entry parsed from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    /// Everything before the last `@`. May itself contain `@`.
    pub name: String,
    /// Everything after the last `@`.
    pub version: String,
}

impl PackageVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, VERSION_SEPARATOR, self.version)
    }
}

/// Classification of one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Empty or whitespace-only line.
    Blank,
    /// Non-blank line with no `@` in it.
    NoSeparator,
    /// A usable package entry.
    Entry(PackageVersion),
}

/// Versions grouped by package name.
///
/// Keys iterate in the order they were first inserted and each
/// version list keeps every value in the order it was pushed,
/// duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageVersionMap {
    packages: IndexMap<String, Vec<String>>,
}

impl PackageVersionMap {
    /// Append a version under its package name.
    pub fn insert(&mut self, entry: PackageVersion) {
        self.packages
            .entry(entry.name)
            .or_default()
            .push(entry.version);
    }

    /// Iterate packages in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.packages
            .iter()
            .map(|(name, versions)| (name.as_str(), versions.as_slice()))
    }

    /// Number of distinct package names.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Total number of versions across all packages.
    pub fn version_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }
}

/// Counters collected while scanning an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Lines read from the input.
    pub total: usize,
    /// Lines that produced a package entry.
    pub accepted: usize,
    /// Blank or whitespace-only lines.
    pub blank: usize,
    /// Lines without any `@`.
    pub no_separator: usize,
}

impl LineStats {
    /// Record the classification of one line.
    pub fn record(&mut self, line: &ParsedLine) {
        self.total += 1;
        match line {
            ParsedLine::Blank => self.blank += 1,
            ParsedLine::NoSeparator => self.no_separator += 1,
            ParsedLine::Entry(_) => self.accepted += 1,
        }
    }

    /// Lines that were skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.blank + self.no_separator
    }
}

/// Result of aggregating one input.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Grouped versions.
    pub packages: PackageVersionMap,
    /// Scan statistics.
    pub stats: LineStats,
}
