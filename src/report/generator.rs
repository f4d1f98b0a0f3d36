//! Text report generation.
//!
//! Each package becomes one line of the form `name (v1, v2, v3)`,
//! emitted in the order the package was first seen.

use crate::models::PackageVersionMap;
use std::io::{self, Write};

/// Separator placed between versions inside the parentheses.
const VERSION_LIST_SEPARATOR: &str = ", ";

/// Format one summary line, without a trailing newline.
pub fn format_package_line(name: &str, versions: &[String]) -> String {
    format!("{} ({})", name, versions.join(VERSION_LIST_SEPARATOR))
}

/// Write the report to `writer`, one newline-terminated line per package.
pub fn write_report<W: Write>(packages: &PackageVersionMap, writer: &mut W) -> io::Result<()> {
    for (name, versions) in packages.iter() {
        writeln!(writer, "{}", format_package_line(name, versions))?;
    }
    Ok(())
}
