//! Report generation.
//!
//! Renders the grouped package map as plain text summary lines.

pub mod generator;

pub use generator::write_report;
