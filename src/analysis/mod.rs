//! Analysis modules.
//!
//! Grouping of parsed package lines lives in [`aggregator`].

pub mod aggregator;

pub use aggregator::*;
