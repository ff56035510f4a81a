//! Reporting utilities: price formatting and terminal summaries.
//!
//! We keep formatting code in one place so:
//! - encoding/evaluation code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
