//! Export functionality for health reports.

mod report;

pub use report::*;
