//! CLI library components for the WISP compliance reporter.

pub mod logging;
pub mod pipeline;
