//! Library components of the survival analyzer CLI.

pub mod logging;
pub mod report;
pub mod summary;
