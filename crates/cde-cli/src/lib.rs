//! Library components of the data model quality CLI.

pub mod logging;
pub mod report;
