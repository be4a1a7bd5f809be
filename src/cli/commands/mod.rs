//! CLI command implementations

pub mod aircraft;
pub mod completions;
pub mod init;
pub mod report;
pub mod table;
