//! CLI command implementations.

pub mod init;
pub mod names;
pub mod query;
