//! CLI command implementations.

pub mod common;
pub mod fetch;
pub mod init;
pub mod sources;
pub mod url;
