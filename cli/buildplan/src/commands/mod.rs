//! CLI command implementations.

pub mod check;
pub mod doctor;
pub mod init;
pub mod module;
pub mod resolve;
pub mod target;
