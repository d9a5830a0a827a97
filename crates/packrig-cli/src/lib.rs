//! Library half of the packrig CLI, split out so integration tests can drive
//! commands directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
