//! Library side of the `regpop` command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod report;
