//! booklog-tool command line interface
//!
//! Argument parsing, logging setup, and the top-level run loop behind the
//! `booklog-tool` binary.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod logging;

pub use app::{run, BASE_URL_ENV};
pub use cli::{command, usage_exit_code, Invocation};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
