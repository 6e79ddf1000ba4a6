//! Logging setup.
//!
//! The engine reports through the `log` facade only; binaries and tests that
//! want to see composition diagnostics call [`init_logging`] once.

mod init;

pub use init::{LoggingConfig, init_logging};
