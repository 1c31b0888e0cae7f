//! Command-line front end for the tshape validator.
//!
//! The binary in `src/bin/tshape.rs` is a thin wrapper: it parses [`args`],
//! installs logging via [`tracing_config`], runs a command through
//! [`driver`] and prints the result with [`reporter`].

pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
