//! Log settings for the `tshape` binary.
//!
//! Logging is off unless a filter is given. The filter comes from `--log`,
//! then `TSHAPE_LOG`, then `RUST_LOG`; the output format from `--log-format`,
//! then `TSHAPE_LOG_FORMAT`. Filters use `RUST_LOG` syntax.
//!
//! ```bash
//! tshape --log debug check decls.json -t SquareConfig -c candidate.json
//! TSHAPE_LOG="tshape_solver::validate=trace" TSHAPE_LOG_FORMAT=tree tshape check ...
//! ```
//!
//! Log output always goes to stderr; reports own stdout.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "TSHAPE_LOG";
pub const LOG_FORMAT_ENV: &str = "TSHAPE_LOG_FORMAT";
const FALLBACK_LOG_ENV: &str = "RUST_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Flat `fmt` lines.
    #[default]
    Text,
    /// Indented spans via `tracing-tree`; the easiest to follow per property.
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a `TSHAPE_LOG_FORMAT` value; anything unknown is `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::from_str(value.trim(), true).unwrap_or_default()
    }
}

/// Where logging should go, once flags and environment are combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `None` leaves logging off.
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl LogSettings {
    /// Combine command-line values with variables read through `var`.
    ///
    /// Empty values count as unset.
    pub fn resolve(
        cli_filter: Option<&str>,
        cli_format: Option<LogFormat>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |value: String| (!value.trim().is_empty()).then_some(value);
        let filter = cli_filter
            .map(str::to_string)
            .and_then(non_empty)
            .or_else(|| var(LOG_ENV).and_then(non_empty))
            .or_else(|| var(FALLBACK_LOG_ENV).and_then(non_empty));
        let format = cli_format
            .or_else(|| var(LOG_FORMAT_ENV).map(|value| LogFormat::parse(&value)))
            .unwrap_or_default();
        Self { filter, format }
    }

    /// [`resolve`](Self::resolve) against the process environment.
    pub fn from_env(cli_filter: Option<&str>, cli_format: Option<LogFormat>) -> Self {
        Self::resolve(cli_filter, cli_format, |name| std::env::var(name).ok())
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.filter.is_some()
    }

    /// The `EnvFilter` for these settings; invalid directives are skipped.
    #[must_use]
    pub fn env_filter(&self) -> Option<EnvFilter> {
        self.filter
            .as_deref()
            .map(|directives| EnvFilter::builder().parse_lossy(directives))
    }
}

/// Install the global subscriber described by `settings`.
///
/// Does nothing when logging is off.
pub fn init_tracing(settings: &LogSettings) {
    let Some(filter) = settings.env_filter() else {
        return;
    };

    match settings.format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
