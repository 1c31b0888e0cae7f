#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use tshape_cli::args::{CliArgs, Command, OutputFormat};
use tshape_cli::reporter::{self, Reporter};
use tshape_cli::driver;
use tshape_cli::tracing_config::{self, LogSettings};

const EXIT_SUCCESS: i32 = 0;
/// The candidate was checked and rejected.
const EXIT_DIAGNOSTICS: i32 = 2;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_config::init_tracing(&LogSettings::from_env(
        args.log.as_deref(),
        args.log_format,
    ));

    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    let reporter = Reporter::new(color);

    match &args.command {
        Command::Check(check) => {
            let outcome = driver::check(check)?;
            let output = match args.format {
                OutputFormat::Text => reporter.render_check(&outcome),
                OutputFormat::Json => reporter::to_json(&outcome)?,
            };
            println!("{output}");
            if !outcome.accepted {
                std::process::exit(EXIT_DIAGNOSTICS);
            }
        }
        Command::Intersect(intersect) => {
            let summary = driver::intersect(intersect)?;
            let output = match args.format {
                OutputFormat::Text => reporter.render_shape(&summary),
                OutputFormat::Json => reporter::to_json(&summary)?,
            };
            println!("{output}");
        }
        Command::List(list) => {
            let summaries = driver::list(list)?;
            if summaries.is_empty() {
                eprintln!("no shapes declared in {}", list.declarations.display());
            }
            let output = match args.format {
                OutputFormat::Text => reporter.render_list(&summaries),
                OutputFormat::Json => reporter::to_json(&summaries)?,
            };
            println!("{output}");
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
