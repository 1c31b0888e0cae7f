use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::tracing_config::LogFormat;

/// CLI arguments for the tshape binary.
#[derive(Parser, Debug)]
#[command(
    name = "tshape",
    version,
    about = "Structural shape validator: excess-property checks and intersection shapes"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable color in text output. Defaults to on when stdout is a terminal.
    #[arg(long, global = true)]
    pub pretty: Option<bool>,

    /// Log filter in `RUST_LOG` syntax; overrides `TSHAPE_LOG`.
    #[arg(long, value_name = "FILTER", global = true)]
    pub log: Option<String>,

    /// Log output format; overrides `TSHAPE_LOG_FORMAT`.
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a candidate object against a declared shape.
    Check(CheckArgs),
    /// Print the merged shape of an intersection.
    Intersect(IntersectArgs),
    /// List the shapes and aliases of a declaration document.
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Declaration document (JSON).
    pub declarations: PathBuf,

    /// Target type: a declared name or an expression such as `A & B`.
    #[arg(short = 't', long)]
    pub target: String,

    /// Candidate object (JSON).
    #[arg(short = 'c', long)]
    pub candidate: PathBuf,

    /// Treat the candidate as a value bound to a variable rather than a literal.
    #[arg(long)]
    pub regular: bool,

    /// Check a type assertion (`candidate as Target`) instead of an assignment.
    #[arg(long, conflicts_with = "regular")]
    pub assert: bool,

    /// Report every error instead of stopping early.
    #[arg(long, conflicts_with = "first_error")]
    pub all_errors: bool,

    /// Stop at the first error.
    #[arg(long)]
    pub first_error: bool,

    /// Reject regular candidates sharing no property with an all-optional shape.
    #[arg(long)]
    pub weak_type_detection: bool,

    /// Reject an explicit `undefined` for optional properties.
    #[arg(long)]
    pub exact_optional_property_types: bool,
}

#[derive(Args, Debug)]
pub struct IntersectArgs {
    /// Declaration document (JSON).
    pub declarations: PathBuf,

    /// Shapes to intersect, left to right.
    #[arg(required = true, num_args = 2..)]
    pub shapes: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Declaration document (JSON).
    pub declarations: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
