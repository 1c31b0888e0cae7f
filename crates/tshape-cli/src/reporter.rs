use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tshape_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

use crate::driver::{CheckOutcome, ShapeSummary};

/// Renders outcomes as text, `tsc` style.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    #[must_use]
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// `candidate.json:error.message - error TS2322: Type 'number' is not ...`
    #[must_use]
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        output.push_str(&self.format_location(diagnostic));
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
        }
        output
    }

    #[must_use]
    pub fn render_check(&self, outcome: &CheckOutcome) -> String {
        if outcome.accepted {
            let verdict = format!(
                "{} is assignable to '{}'.",
                outcome.candidate, outcome.target
            );
            return if self.color {
                verdict.green().to_string()
            } else {
                verdict
            };
        }

        let count = outcome.diagnostics.len();
        let summary = if count == 1 {
            "Found 1 error.".to_string()
        } else {
            format!("Found {count} errors.")
        };
        format!("{}\n\n{summary}", self.render(&outcome.diagnostics))
    }

    /// `type Name = { ... }` followed by one line per property.
    #[must_use]
    pub fn render_shape(&self, summary: &ShapeSummary) -> String {
        let name = if self.color {
            summary.name.bold().to_string()
        } else {
            summary.name.clone()
        };
        let mut out = format!("type {name} = {}", summary.declaration);
        for prop in &summary.properties {
            let mut modifiers = Vec::new();
            if prop.readonly {
                modifiers.push("readonly");
            }
            if prop.optional {
                modifiers.push("optional");
            }
            if prop.method {
                modifiers.push("method");
            }
            out.push_str(&format!("\n  {}: {}", prop.name, prop.ty));
            if !modifiers.is_empty() {
                let note = format!(" ({})", modifiers.join(", "));
                if self.color {
                    out.push_str(&note.dimmed().to_string());
                } else {
                    out.push_str(&note);
                }
            }
        }
        out
    }

    #[must_use]
    pub fn render_list(&self, summaries: &[ShapeSummary]) -> String {
        let mut out = String::new();
        for (index, summary) in summaries.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            let name = if self.color {
                summary.name.bold().to_string()
            } else {
                summary.name.clone()
            };
            out.push_str(&format!("{name}: {}", summary.declaration));
            if summary.weak {
                out.push_str(" (weak)");
            }
        }
        out
    }

    fn format_location(&self, diagnostic: &Diagnostic) -> String {
        let file = diagnostic.file.as_deref().unwrap_or("<candidate>");
        match &diagnostic.property {
            Some(property) => format!("{file}:{property}"),
            None => file.to_string(),
        }
    }

    fn format_related(&self, related: &DiagnosticRelatedInformation) -> String {
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };
        format!("{prefix}: {}", related.message_text)
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.label();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("TS{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

/// Pretty-printed JSON for `--format json`.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
