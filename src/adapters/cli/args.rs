//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Simplify emergency-room discharge instructions into a categorized summary.
#[derive(Debug, Clone, Parser)]
#[command(name = "promptrx", version, about)]
pub struct CliArgs {
    /// Discharge instructions file (.txt, .pdf, or .csv with an `instruction` column)
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Discharge instructions given inline instead of a file
    #[arg(long)]
    pub text: Option<String>,

    /// Model identifier passed to the rewriting service
    #[arg(long)]
    pub model: Option<String>,

    /// Simplification style (instruction_simplification, medication_clarity,
    /// task_extraction, warning_highlight, tone_support)
    #[arg(long)]
    pub intent: Option<String>,

    /// Print the categorized preview as JSON instead of writing a PDF
    #[arg(long)]
    pub preview: bool,

    /// Where to write the PDF (defaults to the standard report filename)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Maximum rewriting calls in flight
    #[arg(long)]
    pub concurrency: Option<usize>,
}
