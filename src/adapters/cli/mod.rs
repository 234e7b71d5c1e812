//! Command-line host. Parses arguments, feeds the summary port, writes output.

pub mod args;
pub mod runner;

pub use args::CliArgs;
pub use runner::CliRunner;
