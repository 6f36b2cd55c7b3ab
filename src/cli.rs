use clap::Parser;
use std::path::PathBuf;

/// eslint-suppress CLI options.
#[derive(Debug, Parser)]
#[command(
    name = "eslint-suppress",
    version,
    about = "Suppress pre-existing ESLint errors with disable-next-line directives"
)]
pub struct Args {
    /// Files/directories to process.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Only suppress these rule ids (comma-separated). Defaults to every
    /// error-severity rule.
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// Explanation appended to newly created directives.
    #[arg(long)]
    pub message: Option<String>,

    /// ESLint binary to invoke.
    #[arg(long)]
    pub eslint_bin: Option<String>,

    /// Inline ESLint config (JSON), replacing project config resolution.
    #[arg(long)]
    pub base_config: Option<String>,

    /// Path to an eslint-suppress.toml config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report what would change without writing files.
    #[arg(long)]
    pub dry_run: bool,
}
