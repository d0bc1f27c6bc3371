use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::API_KEY_ENV;

#[derive(Subcommand)]
pub enum Commands {
    /// Fill front matter with details of the first YouTube video linked in each file
    Update(UpdateArgs),
    /// Show the first YouTube link found in each file
    Extract(FilesArgs),
    /// Show the front matter of each file as parsed
    Parse(FilesArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// YouTube Data API v3 key (overrides the configuration file)
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,
    /// Configuration file (defaults to ./tubematter.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Preview changes without modifying files
    #[arg(long)]
    pub dry_run: bool,
    /// Output modified content to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Markdown files or directories
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Markdown files or directories
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
