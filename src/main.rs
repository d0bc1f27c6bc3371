use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tubematter::{
    args::{Commands, UpdateArgs},
    config::Config,
    core::{find_link, front_matter, FrontMatterMap},
    fetch::YouTubeClient,
    io::{read_to_string, resolve_files, ConsoleNotifier, FileStore, MemoryStore},
    update::Updater,
};

#[derive(Parser)]
#[command(name = "tubematter", version, about, long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Update(args) => update(args).await,
        Commands::Extract(args) => extract(&args.files),
        Commands::Parse(args) => parse(&args.files),
    }
}

async fn update(args: UpdateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let config = Config::discover(args.config.as_deref(), &cwd)
        .context("failed to load configuration")?
        .with_api_key(args.api_key);

    let client = YouTubeClient::new().context("failed to build HTTP client")?;
    let updater = Updater::new(client, config);
    let notifier = ConsoleNotifier::new();
    let preview_notifier = ConsoleNotifier::preview();

    let files = resolve_files(&args.files);
    if files.is_empty() {
        warn!("no markdown files to update");
    }

    let mut failures = 0;
    for file in &files {
        let notice = if args.dry_run || args.stdout {
            let content = match read_to_string(file) {
                Ok(content) => content,
                Err(e) => {
                    error!("{}: {}", file.display(), e);
                    failures += 1;
                    continue;
                }
            };
            let preview = MemoryStore::new().with_document(file.clone(), content);
            let notice = updater
                .update_document(&preview, file, &preview_notifier)
                .await;
            if notice.is_success() {
                if args.dry_run {
                    println!("--- Dry run: {} ---", file.display());
                }
                if let Some(text) = preview.get(file) {
                    print!("{text}");
                }
            }
            notice
        } else {
            updater.update_document(&FileStore, file, &notifier).await
        };

        if !notice.is_success() {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} files were not updated", failures, files.len());
    }
    Ok(())
}

fn extract(paths: &[PathBuf]) -> Result<()> {
    for file in resolve_files(paths) {
        let content = read_to_string(&file)?;
        match find_link(&content) {
            Some(link) => {
                let id = link.video_id.map(|id| id.to_string());
                println!(
                    "{}: video={} playlist={} index={}",
                    file.display(),
                    id.as_deref().unwrap_or("-"),
                    link.playlist_id.as_deref().unwrap_or("-"),
                    link.index.map(|i| i.to_string()).unwrap_or_else(|| "-".into()),
                );
            }
            None => println!("{}: no YouTube link", file.display()),
        }
    }
    Ok(())
}

fn parse(paths: &[PathBuf]) -> Result<()> {
    let files = resolve_files(paths);
    let mut results: BTreeMap<String, FrontMatterMap> = BTreeMap::new();
    for file in &files {
        let content = read_to_string(file)?;
        results.insert(display(file), front_matter::parse(&content));
    }

    let yaml = if files.len() == 1 {
        match results.values().next() {
            Some(map) => serde_yaml::to_string(map)?,
            None => return Ok(()),
        }
    } else {
        serde_yaml::to_string(&results)?
    };
    print!("{yaml}");
    Ok(())
}

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
