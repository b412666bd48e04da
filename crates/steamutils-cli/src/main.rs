//! steamutils
//!
//! Lists the games a Steam installation knows about and cleans up leftover
//! manifests and install directories.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use steamutils_cli::display::print_warnings;
use steamutils_cli::logging::{LOG_LEVELS, setup_logging};
use steamutils_cli::{
    AssumeYes, CleanupOptions, Confirm, LineConfirm, ListOptions, list_games, run_cleanup,
};
use steamutils_config::{SteamUtilsConfig, resolve_steam_dir};
use steamutils_library::{Catalog, LocalFilesystem, reconcile_with};

#[derive(Parser)]
#[command(name = "steamutils")]
#[command(about = "List installed Steam games and clean up leftover files", long_about = None)]
struct Cli {
    /// Location of the Steam directory (defaults to the configured or detected one)
    #[arg(short = 'd', long, global = true)]
    steam_dir: Option<PathBuf>,

    /// Configuration file to use instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic level on stderr (overrides RUST_LOG)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = LOG_LEVELS)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed games or find a specific game
    List {
        /// Search for a specific game name or app id
        #[arg(short, long, value_name = "NAME")]
        search: Option<String>,

        /// Verbose game details
        #[arg(short, long)]
        verbose: bool,

        /// Dump every manifest field
        #[arg(long, conflicts_with_all = ["verbose", "json"])]
        raw: bool,

        /// Print games as JSON
        #[arg(long, conflicts_with = "verbose")]
        json: bool,
    },

    /// Clean up manifests without a directory and directories without a manifest
    ///
    /// Warning: all file changes are final.
    Clean {
        /// Show what would be deleted without asking or deleting
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Ask and delete even if the config enables dry_run
        #[arg(long, conflicts_with = "dry_run")]
        no_dry_run: bool,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<SteamUtilsConfig> {
    let config = match path {
        Some(path) => SteamUtilsConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => SteamUtilsConfig::load_default().context("Failed to load configuration")?,
    };
    Ok(config)
}

fn build_catalog(cli: &Cli, config: &SteamUtilsConfig) -> Result<Catalog> {
    let steam_dir = resolve_steam_dir(cli.steam_dir.as_deref(), config)?;
    debug!("Cataloging {}", steam_dir.display());
    let catalog = Catalog::build(&steam_dir)?;

    print_warnings(&mut io::stderr().lock(), catalog.warnings())?;
    Ok(catalog)
}

fn cmd_clean(catalog: &Catalog, options: CleanupOptions, yes: bool) -> Result<()> {
    let report = reconcile_with(catalog, &LocalFilesystem)?;

    let stdout = io::stdout();
    if report.is_clean() {
        writeln!(stdout.lock(), "No left over manifests or directories found.")?;
        return Ok(());
    }

    let mut confirm: Box<dyn Confirm> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(LineConfirm::stdio())
    };

    let summary = run_cleanup(&report, confirm.as_mut(), &options, &mut stdout.lock())?;

    info!(
        "Cleanup finished: {} manifests and {} directories deleted, {} skipped",
        summary.manifests_deleted, summary.directories_deleted, summary.skipped
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref());

    let config = load_config(cli.config.as_deref())?;
    let catalog = build_catalog(&cli, &config)?;

    match &cli.command {
        Commands::List {
            search,
            verbose,
            raw,
            json,
        } => {
            let options = ListOptions {
                search: search.as_deref(),
                verbose: *verbose,
                raw: *raw,
                json: *json,
            };
            list_games(&mut io::stdout().lock(), &catalog, &options)
        }
        Commands::Clean {
            dry_run,
            no_dry_run,
            yes,
        } => {
            let dry_run = match (*dry_run, *no_dry_run) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = CleanupOptions::from_config(&config.cleanup, dry_run);
            cmd_clean(&catalog, options, *yes)
        }
    }
}
