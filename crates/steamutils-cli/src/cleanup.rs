//! Interactive removal of leftover manifests and install directories
//!
//! Every leftover is confirmed on its own through a [`Confirm`]
//! implementation, so the loop can be driven by a terminal, by `--yes`, or
//! by a script in tests.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use steamutils_config::CleanupConfig;
use steamutils_library::{AbsolutePath, GameRecord, ReconcileReport};
use tracing::info;

/// Asks the user a yes/no question
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Prompts on a writer and reads the answer line from a reader
///
/// `y` and `yes` (any case) confirm; anything else, including end of input,
/// declines.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirm<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdout, read from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Confirms everything (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// What the cleanup loop is allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Only report, never ask or delete
    pub dry_run: bool,
    pub manifests: bool,
    pub directories: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            manifests: true,
            directories: true,
        }
    }
}

impl CleanupOptions {
    /// Options from the `[cleanup]` config section
    ///
    /// `dry_run` is the command-line choice (`--dry-run` / `--no-dry-run`)
    /// and takes precedence over the configured value when set.
    pub fn from_config(config: &CleanupConfig, dry_run: Option<bool>) -> Self {
        Self {
            dry_run: dry_run.unwrap_or(config.dry_run),
            manifests: config.manifests,
            directories: config.directories,
        }
    }
}

/// Outcome of a cleanup run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupSummary {
    pub manifests_deleted: usize,
    pub directories_deleted: usize,
    pub skipped: usize,
}

/// Walk a reconciliation report, offering to delete each leftover
///
/// Orphan manifests come first, then orphan directories. Notices go to
/// `out`; a failed deletion stops the run.
pub fn run_cleanup(
    report: &ReconcileReport,
    confirm: &mut dyn Confirm,
    options: &CleanupOptions,
    out: &mut dyn Write,
) -> Result<CleanupSummary> {
    let mut summary = CleanupSummary::default();

    if options.manifests {
        for game in &report.orphan_manifests {
            if clean_manifest(game, confirm, options, out)? {
                summary.manifests_deleted += 1;
            } else {
                summary.skipped += 1;
            }
        }
    }

    if options.directories {
        for dir in &report.orphan_directories {
            if clean_directory(dir, confirm, options, out)? {
                summary.directories_deleted += 1;
            } else {
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn clean_manifest(
    game: &GameRecord,
    confirm: &mut dyn Confirm,
    options: &CleanupOptions,
    out: &mut dyn Write,
) -> Result<bool> {
    writeln!(out)?;
    writeln!(
        out,
        "The directory for {} no longer exists: {}",
        game.name, game.install_path
    )?;

    if options.dry_run {
        writeln!(out, "Would delete manifest file: {}", game.manifest_path)?;
        return Ok(false);
    }

    if !confirm.confirm("Would you like to delete the left over manifest file? ")? {
        return Ok(false);
    }

    fs::remove_file(&game.manifest_path)
        .with_context(|| format!("Failed to delete {}", game.manifest_path))?;
    info!("Deleted manifest {}", game.manifest_path);
    Ok(true)
}

fn clean_directory(
    dir: &AbsolutePath,
    confirm: &mut dyn Confirm,
    options: &CleanupOptions,
    out: &mut dyn Write,
) -> Result<bool> {
    writeln!(out)?;
    writeln!(out, "Found a directory without a matching manifest file: {}", dir)?;

    if options.dry_run {
        writeln!(out, "Would delete directory: {}", dir)?;
        return Ok(false);
    }

    if !confirm.confirm("Would you like to delete the left over directory? ")? {
        return Ok(false);
    }

    fs::remove_dir_all(dir).with_context(|| format!("Failed to delete {}", dir))?;
    info!("Deleted directory {}", dir);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_options_from_config() {
        let config = CleanupConfig {
            dry_run: true,
            manifests: false,
            directories: true,
        };

        let options = CleanupOptions::from_config(&config, None);
        assert!(options.dry_run);
        assert!(!options.manifests);
        assert!(options.directories);

        assert!(!CleanupOptions::from_config(&config, Some(false)).dry_run);

        let config = CleanupConfig::default();
        assert!(!CleanupOptions::from_config(&config, None).dry_run);
        assert!(CleanupOptions::from_config(&config, Some(true)).dry_run);
    }

    #[test]
    fn test_line_confirm_answers() {
        let cases = [
            ("y\n", true),
            ("YES\n", true),
            ("  yes  \n", true),
            ("n\n", false),
            ("yep\n", false),
            ("", false),
        ];

        for (input, expected) in cases {
            let mut output = Vec::new();
            let mut confirm = LineConfirm::new(Cursor::new(input), &mut output);
            assert_eq!(
                confirm.confirm("Delete? ").unwrap(),
                expected,
                "Failed for: {:?}",
                input
            );
            assert_eq!(output, b"Delete? ");
        }
    }

    #[test]
    fn test_empty_report() {
        let mut out = Vec::new();
        let summary = run_cleanup(
            &ReconcileReport::default(),
            &mut AssumeYes,
            &CleanupOptions::default(),
            &mut out,
        )
        .unwrap();

        assert_eq!(summary, CleanupSummary::default());
        assert!(out.is_empty());
    }
}
