//! Plain-text output for game listings

use std::io::{self, Write};
use steamutils_library::{GameRecord, ManifestWarning};

const SIZE_SUFFIXES: [&str; 8] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB"];

/// Format a byte count with 1024-based units and one decimal
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for suffix in SIZE_SUFFIXES {
        if size < 1024.0 {
            return format!("{:.1}{}", size, suffix);
        }
        size /= 1024.0;
    }
    format!("{:.1}YB", size)
}

/// One row per game: name, app id, install location
pub fn print_games(out: &mut dyn Write, games: &[&GameRecord]) -> io::Result<()> {
    writeln!(out, "{:<50} {:<10} {}", "Name", "App Id", "Location")?;
    for game in games {
        writeln!(
            out,
            "{:<50} {:<10} {}",
            game.name, game.app_id, game.install_path
        )?;
    }
    Ok(())
}

/// A block of details per game
pub fn print_detailed_games(out: &mut dyn Write, games: &[&GameRecord]) -> io::Result<()> {
    for game in games {
        writeln!(out)?;
        writeln!(out, "name: {}", game.name)?;
        writeln!(out, "appid: {}", game.app_id)?;
        writeln!(out, "installdir: {}", game.install_path)?;
        writeln!(out, "manifest: {}", game.manifest_path)?;
        writeln!(out, "size: {}", format_size(game.size_on_disk))?;
    }
    Ok(())
}

/// Every manifest field of each game
pub fn print_raw_games(out: &mut dyn Write, games: &[&GameRecord]) -> io::Result<()> {
    for game in games {
        writeln!(out)?;
        writeln!(out, "[{}]", game.manifest_path)?;
        for (key, value) in game.raw_fields() {
            writeln!(out, "{}: {}", key, value)?;
        }
    }
    Ok(())
}

/// One `warning:` line per skipped or duplicate manifest
pub fn print_warnings(out: &mut dyn Write, warnings: &[ManifestWarning]) -> io::Result<()> {
    for warning in warnings {
        writeln!(out, "warning: {}", warning)?;
    }
    Ok(())
}
