//! The `list` command

use crate::display::{print_detailed_games, print_games, print_raw_games};
use anyhow::Result;
use std::io::Write;
use steamutils_library::{Catalog, GameRecord};

/// How `list` filters and renders the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions<'a> {
    /// Keep only games whose name or app id matches
    pub search: Option<&'a str>,
    pub verbose: bool,
    pub raw: bool,
    pub json: bool,
}

/// Write the selected games to `out`
///
/// JSON output is always an array, empty when nothing matches.
pub fn list_games(out: &mut dyn Write, catalog: &Catalog, options: &ListOptions) -> Result<()> {
    let games: Vec<&GameRecord> = match options.search {
        Some(query) => catalog.search(query),
        None => catalog.list_all().iter().collect(),
    };

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &games)?;
        writeln!(out)?;
    } else if games.is_empty() {
        writeln!(out, "Found 0 games.")?;
    } else if options.raw {
        print_raw_games(out, &games)?;
    } else if options.verbose {
        print_detailed_games(out, &games)?;
    } else {
        print_games(out, &games)?;
    }

    Ok(())
}
