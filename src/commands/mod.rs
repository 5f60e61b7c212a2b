//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod cues;
pub mod query;
pub mod replay;

use anyhow::Result;

use lipcue::source::{self, FileFetcher};
use lipcue::CuePointIndex;

/// Read a cue file into a fresh index.
pub fn load_index(file: &str) -> Result<CuePointIndex> {
    let cues = source::load_from_document(&FileFetcher::new(), file)?;
    let mut index = CuePointIndex::new();
    index.replace_all(cues);
    Ok(index)
}
