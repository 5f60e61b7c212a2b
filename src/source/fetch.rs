//! Cue document providers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Something that can turn a cue-data URL into its text.
pub trait DocumentFetcher {
    fn fetch(&self, url: &str) -> io::Result<String>;
}

/// Reads cue documents from the local file system.
///
/// Accepts plain paths and `file://` URLs. Relative paths resolve against
/// `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    root: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentFetcher for FileFetcher {
    fn fetch(&self, url: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(url))
    }
}
