//! Vendor table access.
//!
//! # Design Decisions
//! - The flat file is reopened and scanned top to bottom on every lookup;
//!   edits to the file are visible to the next request without a restart
//! - First line starting with the prefix wins, so file order decides
//!   between duplicate or overlapping entries
//! - Lookups go through [`OuiRegistry`] so an indexed variant can replace
//!   the scan without touching the resolver

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Source of raw vendor table lines.
#[async_trait]
pub trait OuiRegistry: Send + Sync {
    /// Return the first line whose text begins with `oui`, if any.
    async fn find_line(&self, oui: &str) -> io::Result<Option<String>>;
}

/// Registry backed by an IEEE `oui.txt`-style flat file.
#[derive(Debug, Clone)]
pub struct FileOuiRegistry {
    path: PathBuf,
}

impl FileOuiRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[async_trait]
impl OuiRegistry for FileOuiRegistry {
    async fn find_line(&self, oui: &str) -> io::Result<Option<String>> {
        let file = File::open(&self.path).await?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                return Ok(None);
            }
            if buf.starts_with(oui.as_bytes()) {
                let line = String::from_utf8_lossy(&buf);
                return Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()));
            }
        }
    }
}
