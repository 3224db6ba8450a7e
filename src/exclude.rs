//! Exclusion list of repositories that must never be privatized
//!
//! The file holds one repository full name (`owner/name`) per line. Lines
//! starting with `#` are comments. Matching is exact membership.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Read-only set of excluded repository names, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    entries: Vec<String>,
}

impl ExclusionList {
    /// Load the exclusion file; a missing file yields an empty list
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No exclusion file at {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read exclusion file: {:?}", path))?;

        let list = Self::parse(&content);
        debug!("Loaded {} exclusions from {:?}", list.len(), path);
        Ok(list)
    }

    /// Parse exclusion file content. Only the line terminator is stripped.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        Self { entries }
    }

    /// Whether a repository full name is excluded
    pub fn contains(&self, full_name: &str) -> bool {
        self.entries.iter().any(|entry| entry == full_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
