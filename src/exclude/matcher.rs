//! Answer "is this path hidden?" for an exclusion map.

use crate::domain::ExclusionMap;
use crate::utils::{ancestors, clean_relative};
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Glob matcher over the `true` entries of an exclusion map.
///
/// A path is hidden when it or any of its ancestor directories matches, the same
/// way a file explorer hides a directory's whole subtree.
pub struct ExclusionMatcher {
    globs: GlobSet,
    patterns: Vec<String>,
}

impl ExclusionMatcher {
    pub fn new(map: &ExclusionMap) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::new();
        for (pattern, _) in map.iter().filter(|(_, hide)| **hide) {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .with_context(|| format!("Invalid exclusion glob: {}", pattern))?;
            builder.add(glob);
            patterns.push(pattern.clone());
        }
        Ok(Self { globs: builder.build()?, patterns })
    }

    /// The pattern hiding `path`, if any.
    pub fn hidden_by(&self, path: &str) -> Option<&str> {
        let path = clean_relative(path);
        std::iter::once(path.clone())
            .chain(ancestors(&path))
            .find_map(|candidate| self.globs.matches(&candidate).first().copied())
            .map(|idx| self.patterns[idx].as_str())
    }
}
