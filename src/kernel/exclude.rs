//! 导航器排除规则：按 glob 隐藏节点及其子树

use crate::kernel::services::ports::config::ConfigError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Compiled `navigator.exclude` patterns.
///
/// Patterns are matched against `/`-separated paths relative to the tree
/// root. `*` stays inside one path component, so `**/` is needed to reach
/// nested entries.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    set: GlobSet,
    patterns: Vec<String>,
}

impl ExcludeFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| ConfigError::InvalidExcludePattern {
                    pattern: pattern.to_string(),
                    reason: e.kind().to_string(),
                })?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }

        let set = builder
            .build()
            .map_err(|e| ConfigError::InvalidExcludePattern {
                pattern: kept.join(", "),
                reason: e.to_string(),
            })?;

        Ok(Self { set, patterns: kept })
    }

    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        !self.patterns.is_empty() && self.set.is_match(path)
    }
}

impl Default for ExcludeFilter {
    fn default() -> Self {
        Self::empty()
    }
}
