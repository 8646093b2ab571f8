//! Searcher configuration types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::xdb::DEFAULT_XDB_FILE;
use crate::{Error, Result};

/// How much of the xdb image is held in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Every search reads from the file
    #[default]
    File,
    /// The vector index is preloaded, segments and regions come from the file
    VectorIndex,
    /// The whole file is loaded into memory
    Content,
    /// The file is memory-mapped
    Mmap,
}

impl CachePolicy {
    /// Get the internal name of this policy.
    pub fn name(&self) -> &'static str {
        match self {
            CachePolicy::File => "file",
            CachePolicy::VectorIndex => "vector_index",
            CachePolicy::Content => "content",
            CachePolicy::Mmap => "mmap",
        }
    }

    /// Parse a policy from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "file" => Some(CachePolicy::File),
            "vector_index" | "vectorindex" | "vindex" => Some(CachePolicy::VectorIndex),
            "content" | "buffer" => Some(CachePolicy::Content),
            "mmap" => Some(CachePolicy::Mmap),
            _ => None,
        }
    }
}

/// Configuration for a [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearcherConfig {
    /// Path of the xdb database
    pub db_path: PathBuf,
    /// Access mode
    pub cache_policy: CachePolicy,
}

impl SearcherConfig {
    /// Create a new SearcherConfig.
    pub fn new(db_path: impl Into<PathBuf>, cache_policy: CachePolicy) -> Self {
        Self {
            db_path: db_path.into(),
            cache_policy,
        }
    }

    /// Parse a configuration from YAML.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a configuration file, choosing the parser by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(Error::Config(format!(
                "unsupported config extension: {:?}",
                other
            ))),
        }
    }
}

impl Default for SearcherConfig {
    fn default() -> Self {
        Self::new(DEFAULT_XDB_FILE, CachePolicy::File)
    }
}
