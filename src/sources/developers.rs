use crate::sources::traits::DeveloperDirectory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Developer name -> upstream id table, matched case-insensitively
#[derive(Debug, Clone, Default)]
pub struct StaticDeveloperDirectory {
    ids: HashMap<String, u64>,
}

fn key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl StaticDeveloperDirectory {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let ids = entries
            .into_iter()
            .map(|(name, id)| (key(name.as_ref()), id))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        Self { ids }
    }

    /// Load a JSON object of `{ "Developer Name": id }`
    pub async fn from_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read developer file {}", path.display()))?;
        let entries: HashMap<String, u64> =
            serde_json::from_str(&raw).context("Developer file must be a JSON object of name -> id")?;

        info!(count = entries.len(), path = %path.display(), "Loaded developer ids");
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[async_trait]
impl DeveloperDirectory for StaticDeveloperDirectory {
    async fn resolve_id(&self, name: &str) -> Option<u64> {
        self.ids.get(&key(name)).copied()
    }
}
