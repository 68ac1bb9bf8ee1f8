use crate::sources::error::SourceError;
use crate::sources::types::{ApiFilterOptions, ApiResponse, StaticQuery};
use async_trait::async_trait;
use serde_json::Value;

/// Access to the project data behind the site.
/// Implemented by the HTTP client and by in-memory fakes in tests.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// One page of the live project search
    async fn fetch_projects(
        &self,
        filters: &ApiFilterOptions,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse, SourceError>;

    /// One page of the pre-generated snapshot
    async fn fetch_static(
        &self,
        query: &StaticQuery,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse, SourceError>;

    /// Snapshot record for a single project, `None` when unknown
    async fn fetch_static_project(&self, id: &str) -> Result<Option<Value>, SourceError>;

    /// Long-form description for a project slug
    async fn fetch_project_description(&self, slug: &str) -> Result<Option<String>, SourceError>;

    /// Get the name of the data source
    fn source_name(&self) -> &'static str;
}

/// Resolves developer names to upstream developer ids
#[async_trait]
pub trait DeveloperDirectory: Send + Sync {
    async fn resolve_id(&self, name: &str) -> Option<u64>;
}
