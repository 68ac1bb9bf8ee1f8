//! In-memory [`PropertySource`] returning deterministic pages for tests.

use crate::normalize::text::as_text;
use crate::sources::alnair::unwrap_record;
use crate::sources::error::SourceError;
use crate::sources::traits::{DeveloperDirectory, PropertySource};
use crate::sources::types::{ApiFilterOptions, ApiPagination, ApiResponse, StaticQuery, UPSTREAM_MAX_LIMIT};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeSource {
    catalog: Vec<Value>,
    snapshot: Option<Vec<Value>>,
    honor_search: bool,
    live_down: bool,
    details: HashMap<String, Value>,
    descriptions: HashMap<String, String>,
    live_calls: AtomicUsize,
    static_calls: AtomicUsize,
    live_requests: Mutex<Vec<(ApiFilterOptions, u32, u32)>>,
}

fn text_field(record: &Value, key: &str) -> String {
    record.get(key).and_then(as_text).unwrap_or_default().to_lowercase()
}

fn page_of(records: Vec<Value>, page: u32, limit: u32) -> ApiResponse {
    let total = records.len() as u64;
    let start = (page.max(1) as usize - 1) * limit as usize;
    let data = records.into_iter().skip(start).take(limit as usize).collect();
    ApiResponse::page(
        data,
        Some(ApiPagination {
            page,
            limit,
            total,
            total_pages: ((total + limit as u64 - 1) / limit as u64) as u32,
        }),
    )
}

impl FakeSource {
    pub fn with_catalog(catalog: Vec<Value>) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// Serve the snapshot endpoint from `records`; without it the snapshot is missing
    pub fn with_snapshot(mut self, records: Vec<Value>) -> Self {
        self.snapshot = Some(records);
        self
    }

    pub fn honoring_search(mut self) -> Self {
        self.honor_search = true;
        self
    }

    pub fn live_down(mut self) -> Self {
        self.live_down = true;
        self
    }

    pub fn with_detail(mut self, id: &str, record: Value) -> Self {
        self.details.insert(id.to_string(), record);
        self
    }

    pub fn with_description(mut self, slug: &str, description: &str) -> Self {
        self.descriptions.insert(slug.to_string(), description.to_string());
        self
    }

    pub fn live_calls(&self) -> usize {
        self.live_calls.load(Ordering::SeqCst)
    }

    pub fn static_calls(&self) -> usize {
        self.static_calls.load(Ordering::SeqCst)
    }

    pub fn live_requests(&self) -> Vec<(ApiFilterOptions, u32, u32)> {
        self.live_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PropertySource for FakeSource {
    async fn fetch_projects(
        &self,
        filters: &ApiFilterOptions,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse, SourceError> {
        self.live_calls.fetch_add(1, Ordering::SeqCst);
        self.live_requests
            .lock()
            .unwrap()
            .push((filters.clone(), page, limit));

        if self.live_down {
            return Err(SourceError::Status {
                status_code: 502,
                message: "bad gateway".to_string(),
            });
        }

        let limit = limit.clamp(1, UPSTREAM_MAX_LIMIT);
        let records: Vec<Value> = self
            .catalog
            .iter()
            .filter(|r| match (&filters.search, self.honor_search) {
                (Some(term), true) => {
                    let term = term.to_lowercase();
                    ["id", "slug", "title"]
                        .iter()
                        .any(|k| text_field(r, k).contains(&term))
                }
                _ => true,
            })
            .cloned()
            .collect();

        Ok(page_of(records, page, limit))
    }

    async fn fetch_static(
        &self,
        query: &StaticQuery,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse, SourceError> {
        self.static_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.snapshot.as_ref().ok_or_else(|| SourceError::Status {
            status_code: 404,
            message: "snapshot not generated".to_string(),
        })?;

        let records: Vec<Value> = snapshot
            .iter()
            .filter(|r| {
                query
                    .locality
                    .as_ref()
                    .map(|l| {
                        ["locality", "district"]
                            .iter()
                            .any(|k| text_field(r, k) == l.to_lowercase())
                    })
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        Ok(page_of(records, page, limit.max(1)))
    }

    async fn fetch_static_project(&self, id: &str) -> Result<Option<Value>, SourceError> {
        Ok(self.details.get(id).cloned().and_then(unwrap_record))
    }

    async fn fetch_project_description(&self, slug: &str) -> Result<Option<String>, SourceError> {
        Ok(self.descriptions.get(slug).cloned())
    }

    fn source_name(&self) -> &'static str {
        "Fake"
    }
}

/// Directory backed by a fixed list
pub struct FakeDevelopers(pub Vec<(&'static str, u64)>);

#[async_trait]
impl DeveloperDirectory for FakeDevelopers {
    async fn resolve_id(&self, name: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, id)| *id)
    }
}
