pub mod cache;

pub use cache::CatalogCache;

use crate::filters::{
    apply_client_filters, convert_to_api_filters, needs_client_side_filtering, sort_properties,
    static_query_for,
};
use crate::models::{FilterOptions, PaginatedProperties, Pagination, Property};
use crate::normalize::map_api_property;
use crate::sources::types::UPSTREAM_MAX_LIMIT;
use crate::sources::{
    find_project_by_id, ApiFilterOptions, ApiResponse, DeveloperDirectory, PropertySource,
    SourceError,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bounds on the sequential page loops
#[derive(Debug, Clone)]
pub struct ListingSettings {
    /// Pages fetched when filters must be applied in memory
    pub client_side_max_pages: u32,
    /// Pages fetched for the full unfiltered catalog
    pub catalog_max_pages: u32,
    pub cache_ttl: Duration,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            client_side_max_pages: 20,
            catalog_max_pages: 100,
            cache_ttl: Duration::seconds(cache::DEFAULT_TTL_SECS),
        }
    }
}

/// Serves listing pages, choosing per request between the snapshot, a single
/// upstream page, or a full fetch filtered in memory.
pub struct ListingService {
    source: Arc<dyn PropertySource>,
    developers: Arc<dyn DeveloperDirectory>,
    cache: CatalogCache,
    settings: ListingSettings,
}

/// Normalize one upstream page, keeping upstream totals when reported
fn page_from_response(response: ApiResponse, page: u32, limit: u32) -> PaginatedProperties {
    let properties: Vec<Property> = response.data.iter().map(map_api_property).collect();

    let pagination = match response.pagination {
        Some(p) if p.total > 0 || p.total_pages > 0 => {
            let mut pagination = Pagination::new(page, limit, p.total);
            if p.total_pages > 0 {
                pagination.total_pages = p.total_pages;
            }
            pagination
        }
        _ => Pagination::new(
            page,
            limit,
            (page as u64 - 1) * limit as u64 + properties.len() as u64,
        ),
    };

    PaginatedProperties {
        properties,
        pagination,
    }
}

impl ListingService {
    pub fn new(source: Arc<dyn PropertySource>, developers: Arc<dyn DeveloperDirectory>) -> Self {
        Self::with_settings(source, developers, ListingSettings::default())
    }

    pub fn with_settings(
        source: Arc<dyn PropertySource>,
        developers: Arc<dyn DeveloperDirectory>,
        settings: ListingSettings,
    ) -> Self {
        Self {
            source,
            developers,
            cache: CatalogCache::new(settings.cache_ttl),
            settings,
        }
    }

    /// One page of properties matching `filters`.
    ///
    /// Never fails: any error is logged and reported as an empty page.
    pub async fn get_paginated_properties(
        &self,
        filters: &FilterOptions,
        page: u32,
        limit: u32,
    ) -> PaginatedProperties {
        let page = page.max(1);
        let limit = limit.max(1);

        match self.try_paginated(filters, page, limit).await {
            Ok(result) => {
                info!(
                    page,
                    limit,
                    returned = result.properties.len(),
                    total = result.pagination.total,
                    "Served listing page"
                );
                result
            }
            Err(e) => {
                warn!(error = %e, page, limit, "Listing request failed, returning no results");
                PaginatedProperties::empty(page, limit)
            }
        }
    }

    async fn try_paginated(
        &self,
        filters: &FilterOptions,
        page: u32,
        limit: u32,
    ) -> Result<PaginatedProperties, SourceError> {
        if let Some(query) = static_query_for(filters) {
            match self.source.fetch_static(&query, page, limit).await {
                Ok(response) => {
                    debug!("Serving from static snapshot");
                    return Ok(page_from_response(response, page, limit));
                }
                Err(e) => warn!(error = %e, "Static snapshot unavailable, using live API"),
            }
        }

        let api = convert_to_api_filters(filters, self.developers.as_ref()).await;

        if needs_client_side_filtering(filters, &api) {
            debug!("Filters need in-memory enforcement, fetching all matching pages");
            let raw = self
                .fetch_all_pages(&api, self.settings.client_side_max_pages)
                .await?;
            let properties: Vec<Property> = raw.iter().map(map_api_property).collect();

            let mut filtered = apply_client_filters(properties, filters, &api);
            if let Some(key) = filters.sort_by {
                sort_properties(&mut filtered, key, filters.sort_order);
            }
            return Ok(PaginatedProperties::from_slice(&filtered, page, limit));
        }

        if filters.is_empty() {
            let catalog = self.catalog().await?;
            return Ok(PaginatedProperties::from_slice(&catalog, page, limit));
        }

        let limit = limit.min(UPSTREAM_MAX_LIMIT);
        let response = self.source.fetch_projects(&api, page, limit).await?;
        Ok(page_from_response(response, page, limit))
    }

    /// Full unfiltered catalog, from cache while it is fresh
    async fn catalog(&self) -> Result<Arc<Vec<Property>>, SourceError> {
        if let Some(cached) = self.cache.get(Utc::now()) {
            debug!(count = cached.len(), "Catalog cache hit");
            return Ok(cached);
        }

        let raw = self
            .fetch_all_pages(&ApiFilterOptions::default(), self.settings.catalog_max_pages)
            .await?;
        let properties: Vec<Property> = raw.iter().map(map_api_property).collect();
        info!(count = properties.len(), "Fetched full catalog");

        Ok(self.cache.store(properties, Utc::now()))
    }

    /// Sequentially fetch upstream pages of 100 until exhausted or `max_pages`
    async fn fetch_all_pages(
        &self,
        api: &ApiFilterOptions,
        max_pages: u32,
    ) -> Result<Vec<Value>, SourceError> {
        let mut records = Vec::new();

        for page in 1..=max_pages {
            let response = self
                .source
                .fetch_projects(api, page, UPSTREAM_MAX_LIMIT)
                .await?;
            let total_pages = response.pagination.as_ref().map(|p| p.total_pages).unwrap_or(0);
            let received = response.data.len();
            records.extend(response.data);

            debug!(page, received, total_pages, "Fetched upstream page");
            if received < UPSTREAM_MAX_LIMIT as usize || (total_pages > 0 && page >= total_pages) {
                return Ok(records);
            }
        }

        warn!(
            max_pages,
            fetched = records.len(),
            "Stopped paging at safety limit"
        );
        Ok(records)
    }

    /// Single project by id or slug with its long-form description.
    /// `None` when it cannot be found or loaded.
    pub async fn get_property(&self, id: &str) -> Option<Property> {
        match self.try_get_property(id).await {
            Ok(property) => property,
            Err(e) => {
                warn!(error = %e, id, "Property lookup failed");
                None
            }
        }
    }

    async fn try_get_property(&self, id: &str) -> Result<Option<Property>, SourceError> {
        let snapshot = match self.source.fetch_static_project(id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, id, "Snapshot detail unavailable, searching live API");
                None
            }
        };

        let raw = match snapshot {
            Some(raw) => raw,
            None => match find_project_by_id(self.source.as_ref(), id).await? {
                Some(raw) => raw,
                None => return Ok(None),
            },
        };

        let mut property = map_api_property(&raw);
        if let Some(slug) = property.slug.clone() {
            match self.source.fetch_project_description(&slug).await {
                Ok(Some(description)) => property.description = description,
                Ok(None) => {}
                Err(e) => debug!(error = %e, slug = %slug, "No long-form description"),
            }
        }

        Ok(Some(property))
    }

    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }
}
