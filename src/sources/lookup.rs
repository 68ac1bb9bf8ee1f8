use crate::normalize::text::as_text;
use crate::sources::error::SourceError;
use crate::sources::traits::PropertySource;
use crate::sources::types::{ApiFilterOptions, UPSTREAM_MAX_LIMIT};
use serde_json::Value;
use tracing::debug;

/// Unfiltered pages scanned when search-by-id is not honored upstream
pub const ID_SCAN_PAGES: u32 = 3;

fn record_matches(record: &Value, id: &str) -> bool {
    ["id", "slug"]
        .iter()
        .filter_map(|k| record.get(*k))
        .filter_map(as_text)
        .any(|candidate| candidate == id)
}

/// Best-effort lookup of one raw project by id or slug.
///
/// Upstream does not guarantee id search, so a search miss is followed by a
/// scan of the first few unfiltered pages.
pub async fn find_project_by_id(
    source: &dyn PropertySource,
    id: &str,
) -> Result<Option<Value>, SourceError> {
    let id = id.trim();
    if id.is_empty() {
        return Ok(None);
    }

    let by_search = ApiFilterOptions {
        search: Some(id.to_string()),
        ..Default::default()
    };
    let response = source.fetch_projects(&by_search, 1, UPSTREAM_MAX_LIMIT).await?;
    if let Some(found) = response.data.into_iter().find(|r| record_matches(r, id)) {
        return Ok(Some(found));
    }

    debug!(id, "Search by id missed, scanning unfiltered pages");
    let unfiltered = ApiFilterOptions::default();
    for page in 1..=ID_SCAN_PAGES {
        let response = source.fetch_projects(&unfiltered, page, UPSTREAM_MAX_LIMIT).await?;
        let last_page = response
            .pagination
            .as_ref()
            .map(|p| p.total_pages > 0 && page >= p.total_pages)
            .unwrap_or(false);
        let exhausted = response.data.len() < UPSTREAM_MAX_LIMIT as usize;

        if let Some(found) = response.data.into_iter().find(|r| record_matches(r, id)) {
            return Ok(Some(found));
        }
        if last_page || exhausted {
            break;
        }
    }

    Ok(None)
}
