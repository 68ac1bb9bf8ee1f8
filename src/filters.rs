//! Filter translation for the upstream search and the filters that can only
//! be enforced after fetching.

use crate::models::filters::{non_blank, positive};
use crate::models::{FilterOptions, Property, SortKey, SortOrder};
use crate::normalize::numbers::number_to_word;
use crate::sources::{ApiFilterOptions, DeveloperDirectory, StaticQuery};
use std::cmp::Ordering;
use tracing::debug;

/// Largest bedroom count the upstream enum knows ("Seven")
pub const MAX_API_BEDROOMS: u32 = 7;

/// Translate visitor filters into the upstream search body.
///
/// `type` and `category` are never forwarded. Developer names become ids when
/// the directory knows them, otherwise a search term.
pub async fn convert_to_api_filters(
    filters: &FilterOptions,
    developers: &dyn DeveloperDirectory,
) -> ApiFilterOptions {
    let mut api = ApiFilterOptions {
        min_price: positive(filters.min_price),
        max_price: positive(filters.max_price),
        min_area: positive(filters.min_area),
        max_area: positive(filters.max_area),
        city: non_blank(&filters.city).map(str::to_string),
        locality: non_blank(&filters.locality).map(str::to_string),
        search: non_blank(&filters.search).map(str::to_string),
        sort_by: filters.sort_by.map(|k| k.as_api_str().to_string()),
        sort_order: filters
            .sort_by
            .map(|k| filters.sort_order.unwrap_or(k.default_order()).as_str().to_string()),
        ..Default::default()
    };

    if let Some(bedrooms) = filters.min_bedrooms().filter(|b| *b <= MAX_API_BEDROOMS) {
        api.min_bedrooms = number_to_word(bedrooms).map(|word| vec![word]);
    }

    if let Some(name) = non_blank(&filters.developer) {
        match developers.resolve_id(name).await {
            Some(id) => api.developers = Some(vec![id]),
            None => {
                debug!(developer = name, "No developer id, searching by name");
                if api.search.is_none() {
                    api.search = Some(name.to_string());
                }
            }
        }
    }

    api
}

/// Snapshot query for `filters`, or `None` when the snapshot cannot express them
pub fn static_query_for(filters: &FilterOptions) -> Option<StaticQuery> {
    let unsupported = non_blank(&filters.property_type).is_some()
        || non_blank(&filters.category).is_some()
        || non_blank(&filters.city).is_some()
        || filters.min_bedrooms().is_some()
        || positive(filters.min_area).is_some()
        || positive(filters.max_area).is_some()
        || filters.sort_by.is_some();
    if unsupported {
        return None;
    }

    Some(StaticQuery {
        locality: non_blank(&filters.locality).map(str::to_string),
        search: non_blank(&filters.search).map(str::to_string),
        developer: non_blank(&filters.developer).map(str::to_string),
        min_price: positive(filters.min_price),
        max_price: positive(filters.max_price),
    })
}

/// Whether any requested filter must be enforced in memory after fetching
pub fn needs_client_side_filtering(filters: &FilterOptions, api: &ApiFilterOptions) -> bool {
    non_blank(&filters.property_type).is_some()
        || non_blank(&filters.category).is_some()
        || non_blank(&filters.locality).is_some()
        || non_blank(&filters.city).is_some()
        || filters.min_bedrooms().is_some()
        || (non_blank(&filters.developer).is_some() && api.developers.is_none())
}

/// Case-insensitive equality, or either value containing the other
pub fn loose_match(field: Option<&str>, wanted: &str) -> bool {
    let field = match field.map(str::trim).filter(|f| !f.is_empty()) {
        Some(f) => f.to_lowercase(),
        None => return false,
    };
    let wanted = wanted.trim().to_lowercase();
    field == wanted || field.contains(&wanted) || wanted.contains(&field)
}

/// Apply every in-memory filter in turn
pub fn apply_client_filters(
    mut properties: Vec<Property>,
    filters: &FilterOptions,
    api: &ApiFilterOptions,
) -> Vec<Property> {
    let before = properties.len();

    if let Some(wanted) = non_blank(&filters.property_type) {
        properties.retain(|p| loose_match(Some(&p.property_type), wanted));
    }
    if let Some(wanted) = non_blank(&filters.category) {
        properties.retain(|p| loose_match(p.category.as_deref(), wanted));
    }
    if let Some(wanted) = non_blank(&filters.locality) {
        properties.retain(|p| {
            loose_match(p.locality.as_deref(), wanted) || loose_match(Some(&p.location), wanted)
        });
    }
    if let Some(wanted) = non_blank(&filters.city) {
        properties.retain(|p| {
            loose_match(p.city.as_deref(), wanted) || loose_match(Some(&p.location), wanted)
        });
    }
    if let Some(min) = filters.min_bedrooms() {
        properties.retain(|p| p.bedrooms.map(|b| b >= min).unwrap_or(false));
    }
    if api.developers.is_none() {
        if let Some(wanted) = non_blank(&filters.developer) {
            properties.retain(|p| loose_match(p.developer.as_deref(), wanted));
        }
    }

    debug!(before, after = properties.len(), "Applied client-side filters");
    properties
}

fn compare(a: &Property, b: &Property, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Area => a.area.unwrap_or(0.0).total_cmp(&b.area.unwrap_or(0.0)),
        SortKey::Newest => a.created_at.cmp(&b.created_at),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Stable in-memory sort; newest-first unless an order is given
pub fn sort_properties(properties: &mut [Property], key: SortKey, order: Option<SortOrder>) {
    let order = order.unwrap_or(key.default_order());

    properties.sort_by(|a, b| match order {
        SortOrder::Asc => compare(a, b, key),
        SortOrder::Desc => compare(b, a, key),
    });
}
