use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest page the upstream search endpoint serves
pub const UPSTREAM_MAX_LIMIT: u32 = 100;

/// Request body for the live project search.
///
/// There are deliberately no `type` or `category` fields: upstream answers
/// arrays in those enum-typed clauses with a 500, so they are only ever
/// applied after fetching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiFilterOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developers: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

/// Query accepted by the static snapshot endpoint
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaticQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiPagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "totalPages")]
    pub total_pages: u32,
}

/// Envelope shared by the live and static listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub pagination: Option<ApiPagination>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl ApiResponse {
    pub fn page(data: Vec<Value>, pagination: Option<ApiPagination>) -> Self {
        Self {
            success: true,
            data,
            pagination,
            message: None,
        }
    }
}
