pub mod filters;

pub use filters::{FilterOptions, SortKey, SortOrder};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image shown when a listing has no usable picture
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-property.jpg";

/// Upstream identifier, numeric for live projects and textual for snapshot entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum PropertyId {
    Number(i64),
    Text(String),
}

impl PropertyId {
    /// True when the id or its textual form equals `other`
    pub fn matches(&self, other: &str) -> bool {
        let other = other.trim();
        match self {
            PropertyId::Number(n) => other.parse::<i64>().map(|o| o == *n).unwrap_or(false),
            PropertyId::Text(s) => !s.is_empty() && s == other,
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::Number(n) => write!(f, "{}", n),
            PropertyId::Text(s) => f.write_str(s),
        }
    }
}

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Sale,
    Rent,
}

/// Canonical property model served to the site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    pub amenities: Vec<String>,
    pub main_image: String,
    pub gallery: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_date: Option<String>,
    pub listing_type: ListingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnished: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construction_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_units: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project_badges: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_status: Option<String>,
}

impl Property {
    /// Description with markup removed, for cards and terminal output
    pub fn plain_description(&self) -> String {
        crate::normalize::text::strip_html(&self.description)
    }

    /// True when `id` names this property by id or slug
    pub fn is_identified_by(&self, id: &str) -> bool {
        self.id.matches(id) || self.slug.as_deref().map(|s| s == id.trim()).unwrap_or(false)
    }
}

/// Page bookkeeping returned alongside every listing page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total + limit as u64 - 1) / limit as u64) as u32
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// Zero totals for the requested page, used when nothing could be loaded
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            total: 0,
            total_pages: 0,
        }
    }
}

/// One page of listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedProperties {
    pub properties: Vec<Property>,
    pub pagination: Pagination,
}

impl PaginatedProperties {
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            properties: Vec::new(),
            pagination: Pagination::empty(page, limit),
        }
    }

    /// Slice `all` for a 1-based page
    pub fn from_slice(all: &[Property], page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let start = (page as usize - 1).saturating_mul(limit as usize);
        let properties = all
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        Self {
            properties,
            pagination: Pagination::new(page, limit, all.len() as u64),
        }
    }
}
