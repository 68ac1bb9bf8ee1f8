use serde::{Deserialize, Serialize};

/// Field used to order results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Area,
    Newest,
    Title,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price" => Some(SortKey::Price),
            "area" | "size" => Some(SortKey::Area),
            "newest" | "created_at" | "createdat" | "date" => Some(SortKey::Newest),
            "title" | "name" => Some(SortKey::Title),
            _ => None,
        }
    }

    /// Order used when none is requested: newest first, everything else ascending
    pub fn default_order(&self) -> SortOrder {
        match self {
            SortKey::Newest => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    /// Name understood by the upstream search endpoint
    pub fn as_api_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Area => "area",
            SortKey::Newest => "created_at",
            SortKey::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Asc),
            "desc" | "descending" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Search criteria chosen by a visitor
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub category: Option<String>,
    pub developer: Option<String>,
    /// Minimum number of bedrooms
    pub bedrooms: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub city: Option<String>,
    pub locality: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

impl FilterOptions {
    /// Build filters from URL query parameters, ignoring blank or malformed values
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = FilterOptions::default();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let text = || Some(value.to_string());
            let number = || value.replace(',', "").parse::<f64>().ok().filter(|n| *n > 0.0);

            match key.as_ref() {
                "type" => filters.property_type = text(),
                "category" => filters.category = text(),
                "developer" => filters.developer = text(),
                "bedrooms" => filters.bedrooms = value.parse::<u32>().ok().filter(|b| *b > 0),
                "minPrice" => filters.min_price = number(),
                "maxPrice" => filters.max_price = number(),
                "minArea" => filters.min_area = number(),
                "maxArea" => filters.max_area = number(),
                "city" => filters.city = text(),
                "locality" => filters.locality = text(),
                "search" => filters.search = text(),
                "sortBy" => filters.sort_by = SortKey::parse(value),
                "sortOrder" => filters.sort_order = SortOrder::parse(value),
                _ => {}
            }
        }

        filters
    }

    /// Bedroom minimum, when one is actually requested (zero means "any")
    pub fn min_bedrooms(&self) -> Option<u32> {
        self.bedrooms.filter(|b| *b >= 1)
    }

    /// True when no usable criterion is set, i.e. the plain catalog listing.
    /// Blank text, non-positive numbers and a sort order without a sort key count as unset.
    pub fn is_empty(&self) -> bool {
        [
            &self.property_type,
            &self.category,
            &self.developer,
            &self.city,
            &self.locality,
            &self.search,
        ]
        .into_iter()
        .all(|text| non_blank(text).is_none())
            && [self.min_price, self.max_price, self.min_area, self.max_area]
                .into_iter()
                .all(|n| positive(n).is_none())
            && self.min_bedrooms().is_none()
            && self.sort_by.is_none()
    }
}

/// Some(trimmed) for non-blank text
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Some(n) for strictly positive numbers
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|n| n.is_finite() && *n > 0.0)
}
