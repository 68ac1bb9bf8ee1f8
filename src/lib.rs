//! Property data layer for an Alnair-backed listing site: upstream client,
//! record normalization, filter translation and paginated listing service.

pub mod config;
pub mod filters;
pub mod format;
pub mod listings;
pub mod models;
pub mod normalize;
pub mod sources;

pub use config::Config;
pub use listings::{ListingService, ListingSettings};
pub use models::{FilterOptions, PaginatedProperties, Pagination, Property};
pub use normalize::map_api_property;
