pub mod alnair;
pub mod developers;
pub mod error;
pub mod lookup;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use alnair::AlnairClient;
pub use developers::StaticDeveloperDirectory;
pub use error::SourceError;
pub use lookup::find_project_by_id;
pub use traits::{DeveloperDirectory, PropertySource};
pub use types::{ApiFilterOptions, ApiPagination, ApiResponse, StaticQuery};
