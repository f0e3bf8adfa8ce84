//! Catalog tools: find datasets and read their definitions.

pub mod dataset_definition;
pub mod search;

pub use dataset_definition::{GetDatasetDefinitionParams, GetDatasetDefinitionTool};
pub use search::{SearchCatalogParams, SearchCatalogTool};
