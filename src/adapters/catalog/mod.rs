//! Catalog Adapters
//!
//! Implementations of the PlanCatalogReader port.
//!
//! ## Available Adapters
//!
//! - **JsonFileCatalogReader** - JSON file on disk, cached after first load
//! - **HttpCatalogReader** - JSON over HTTP, fetched on every call
//! - **InMemoryCatalogReader** - Catalog held in memory (testing/staging)

mod http_catalog_reader;
mod in_memory_catalog_reader;
mod json_file_catalog_reader;

pub use http_catalog_reader::{HttpCatalogConfig, HttpCatalogReader};
pub use in_memory_catalog_reader::InMemoryCatalogReader;
pub use json_file_catalog_reader::JsonFileCatalogReader;
