//! Static faculty resource links and keyword matching

mod catalog;
mod matcher;

pub use catalog::{ResourceCatalog, ResourceCategory, ResourceEntry, CATALOG};
pub use matcher::{find_relevant_resources, format_resource_links};
