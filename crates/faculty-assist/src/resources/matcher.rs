//! Keyword matching of free-form text against the resource table

use std::collections::HashSet;

use super::catalog::{ResourceCatalog, ResourceEntry};

/// Entries of every category whose trigger terms occur in `query`.
///
/// Matching is case-insensitive. Thai terms match anywhere in the text;
/// Latin-script terms only match whole words. Categories keep table order
/// and entries are deduplicated by URL, first occurrence winning.
pub fn find_relevant_resources(catalog: &ResourceCatalog, query: &str) -> Vec<ResourceEntry> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();
    let mut seen = HashSet::new();

    catalog
        .categories
        .iter()
        .filter(|category| category.triggers.iter().any(|t| contains_term(&query, t)))
        .flat_map(|category| category.entries.iter().copied())
        .filter(|entry| seen.insert(entry.url))
        .collect()
}

fn contains_term(text: &str, term: &str) -> bool {
    if !term.is_ascii() {
        return text.contains(term);
    }

    text.match_indices(term).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Markdown block appended to chat replies
pub fn format_resource_links(entries: &[ResourceEntry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let links = entries
        .iter()
        .map(|r| format!("- [{}]({})", r.title, r.url))
        .collect::<Vec<_>>()
        .join("\n");

    Some(format!("\n\nแหล่งข้อมูลเพิ่มเติม:\n{}", links))
}
