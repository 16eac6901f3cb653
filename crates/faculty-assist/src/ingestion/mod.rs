//! File extraction and web page scraping

mod extractor;
mod web;

pub use extractor::FileExtractor;
pub use web::{extract_page_text, WebScraper};
