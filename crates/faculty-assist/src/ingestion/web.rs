//! Website text scraping

use scraper::{Html, Selector};

use crate::error::{Error, Result};

/// Elements whose text makes up the page content
const CONTENT_SELECTOR: &str = "p, h1, h2, h3, li";

/// Fetches a page and keeps its readable text
#[derive(Clone, Default)]
pub struct WebScraper {
    client: reqwest::Client,
}

impl WebScraper {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and return the text of its content elements
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("GET {} returned {}", url, status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to read {}: {}", url, e)))?;

        extract_page_text(&html)
    }
}

/// Text of every `p`, `h1`–`h3` and `li` inside `<body>`, in document
/// order, one element per line
pub fn extract_page_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let body_selector =
        Selector::parse("body").map_err(|e| Error::internal(format!("Bad selector: {:?}", e)))?;
    let content_selector = Selector::parse(CONTENT_SELECTOR)
        .map_err(|e| Error::internal(format!("Bad selector: {:?}", e)))?;

    let mut content = String::new();
    if let Some(body) = document.select(&body_selector).next() {
        for element in body.select(&content_selector) {
            content.extend(element.text());
            content.push('\n');
        }
    }

    Ok(content)
}
