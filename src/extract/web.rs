//! Web Page Text Extraction
//!
//! Fetches a page and concatenates the visible text of paragraph, heading
//! (h1-h6), and list-item elements, joined by single spaces.

use scraper::{Html, Selector};
use url::Url;

use crate::types::{DocError, Result};

const VISIBLE_TEXT_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li";

/// Fetch a page and return its visible text.
///
/// Network and HTTP-status failures surface as errors here; the extractor
/// facade downgrades them to an empty result with a warning.
pub async fn fetch_text(url: &Url) -> Result<String> {
    let response = reqwest::get(url.clone()).await?;

    if !response.status().is_success() {
        return Err(DocError::Extraction(format!(
            "HTTP {} fetching {}",
            response.status(),
            url
        )));
    }

    let body = response.text().await?;
    visible_text(&body)
}

/// Concatenate the text of content-bearing elements, single-space joined.
pub fn visible_text(html: &str) -> Result<String> {
    let selector = Selector::parse(VISIBLE_TEXT_SELECTOR)
        .map_err(|e| DocError::Extraction(format!("invalid selector: {}", e)))?;

    // Html is parsed and dropped here, never held across an await point
    // (scraper's DOM is not Send).
    let document = Html::parse_document(html);
    let fragments: Vec<String> = document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect();

    Ok(fragments.join(" "))
}
