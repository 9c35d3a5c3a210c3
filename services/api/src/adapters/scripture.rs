//! services/api/src/adapters/scripture.rs
//!
//! This module contains the adapter for the external scripture API.
//! It implements the `ScriptureService` port from the `core` crate.
//!
//! A lookup walks a three-step fallback chain: the exact reference as given,
//! then verse 1 of the same chapter, then [`DEFAULT_REFERENCE`]. The first
//! step that yields a passage wins; only a transport or HTTP failure aborts
//! the chain early.

use async_trait::async_trait;
use devotional_core::domain::{Passage, DEFAULT_REFERENCE};
use devotional_core::ports::{PortError, PortResult, ScriptureService};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

//=========================================================================================
// The Adapter Struct
//=========================================================================================

/// A scripture adapter backed by the api.scripture.api.bible search endpoint.
pub struct BibleApiAdapter {
    client: reqwest::Client,
    base_url: String,
    bible_id: String,
    api_key: Option<String>,
    reference_pattern: Regex,
}

impl BibleApiAdapter {
    /// Creates a new `BibleApiAdapter` on top of a shared HTTP client.
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        bible_id: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            bible_id,
            api_key,
            // Book name (which may itself contain digits and spaces, e.g.
            // "1 Kings") followed by a chapter number.
            reference_pattern: Regex::new(r"^(?P<book>.+?)\s+(?P<chapter>\d+)").unwrap(),
        }
    }

    /// Collapses runs of whitespace so "John   3:16 " and "John 3:16" query
    /// identically.
    fn normalize(reference: &str) -> String {
        reference.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Widens a reference to verse 1 of its chapter ("Ezekiel 34:11-16" ->
    /// "Ezekiel 34:1"). Returns `None` when no chapter number is present.
    fn chapter_reference(&self, reference: &str) -> Option<String> {
        let caps = self.reference_pattern.captures(reference)?;
        Some(format!("{} {}:1", &caps["book"], &caps["chapter"]))
    }

    /// Runs one search query. `Ok(None)` means the API answered but had no
    /// passage for the query; the caller is free to widen and retry.
    async fn search(&self, api_key: &str, query: &str) -> PortResult<Option<Passage>> {
        let url = format!("{}/bibles/{}/search", self.base_url, self.bible_id);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .header("api-key", api_key)
            .send()
            .await
            .map_err(|e| PortError::Upstream(format!("Bible API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PortError::Upstream(format!(
                "Bible API error ({}): {}",
                status, body
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| PortError::Upstream(format!("Invalid Bible API response: {}", e)))?;

        Ok(body
            .data
            .and_then(|data| data.passages)
            .and_then(|mut passages| {
                if passages.is_empty() {
                    None
                } else {
                    Some(passages.remove(0))
                }
            })
            .map(|p| Passage {
                reference: p.reference,
                content: p.content,
            }))
    }
}

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Deserialize)]
struct SearchResponse {
    data: Option<SearchData>,
}

#[derive(Deserialize)]
struct SearchData {
    passages: Option<Vec<PassageData>>,
}

#[derive(Deserialize)]
struct PassageData {
    #[serde(default)]
    reference: String,
    #[serde(default)]
    content: String,
}

//=========================================================================================
// `ScriptureService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ScriptureService for BibleApiAdapter {
    async fn fetch_passage(&self, reference: &str) -> PortResult<Passage> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PortError::Upstream("Bible API key is not configured".to_string()))?;

        let wanted = Self::normalize(reference);

        let mut queries = vec![wanted.clone()];
        if let Some(chapter) = self.chapter_reference(&wanted) {
            if chapter != wanted {
                queries.push(chapter);
            }
        }
        if !queries.iter().any(|q| q == DEFAULT_REFERENCE) {
            queries.push(DEFAULT_REFERENCE.to_string());
        }

        for query in &queries {
            if let Some(passage) = self.search(api_key, query).await? {
                return Ok(passage);
            }
            debug!("No passage for '{}', widening", query);
        }

        Err(PortError::Upstream(format!(
            "No passage found for reference '{}'",
            wanted
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> BibleApiAdapter {
        BibleApiAdapter::new(
            reqwest::Client::new(),
            "http://localhost:0".to_string(),
            "TEST".to_string(),
            Some("key".to_string()),
        )
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(BibleApiAdapter::normalize("  John   3:16 "), "John 3:16");
        assert_eq!(BibleApiAdapter::normalize("John 3:16"), "John 3:16");
    }

    #[test]
    fn chapter_reference_widens_to_verse_one() {
        let adapter = adapter();
        assert_eq!(
            adapter.chapter_reference("John 3:16").as_deref(),
            Some("John 3:1")
        );
        assert_eq!(
            adapter.chapter_reference("Ezekiel 34:11-16").as_deref(),
            Some("Ezekiel 34:1")
        );
    }

    #[test]
    fn chapter_reference_keeps_numbered_book_names() {
        let adapter = adapter();
        assert_eq!(
            adapter.chapter_reference("1 Kings 8:22").as_deref(),
            Some("1 Kings 8:1")
        );
        assert_eq!(
            adapter.chapter_reference("2 Corinthians 5:17").as_deref(),
            Some("2 Corinthians 5:1")
        );
    }

    #[test]
    fn chapter_reference_needs_a_chapter_number() {
        let adapter = adapter();
        assert_eq!(adapter.chapter_reference("Jude"), None);
    }
}
