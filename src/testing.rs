//! In-memory wiki for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::{PageInfo, WikiApi};
use crate::error::ApiError;

#[derive(Default)]
struct FakePage {
    extract: Option<String>,
    html: Option<String>,
    disambiguation: bool,
}

#[derive(Default)]
pub struct FakeWiki {
    pages: HashMap<String, FakePage>,
    redirects: HashMap<String, String>,
    searches: HashMap<String, Vec<String>>,
    calls: AtomicUsize,
    fail_lookup: bool,
    fail_extract: bool,
    fail_html: bool,
}

impl FakeWiki {
    /// An empty `extract` means the page has none.
    pub fn with_page(mut self, title: &str, extract: &str, html: Option<&str>) -> Self {
        self.pages.insert(
            title.to_string(),
            FakePage {
                extract: Some(extract.to_string()).filter(|e| !e.is_empty()),
                html: html.map(str::to_string),
                disambiguation: false,
            },
        );
        self
    }

    pub fn with_disambiguation(mut self, title: &str) -> Self {
        self.pages.insert(
            title.to_string(),
            FakePage {
                disambiguation: true,
                ..Default::default()
            },
        );
        self
    }

    pub fn with_redirect(mut self, from: &str, to: &str) -> Self {
        self.redirects.insert(from.to_string(), to.to_string());
        self
    }

    pub fn with_search(mut self, query: &str, titles: &[&str]) -> Self {
        self.searches.insert(
            query.to_string(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    pub fn failing_extract(mut self) -> Self {
        self.fail_extract = true;
        self
    }

    pub fn failing_html(mut self) -> Self {
        self.fail_html = true;
        self
    }

    /// Number of API calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self, fail: bool) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if fail {
            return Err(ApiError::Api {
                code: "timeout".into(),
                info: "operation timed out".into(),
            });
        }
        Ok(())
    }

    fn page(&self, title: &str) -> Option<&FakePage> {
        self.pages.get(title)
    }
}

#[async_trait]
impl WikiApi for FakeWiki {
    async fn lookup(&self, title: &str) -> Result<Option<PageInfo>, ApiError> {
        self.hit(self.fail_lookup)?;
        let canonical = self.redirects.get(title).map_or(title, String::as_str);
        Ok(self.page(canonical).map(|p| PageInfo {
            title: canonical.to_string(),
            disambiguation: p.disambiguation,
        }))
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, ApiError> {
        self.hit(false)?;
        Ok(self
            .searches
            .get(query)
            .map(|hits| hits.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn extract(&self, title: &str) -> Result<Option<String>, ApiError> {
        self.hit(self.fail_extract)?;
        Ok(self.page(title).and_then(|p| p.extract.clone()))
    }

    async fn html(&self, title: &str) -> Result<Option<String>, ApiError> {
        self.hit(self.fail_html)?;
        Ok(self.page(title).and_then(|p| p.html.clone()))
    }
}
