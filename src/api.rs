//! MediaWiki Action API access.
//!
//! Every request asks for `formatversion=2` JSON. Decoding lives in plain functions
//! so it can be checked against canned payloads without a network.

use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::debug;

use crate::config::Settings;
use crate::error::ApiError;

/// A page as reported by a title lookup, after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub title: String,
    pub disambiguation: bool,
}

/// Read-only operations the extractor needs from a wiki.
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// Exact title lookup following redirects. `None` when the page is missing or invalid.
    async fn lookup(&self, title: &str) -> Result<Option<PageInfo>, ApiError>;

    /// Fuzzy title search, best match first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, ApiError>;

    /// Plaintext extract of the article body. `None` when the page has none.
    async fn extract(&self, title: &str) -> Result<Option<String>, ApiError>;

    /// Rendered article HTML. `None` when the page cannot be parsed.
    async fn html(&self, title: &str) -> Result<Option<String>, ApiError>;
}

pub struct MediaWikiClient {
    client: reqwest::Client,
    api_url: String,
}

impl MediaWikiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
        })
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String, ApiError> {
        debug!("GET {} {:?}", self.api_url, params);
        let body = self
            .client
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl WikiApi for MediaWikiClient {
    async fn lookup(&self, title: &str) -> Result<Option<PageInfo>, ApiError> {
        let body = self
            .get(&[
                ("action", "query"),
                ("titles", title),
                ("prop", "pageprops"),
                ("ppprop", "disambiguation"),
                ("redirects", "1"),
            ])
            .await?;
        decode_lookup(&body)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, ApiError> {
        let limit = limit.to_string();
        let body = self
            .get(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", limit.as_str()),
                ("namespace", "0"),
            ])
            .await?;
        decode_search(&body)
    }

    async fn extract(&self, title: &str) -> Result<Option<String>, ApiError> {
        let body = self
            .get(&[
                ("action", "query"),
                ("titles", title),
                ("prop", "extracts"),
                ("explaintext", "1"),
            ])
            .await?;
        decode_extract(&body)
    }

    async fn html(&self, title: &str) -> Result<Option<String>, ApiError> {
        let body = self
            .get(&[("action", "parse"), ("page", title), ("prop", "text")])
            .await?;
        decode_parse(&body)
    }
}

// ── Response shapes ──

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

impl From<ErrorBody> for ApiError {
    fn from(e: ErrorBody) -> Self {
        ApiError::Api {
            code: e.code,
            info: e.info,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    pageprops: Option<PageProps>,
    extract: Option<String>,
}

impl RawPage {
    fn exists(&self) -> bool {
        !self.missing && !self.invalid
    }
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParseBody>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    #[serde(default)]
    text: String,
}

/// The one page a single-title query answered with. Several pages mean the title
/// was split into more than one, which is not a match.
fn single_page(body: &str) -> Result<Option<RawPage>, ApiError> {
    let resp: QueryResponse = serde_json::from_str(body)?;
    if let Some(err) = resp.error {
        return Err(err.into());
    }
    let mut pages = resp.query.map(|q| q.pages).unwrap_or_default();
    if pages.len() != 1 {
        return Ok(None);
    }
    Ok(pages.pop().filter(RawPage::exists))
}

pub fn decode_lookup(body: &str) -> Result<Option<PageInfo>, ApiError> {
    Ok(single_page(body)?.map(|page| PageInfo {
        disambiguation: page
            .pageprops
            .is_some_and(|p| p.disambiguation.is_some()),
        title: page.title,
    }))
}

/// Opensearch answers `[query, [titles], [descriptions], [urls]]`.
pub fn decode_search(body: &str) -> Result<Vec<String>, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if let Some(err) = value.get("error") {
        let err: ErrorBody = serde_json::from_value(err.clone())?;
        return Err(err.into());
    }
    let titles = value
        .get(1)
        .and_then(|t| t.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|t| t.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Ok(titles)
}

pub fn decode_extract(body: &str) -> Result<Option<String>, ApiError> {
    Ok(single_page(body)?.and_then(|page| page.extract))
}

pub fn decode_parse(body: &str) -> Result<Option<String>, ApiError> {
    let resp: ParseResponse = serde_json::from_str(body)?;
    match (resp.parse, resp.error) {
        (Some(parse), _) if !parse.text.is_empty() => Ok(Some(parse.text)),
        (_, Some(err)) if err.code == "missingtitle" => Ok(None),
        (_, Some(err)) => Err(err.into()),
        _ => Ok(None),
    }
}
