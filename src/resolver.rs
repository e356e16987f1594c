use serde::Serialize;
use tracing::{debug, info};

use crate::api::WikiApi;
use crate::config::ResolutionPolicy;
use crate::error::ExtractError;

const TITLE_SEPARATOR: char = '|';

/// Which path produced the title. An ambiguous page never resolves; it ends as
/// `ExtractError::Ambiguous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMethod {
    DirectMatch,
    SearchBestMatch,
}

/// A canonical article title. Fixed once resolved; later stages only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    title: String,
    method: ResolutionMethod,
}

impl ResolvedPage {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn method(&self) -> ResolutionMethod {
        self.method
    }
}

/// Turn a free-text name into exactly one article title.
///
/// Blank input fails before any request. A missing page fails with search
/// suggestions; a disambiguation page fails as ambiguous.
pub async fn resolve<A: WikiApi + ?Sized>(
    api: &A,
    name: &str,
    policy: ResolutionPolicy,
    search_limit: usize,
) -> Result<ResolvedPage, ExtractError> {
    let query = name.trim();
    if query.is_empty() {
        return Err(ExtractError::InvalidInput);
    }

    let (candidate, method) = match policy {
        ResolutionPolicy::Direct => (query.to_string(), ResolutionMethod::DirectMatch),
        ResolutionPolicy::TopSearch => {
            let hits = search(api, query, 1).await?;
            match hits.into_iter().next() {
                Some(top) => (top, ResolutionMethod::SearchBestMatch),
                None => {
                    return Err(ExtractError::NotFound {
                        query: query.to_string(),
                        suggestions: Vec::new(),
                    })
                }
            }
        }
    };

    // `|` separates titles in a query, so such a name can never be one exact title.
    let page = if candidate.contains(TITLE_SEPARATOR) {
        None
    } else {
        debug!("Looking up '{}' for query '{}'", candidate, query);
        api.lookup(&candidate)
            .await
            .map_err(|e| ExtractError::fetch_failed(&candidate, e))?
    };

    let Some(page) = page else {
        let suggestions = search(api, query, search_limit).await?;
        info!("No page for '{}' ({} suggestions)", query, suggestions.len());
        return Err(ExtractError::NotFound {
            query: query.to_string(),
            suggestions,
        });
    };

    if page.disambiguation {
        return Err(ExtractError::Ambiguous { title: page.title });
    }

    info!("Resolved '{}' to '{}' ({:?})", query, page.title, method);
    Ok(ResolvedPage {
        title: page.title,
        method,
    })
}

async fn search<A: WikiApi + ?Sized>(
    api: &A,
    query: &str,
    limit: usize,
) -> Result<Vec<String>, ExtractError> {
    api.search(query, limit)
        .await
        .map_err(|e| ExtractError::fetch_failed(query, e))
}
