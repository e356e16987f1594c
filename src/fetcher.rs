use tracing::{info, warn};

use crate::api::WikiApi;
use crate::error::ExtractError;

/// Raw material for one article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Plaintext extract; empty when the page has none.
    pub extract: String,
    /// Rendered markup; `None` when it could not be retrieved.
    pub html: Option<String>,
}

/// Fetch extract and markup for a resolved title, concurrently.
///
/// The extract is mandatory: a failure there is `FetchFailed`. The markup only feeds
/// the infobox, so a failure there is logged and dropped.
pub async fn fetch_content<A: WikiApi + ?Sized>(
    api: &A,
    title: &str,
) -> Result<PageContent, ExtractError> {
    let (extract, html) = tokio::join!(api.extract(title), api.html(title));

    let extract = extract
        .map_err(|e| ExtractError::fetch_failed(title, e))?
        .unwrap_or_default();

    let html = match html {
        Ok(html) => html,
        Err(e) => {
            warn!("Markup fetch failed for '{}', continuing without infobox: {}", title, e);
            None
        }
    };

    info!(
        "Fetched '{}' (extract: {} chars, markup: {})",
        title,
        extract.chars().count(),
        if html.is_some() { "yes" } else { "no" }
    );

    Ok(PageContent { extract, html })
}
