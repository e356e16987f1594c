use thiserror::Error;

/// Failure of a single MediaWiki API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },
}

/// Terminal outcome of a failed extraction. Messages are meant to be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no name provided")]
    InvalidInput,
    #[error("Wikipedia page not found for '{query}'.{}", suggestion_hint(.suggestions))]
    NotFound {
        query: String,
        suggestions: Vec<String>,
    },
    #[error(
        "Wikipedia returned a disambiguation page for '{title}'. \
         Try a more specific name (e.g. include middle name / birth year)."
    )]
    Ambiguous { title: String },
    #[error("failed to fetch '{title}': {source}")]
    FetchFailed {
        title: String,
        #[source]
        source: ApiError,
    },
}

impl ExtractError {
    pub(crate) fn fetch_failed(title: &str, source: ApiError) -> Self {
        ExtractError::FetchFailed {
            title: title.to_string(),
            source,
        }
    }
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" Did you mean one of: {}?", suggestions.join(", "))
    }
}
