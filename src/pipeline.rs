use tracing::{debug, info, warn};

use crate::api::{MediaWikiClient, WikiApi};
use crate::compose::ExtractionResult;
use crate::config::{ResolutionPolicy, Settings};
use crate::error::{ApiError, ExtractError};
use crate::fetcher::fetch_content;
use crate::parser::infobox::parse_infobox;
use crate::parser::text::{clean_extract, join_paragraphs, paragraphs_from_html};
use crate::resolver::resolve;

/// Resolve → fetch → parse → compose, one name at a time.
///
/// Holds no per-call state, so one `Extractor` can serve concurrent callers.
pub struct Extractor<A> {
    api: A,
    policy: ResolutionPolicy,
    search_limit: usize,
}

impl Extractor<MediaWikiClient> {
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Ok(Self::new(MediaWikiClient::new(settings)?, settings))
    }
}

impl<A: WikiApi> Extractor<A> {
    pub fn new(api: A, settings: &Settings) -> Self {
        Extractor {
            api,
            policy: settings.resolution,
            search_limit: settings.search_limit,
        }
    }

    pub async fn extract(&self, name: &str) -> Result<ExtractionResult, ExtractError> {
        let page = resolve(&self.api, name, self.policy, self.search_limit).await?;
        let title = page.title();

        let content = fetch_content(&self.api, title).await?;

        let infobox = content
            .html
            .as_deref()
            .map(parse_infobox)
            .unwrap_or_default();
        debug!("Parsed {} infobox rows for '{}'", infobox.len(), title);

        let mut article_text = clean_extract(&content.extract);
        if article_text.is_empty() {
            if let Some(html) = content.html.as_deref() {
                article_text = join_paragraphs(&paragraphs_from_html(html));
                debug!("Empty extract for '{}', using markup paragraphs", title);
            }
        }

        let result =
            ExtractionResult::new(title.to_string(), page.method(), infobox, article_text);
        info!(
            "Extracted '{}': {} infobox rows, {} chars of text",
            result.title,
            result.infobox.len(),
            result.article_text.chars().count()
        );
        Ok(result)
    }
}

/// Extract one article with settings from the environment and a fresh HTTP client.
pub async fn extract(name: &str) -> Result<ExtractionResult, ExtractError> {
    if name.trim().is_empty() {
        return Err(ExtractError::InvalidInput);
    }
    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable settings: {}", e);
        Settings::default()
    });
    let extractor = Extractor::from_settings(&settings)
        .map_err(|e| ExtractError::fetch_failed(name.trim(), e))?;
    extractor.extract(name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::infobox::InfoboxEntry;
    use crate::resolver::ResolutionMethod;
    use crate::testing::FakeWiki;

    fn extractor(wiki: FakeWiki) -> Extractor<FakeWiki> {
        Extractor::new(wiki, &Settings::default())
    }

    const INFOBOX: &str = r#"<table class="infobox vcard"><tr><th>Born</th><td>1900</td></tr><tr><th>Died</th><td>1980</td></tr></table>"#;

    #[tokio::test]
    async fn full_pipeline() {
        let wiki = FakeWiki::default()
            .with_page("Example Person", "Example text.[1]", Some(INFOBOX))
            .with_redirect("example person", "Example Person");
        let result = extractor(wiki).extract("example person").await.unwrap();

        assert_eq!(result.title, "Example Person");
        assert_eq!(result.method, ResolutionMethod::DirectMatch);
        assert_eq!(
            result.infobox,
            vec![InfoboxEntry::new("Born", "1900"), InfoboxEntry::new("Died", "1980")]
        );
        assert_eq!(result.article_text, "Example text.");
        assert_eq!(
            result.full_text,
            "### INFOBOX DATA ###\nBorn: 1900\nDied: 1980\n\n### ARTICLE TEXT ###\nExample text."
        );
    }

    #[tokio::test]
    async fn json_names_resolution_method() {
        let wiki = FakeWiki::default()
            .with_page("Marie Curie", "Physicist.", None)
            .with_search("curie", &["Marie Curie"]);
        let settings = Settings {
            resolution: ResolutionPolicy::TopSearch,
            ..Settings::default()
        };
        let result = Extractor::new(wiki, &settings).extract("curie").await.unwrap();
        assert_eq!(result.method, ResolutionMethod::SearchBestMatch);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "search-best-match");
        assert_eq!(json["title"], "Marie Curie");
    }

    #[tokio::test]
    async fn blank_name_is_invalid_without_calls() {
        let ex = extractor(FakeWiki::default());
        let err = ex.extract("   ").await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidInput));
        assert_eq!(ex.api.calls(), 0);
    }

    #[tokio::test]
    async fn free_function_rejects_blank_name() {
        assert!(matches!(extract("").await, Err(ExtractError::InvalidInput)));
    }

    #[tokio::test]
    async fn not_found_and_ambiguous_propagate() {
        let ex = extractor(FakeWiki::default().with_disambiguation("Mercury"));
        assert!(matches!(
            ex.extract("Nobody Atall").await,
            Err(ExtractError::NotFound { suggestions, .. }) if suggestions.is_empty()
        ));
        assert!(matches!(
            ex.extract("Mercury").await,
            Err(ExtractError::Ambiguous { .. })
        ));
    }

    #[tokio::test]
    async fn markup_failure_leaves_infobox_empty() {
        let wiki = FakeWiki::default()
            .with_page("Hello", "Hello.", Some(INFOBOX))
            .failing_html();
        let result = extractor(wiki).extract("Hello").await.unwrap();
        assert!(result.infobox.is_empty());
        assert_eq!(result.full_text, "### ARTICLE TEXT ###\nHello.");
    }

    #[tokio::test]
    async fn extract_failure_is_fetch_failed() {
        let wiki = FakeWiki::default()
            .with_page("Hello", "Hello.", None)
            .failing_extract();
        let err = extractor(wiki).extract("Hello").await.unwrap_err();
        assert!(matches!(err, ExtractError::FetchFailed { title, .. } if title == "Hello"));
    }

    #[tokio::test]
    async fn empty_extract_falls_back_to_paragraphs() {
        let html = format!("{}<p>Some\nbody.[2]</p>", INFOBOX);
        let wiki = FakeWiki::default().with_page("Stub", "", Some(&html));
        let result = extractor(wiki).extract("Stub").await.unwrap();
        assert_eq!(result.article_text, "Some body.");
        assert_eq!(result.infobox.len(), 2);
    }

    #[tokio::test]
    async fn nothing_to_extract() {
        let wiki = FakeWiki::default().with_page("Empty", "", None);
        let result = extractor(wiki).extract("Empty").await.unwrap();
        assert!(result.infobox.is_empty());
        assert_eq!(result.full_text, "");
    }

    #[tokio::test]
    async fn repeated_calls_are_independent() {
        let wiki = FakeWiki::default()
            .with_page("Ada Lovelace", "Ada.", Some(INFOBOX))
            .with_page("Alan Turing", "Alan.", None);
        let ex = extractor(wiki);
        let (a, b) = tokio::join!(ex.extract("Ada Lovelace"), ex.extract("Alan Turing"));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.infobox.len(), 2);
        assert!(b.infobox.is_empty());
        assert_eq!(ex.extract("Ada Lovelace").await.unwrap(), a);
    }
}
