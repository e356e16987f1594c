use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{collapse_whitespace, visible_text};

static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]?\[\d+\]").unwrap());
static TRAILING_SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Remove numeric citation markers like `[12]` together with one space before each,
/// so `city [4] of` becomes `city of`. Other spacing is left alone.
pub fn strip_citations(text: &str) -> String {
    CITATION_RE.replace_all(text, "").into_owned()
}

/// Clean a plaintext extract, keeping its paragraph breaks.
pub fn clean_extract(extract: &str) -> String {
    let text = strip_citations(&extract.replace("\r\n", "\n"));
    let text = TRAILING_SPACES_RE.replace_all(&text, "\n");
    BLANK_LINES_RE
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}

/// Join paragraph fragments into one run of text with newlines folded into spaces.
pub fn join_paragraphs<S: AsRef<str>>(fragments: &[S]) -> String {
    let joined = fragments
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&strip_citations(&joined))
}

/// Text of every non-empty `<p>` in the markup, in document order.
pub fn paragraphs_from_html(html: &str) -> Vec<String> {
    let document = Html::parse_fragment(html);
    document
        .select(&PARAGRAPH)
        .map(|p| visible_text(p).trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
