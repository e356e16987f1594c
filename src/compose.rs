use serde::Serialize;

use crate::parser::infobox::InfoboxEntry;
use crate::resolver::ResolutionMethod;

pub const INFOBOX_HEADER: &str = "### INFOBOX DATA ###";
pub const ARTICLE_HEADER: &str = "### ARTICLE TEXT ###";

/// Everything extracted for one article. `full_text` is the artifact handed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub title: String,
    pub method: ResolutionMethod,
    pub infobox: Vec<InfoboxEntry>,
    pub article_text: String,
    pub full_text: String,
}

impl ExtractionResult {
    pub fn new(
        title: String,
        method: ResolutionMethod,
        infobox: Vec<InfoboxEntry>,
        article_text: String,
    ) -> Self {
        let full_text = compose_full_text(&infobox, &article_text);
        ExtractionResult {
            title,
            method,
            infobox,
            article_text,
            full_text,
        }
    }
}

/// Labeled infobox block, then labeled article block, separated by a blank line.
/// An empty section is left out together with its header.
pub fn compose_full_text(infobox: &[InfoboxEntry], article_text: &str) -> String {
    let mut sections = Vec::with_capacity(2);

    if !infobox.is_empty() {
        let mut block = String::from(INFOBOX_HEADER);
        for entry in infobox {
            block.push('\n');
            block.push_str(&entry.to_string());
        }
        sections.push(block);
    }

    let article_text = article_text.trim();
    if !article_text.is_empty() {
        sections.push(format!("{}\n{}", ARTICLE_HEADER, article_text));
    }

    sections.join("\n\n")
}
