use std::fmt;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use super::text::strip_citations;
use super::{collapse_whitespace, visible_text};

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// One infobox row. A row with only a data cell has no key; a row with only a
/// header cell has an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoboxEntry {
    pub key: Option<String>,
    pub value: String,
}

impl InfoboxEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        InfoboxEntry {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

impl fmt::Display for InfoboxEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key.as_deref() {
            Some(key) if !self.value.is_empty() => write!(f, "{}: {}", key, self.value),
            Some(key) => f.write_str(key),
            None => f.write_str(&self.value),
        }
    }
}

/// Rows of the first table whose class contains "infobox", in document order.
/// No such table yields an empty list.
pub fn parse_infobox(html: &str) -> Vec<InfoboxEntry> {
    let document = Html::parse_fragment(html);

    let Some(table) = document.select(&TABLE).find(|t| {
        t.value()
            .attr("class")
            .is_some_and(|c| c.contains("infobox"))
    }) else {
        return Vec::new();
    };

    table.select(&ROW).filter_map(parse_row).collect()
}

fn parse_row(row: ElementRef) -> Option<InfoboxEntry> {
    let key = cell_text(row, &HEADER_CELL);
    let value = cell_text(row, &DATA_CELL);

    match (key.is_empty(), value.is_empty()) {
        (true, true) => None,
        (true, false) => Some(InfoboxEntry { key: None, value }),
        (false, _) => Some(InfoboxEntry {
            key: Some(key),
            value,
        }),
    }
}

fn cell_text(row: ElementRef, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(|cell| collapse_whitespace(&strip_citations(&visible_text(cell))))
        .unwrap_or_default()
}
