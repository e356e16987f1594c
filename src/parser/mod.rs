pub mod infobox;
pub mod text;

use scraper::node::Element;
use scraper::ElementRef;

const BLOCK_TAGS: &[&str] = &[
    "br", "div", "p", "li", "ul", "ol", "dl", "dt", "dd", "tr", "td", "th", "table",
];

/// Visible text of an element with citation superscripts, styles and hidden spans left out.
/// Block-level children are separated by a space; whitespace is not yet collapsed.
pub(crate) fn visible_text(el: ElementRef) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out
}

fn collect_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child_el) = ElementRef::wrap(child) else {
            continue;
        };
        if is_hidden(child_el.value()) {
            continue;
        }
        let block = BLOCK_TAGS.contains(&child_el.value().name());
        if block {
            out.push(' ');
        }
        collect_text(child_el, out);
        if block {
            out.push(' ');
        }
    }
}

fn is_hidden(el: &Element) -> bool {
    match el.name() {
        "style" | "script" => true,
        "sup" => el.classes().any(|c| c == "reference"),
        _ => el
            .attr("style")
            .is_some_and(|s| s.replace(' ', "").contains("display:none")),
    }
}

/// Consecutive whitespace to a single space, trimmed.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
