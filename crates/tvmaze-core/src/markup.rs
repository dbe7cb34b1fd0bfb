//! Plain-text rendering of TVmaze HTML summaries
//!
//! Show and episode summaries arrive as HTML fragments written by third
//! parties. They are reduced to text before display instead of being
//! injected as markup.

use std::sync::LazyLock;

use regex_lite::Regex;
use scraper::{Html, Node};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Elements that separate blocks of text
const BLOCK_ELEMENTS: &[&str] = &["p", "br", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4"];

/// Elements whose text content is never shown
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Render an HTML fragment as plain text.
///
/// Tags are dropped, entities decoded, and runs of whitespace collapsed to
/// a single space. Block elements keep their contents separated.
///
/// # Example
/// ```
/// use tvmaze_core::markup::summary_text;
///
/// let text = summary_text("<p><b>Under the Dome</b> is the story &amp; more.</p>");
/// assert_eq!(text, "Under the Dome is the story & more.");
/// ```
pub fn summary_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut raw = String::with_capacity(html.len());

    for node in fragment.tree.root().descendants() {
        match node.value() {
            Node::Text(text) => {
                let hidden = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.name()));
                if !hidden {
                    raw.push_str(text);
                }
            }
            Node::Element(element) if BLOCK_ELEMENTS.contains(&element.name()) => raw.push(' '),
            _ => {}
        }
    }

    WHITESPACE.replace_all(&raw, " ").trim().to_string()
}

/// Plain-text summary of an optional HTML field; absent summaries render empty.
pub fn optional_summary_text(html: Option<&str>) -> String {
    html.map(summary_text).unwrap_or_default()
}
