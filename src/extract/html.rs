// src/extract/html.rs
// =============================================================================
// Single-pass extraction of links and words from an HTML document.
//
// We use the `scraper` crate to parse HTML into a DOM tree, then walk every
// node of that tree exactly once:
// - <a href> and <area href> elements produce a link, resolved against the
//   page's own address with the `url` crate
// - text nodes produce words, unless they sit inside an element whose text
//   is not page content (<script>, <style>, ...)
//
// Links and words come out interleaved, in document order.
// =============================================================================

use scraper::Html;
use url::Url;

use super::tokenize;

// Elements whose href is a hyperlink we follow
const LINK_ELEMENTS: [&str; 2] = ["a", "area"];

// Elements whose text content is never counted
const NON_CONTENT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

// One item discovered while scanning a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// An absolute http(s) address, fragment removed
    Link(Url),
    /// A lowercase word token
    Word(String),
}

// Walks `document` once and lazily yields every link and word in it
//
// Parameters:
//   document: the parsed page
//   base: the page's own address, used to resolve relative links
//
// Example:
//   <p>Hello <a href="/docs">Docs</a></p> on https://example.com/
//   -> Word("hello"), Link(https://example.com/docs), Word("docs")
pub fn scan<'a>(document: &'a Html, base: &'a Url) -> impl Iterator<Item = Found> + 'a {
    document.tree.root().descendants().flat_map(move |node| {
        let link = node
            .value()
            .as_element()
            .filter(|element| LINK_ELEMENTS.contains(&element.name()))
            .and_then(|element| element.attr("href"))
            .and_then(|href| resolve_link(base, href))
            .map(Found::Link);

        // <template> content is nested under the element, so look at every
        // ancestor and not just the parent
        let words = node
            .value()
            .as_text()
            .filter(|_| {
                !node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|e| NON_CONTENT_ELEMENTS.contains(&e.name()))
                })
            })
            .map(|text| tokenize(text).map(Found::Word))
            .into_iter()
            .flatten();

        link.into_iter().chain(words)
    })
}

// Resolves an href to an absolute address we are willing to crawl
//
// Returns None for:
// - empty hrefs and pure in-page anchors ("#section")
// - anything that doesn't resolve (malformed)
// - non-http(s) schemes (mailto:, javascript:, tel:, ftp:, ...)
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    // page.html#intro and page.html are the same page
    url.set_fragment(None);
    Some(url)
}
