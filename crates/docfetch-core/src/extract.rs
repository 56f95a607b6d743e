//! HTML to page extraction.
//!
//! Turns a raw HTML document into a [`Page`]: resolves a title, drops
//! navigation and scripting noise, picks the main content region, normalizes
//! whitespace and caps the size. Parsing goes through `scraper` (html5ever),
//! which recovers from any malformed input, so extraction never fails.
//!
//! ```rust
//! use docfetch_core::PageExtractor;
//!
//! let html = r#"<html><head><title>Bar Chart - Chart Docs</title></head>
//!   <body><nav>Home | API</nav>
//!   <main><h1>Bar Chart</h1><p>Use bars   to compare
//!   categories.</p><script>track()</script></main></body></html>"#;
//!
//! let page = PageExtractor::new(15_000, "Chart Docs")
//!     .extract(html, "https://docs.example.com/chart-types/bar-chart");
//!
//! assert_eq!(page.title, "Bar Chart");
//! assert_eq!(page.content, "Bar Chart\n\nUse bars to compare categories.");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::types::Page;

/// Default cap on extracted content, in characters.
pub const DEFAULT_MAX_CONTENT_SIZE: usize = 15_000;

/// Elements whose subtree never contributes text.
const SKIPPED_ELEMENTS: &[&str] = &[
    "nav", "header", "footer", "script", "style", "noscript", "template",
];

/// Elements that start a new paragraph in the extracted text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "main",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tr",
    "ul",
];

/// A blank line, possibly containing other whitespace.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

// SAFETY: Selectors are compile-time constants that are known to be valid.
#[allow(clippy::unwrap_used)]
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
#[allow(clippy::unwrap_used)]
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
#[allow(clippy::unwrap_used)]
static MAIN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main, [role='main']").unwrap());
#[allow(clippy::unwrap_used)]
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
#[allow(clippy::unwrap_used)]
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Converts HTML documents into [`Page`] values.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    max_content_size: usize,
    title_suffix: Option<String>,
}

impl PageExtractor {
    /// Create an extractor.
    ///
    /// `site_name` is the name documentation titles are suffixed with
    /// (`"Line Chart - <site_name>"`); an empty name disables suffix removal.
    #[must_use]
    pub fn new(max_content_size: usize, site_name: &str) -> Self {
        let site_name = site_name.trim();
        Self {
            max_content_size,
            title_suffix: (!site_name.is_empty()).then(|| format!(" - {site_name}")),
        }
    }

    /// Maximum content length in characters.
    #[must_use]
    pub const fn max_content_size(&self) -> usize {
        self.max_content_size
    }

    /// Extract a page from `html`, recording `source_url` as its origin.
    #[must_use]
    pub fn extract(&self, html: &str, source_url: &str) -> Page {
        let document = Html::parse_document(html);

        let title = self.resolve_title(&document);
        let region = content_region(&document);

        let mut raw = String::with_capacity(html.len() / 2);
        collect_text(region, &mut raw);
        let content = truncate_chars(&normalize_text(&raw), self.max_content_size);

        Page {
            title,
            source_url: source_url.to_string(),
            content,
        }
    }

    /// First `<h1>` outside stripped chrome (nav, header, footer, ...), else
    /// `<title>` without the site suffix, else empty.
    fn resolve_title(&self, document: &Html) -> String {
        if let Some(h1) = document.select(&H1).find(|h1| !in_skipped_subtree(*h1)) {
            let text = collapse_whitespace(&h1.text().collect::<String>());
            if !text.is_empty() {
                return text;
            }
        }

        let Some(title) = document.select(&TITLE).next() else {
            return String::new();
        };
        let text = collapse_whitespace(&title.text().collect::<String>());
        match &self.title_suffix {
            Some(suffix) => text
                .strip_suffix(suffix.as_str())
                .map_or_else(|| text.clone(), |stripped| stripped.trim_end().to_string()),
            None => text,
        }
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_SIZE, "")
    }
}

fn in_skipped_subtree(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| SKIPPED_ELEMENTS.contains(&ancestor.value().name()))
}

/// Pick the element whose text becomes the page content.
///
/// `<main>` wins over `<article>`, which wins over `<body>`. html5ever always
/// synthesizes a body, so the root element is only a formality.
fn content_region(document: &Html) -> ElementRef<'_> {
    document
        .select(&MAIN)
        .next()
        .or_else(|| document.select(&ARTICLE).next())
        .or_else(|| document.select(&BODY).next())
        .unwrap_or_else(|| document.root_element())
}

/// Append the visible text under `element` to `out`.
///
/// Skipped subtrees contribute nothing; block elements are surrounded by
/// blank lines so paragraph structure survives normalization.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    out.push_str("\n\n");
                }
                collect_text(child_ref, out);
                if block {
                    out.push_str("\n\n");
                }
            },
            _ => {},
        }
    }
}

/// Collapse every whitespace run to a single space and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize extracted text.
///
/// Within a paragraph every whitespace run (newlines included) becomes one
/// space. Paragraphs are separated by exactly one blank line and the result
/// has no leading or trailing whitespace.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    PARAGRAPH_BREAK_RE
        .split(text)
        .map(collapse_whitespace)
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Keep at most `max_chars` characters of `text`.
///
/// A plain prefix cut on a character boundary: no ellipsis and no attempt to
/// end on a word.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
