//! Marker discovery in rendered pages
//!
//! Markers are HTML comments whose text contains `embed-`. Rendered HTML is
//! scanned directly; Markdown sources are scanned only inside raw HTML, so
//! comments shown in code blocks are not markers.

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Substring that makes a comment a marker candidate
pub const MARKER_NEEDLE: &str = "embed-";

/// Class of an injected viewer container
pub const CONTAINER_CLASS: &str = "demo-container";

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--(.*?)-->").expect("comment pattern is valid"));

static INJECTED_CONTAINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<div\b[^>]*\bclass\s*=\s*["'][^"']*\bdemo-container\b"#)
        .expect("container pattern is valid")
});

/// Source format of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    /// Rendered HTML
    #[default]
    Html,
    /// Markdown source
    Markdown,
}

impl PageFormat {
    /// Guess the format from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") {
            Self::Markdown
        } else {
            Self::Html
        }
    }
}

/// Page content to scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// Page source
    pub source: &'a str,
    /// Source format
    pub format: PageFormat,
}

impl<'a> Page<'a> {
    /// Rendered HTML page
    #[inline]
    #[must_use]
    pub fn html(source: &'a str) -> Self {
        Self {
            source,
            format: PageFormat::Html,
        }
    }

    /// Markdown source page
    #[inline]
    #[must_use]
    pub fn markdown(source: &'a str) -> Self {
        Self {
            source,
            format: PageFormat::Markdown,
        }
    }
}

/// One marker comment found in a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerSite {
    /// Trimmed comment text
    pub text: String,
    /// Byte offset of `<!--` in the page
    pub offset: usize,
    /// A viewer container directly follows the comment
    pub already_injected: bool,
}

/// Finds marker comments in pages
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerLocator;

impl MarkerLocator {
    /// Create new locator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Markers of a page in document order
    #[must_use]
    pub fn locate(&self, page: Page<'_>) -> Vec<MarkerSite> {
        match page.format {
            PageFormat::Html => {
                let mut sites = Vec::new();
                collect_comments(page.source, |pos| pos, &mut sites);
                sites
            }
            PageFormat::Markdown => self.locate_markdown(page.source),
        }
    }

    fn locate_markdown(&self, source: &str) -> Vec<MarkerSite> {
        let mut sites = Vec::new();
        let mut block: Option<HtmlLines> = None;
        for (event, range) in MdParser::new(source).into_offset_iter() {
            match event {
                Event::Start(Tag::HtmlBlock) => block = Some(HtmlLines::default()),
                Event::Html(line) => {
                    if let Some(lines) = block.as_mut() {
                        lines.push(&line, range.start);
                    }
                }
                Event::End(TagEnd::HtmlBlock) => {
                    if let Some(lines) = block.take() {
                        collect_comments(&lines.text, |pos| lines.source_offset(pos), &mut sites);
                    }
                }
                Event::InlineHtml(_) => {
                    collect_comments(&source[range.clone()], |pos| range.start + pos, &mut sites);
                }
                _ => {}
            }
        }
        sites
    }
}

/// Lines of a Markdown HTML block with container prefixes such as `> ` removed
#[derive(Debug, Default)]
struct HtmlLines {
    text: String,
    // (offset in `text`, offset in source) where each line starts
    starts: Vec<(usize, usize)>,
}

impl HtmlLines {
    fn push(&mut self, line: &str, source_offset: usize) {
        self.starts.push((self.text.len(), source_offset));
        self.text.push_str(line);
    }

    fn source_offset(&self, pos: usize) -> usize {
        let line = self.starts.partition_point(|&(start, _)| start <= pos).saturating_sub(1);
        self.starts
            .get(line)
            .map_or(pos, |&(start, source)| source + (pos - start))
    }
}

fn collect_comments(html: &str, offset_of: impl Fn(usize) -> usize, sites: &mut Vec<MarkerSite>) {
    for caps in COMMENT.captures_iter(html) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let text = body.as_str().trim();
        if !text.contains(MARKER_NEEDLE) {
            continue;
        }
        sites.push(MarkerSite {
            text: text.to_string(),
            offset: offset_of(whole.start()),
            already_injected: INJECTED_CONTAINER.is_match(&html[whole.end()..]),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_html_markers_in_order() {
        let html = "<p>a</p><!-- embed-pong --><!-- note --><!--embed-{$PATH}-->";
        let sites = MarkerLocator::new().locate(Page::html(html));
        let texts: Vec<_> = sites.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["embed-pong", "embed-{$PATH}"]);
        assert_eq!(sites[0].offset, 8);
    }

    #[test]
    fn detects_existing_container() {
        let html = r#"<!-- embed-pong --><div class="demo-container demo-project-embed"></div><!-- embed-pong --><p></p>"#;
        let sites = MarkerLocator::new().locate(Page::html(html));
        assert!(sites[0].already_injected);
        assert!(!sites[1].already_injected);
    }

    #[test]
    fn multi_line_comment_is_trimmed() {
        let html = "<!--\n  embed-demo: {$PATH}/main\n-->";
        let sites = MarkerLocator::new().locate(Page::html(html));
        assert_eq!(sites[0].text, "embed-demo: {$PATH}/main");
    }

    #[test]
    fn markdown_ignores_code_blocks() {
        let md = "# Title\n\n<!-- embed-pong -->\n\n```\n<!-- embed-hidden -->\n```\n\nText <!-- embed-inline --> here.\n";
        let sites = MarkerLocator::new().locate(Page::markdown(md));
        let texts: Vec<_> = sites.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["embed-pong", "embed-inline"]);
        assert_eq!(&md[sites[0].offset..sites[0].offset + 4], "<!--");
        assert_eq!(&md[sites[1].offset..sites[1].offset + 4], "<!--");
    }

    #[test]
    fn markdown_blockquote_marker() {
        let md = "Intro\n\n> <!--\n> embed-pong\n> -->\n";
        let sites = MarkerLocator::new().locate(Page::markdown(md));
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].text, "embed-pong");
        assert_eq!(&md[sites[0].offset..sites[0].offset + 4], "<!--");
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(PageFormat::from_extension("MD"), PageFormat::Markdown);
        assert_eq!(PageFormat::from_extension("html"), PageFormat::Html);
    }
}
