//! Plain-text preview of an HTML document.

use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Elements whose content never shows up in the preview.
const HIDDEN_TAGS: &[&str] = &["head", "title", "style", "script", "noscript"];

/// Elements that start and end on their own line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "body", "center", "div", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "section", "table", "tbody",
    "thead", "tr", "ul",
];

/// Render `html` as a list of text lines for display.
///
/// Whitespace runs collapse to one space, block elements and `<br>` break
/// lines, and consecutive blank lines collapse to one.
pub fn preview_lines(html: &str) -> Vec<String> {
    let tree = Html::parse_document(html);
    let mut out = String::new();
    walk(tree.root_element(), &mut out);

    let mut lines: Vec<String> = Vec::new();
    for line in out.lines().map(str::trim) {
        if line.is_empty() && lines.last().is_none_or(String::is_empty) {
            continue;
        }
        lines.push(line.to_string());
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

fn walk(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_TAGS.contains(&name) {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }
    let block = BLOCK_TAGS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_collapsed(out, text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    walk(child, out);
                }
            }
            _ => {}
        }
    }
    if name == "td" || name == "th" {
        out.push(' ');
    }
    if block {
        out.push('\n');
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    for (i, word) in text.split_whitespace().enumerate() {
        let starts_with_space = i > 0 || text.starts_with(char::is_whitespace);
        if starts_with_space && !out.ends_with([' ', '\n']) && !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    if text.ends_with(char::is_whitespace) && !out.ends_with([' ', '\n']) && !out.is_empty() {
        out.push(' ');
    }
}
