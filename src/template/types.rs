//! Core template types.

use scraper::Html;
use tracing::debug;

use super::extract::{EditableUnit, extract};
use super::social::{SocialLink, find_social_links};

/// A loaded HTML template.
///
/// The raw text is the source of truth and is never modified. The parsed
/// tree is derived from it and only used to locate editable units and
/// social links; rewriting always works on the raw text.
#[derive(Debug, Clone)]
pub struct Template {
    /// Original HTML text
    source: String,
    /// Parsed document tree
    tree: Html,
}

impl Template {
    /// Parse HTML text into a template.
    ///
    /// Parsing never fails: malformed markup is repaired the way a browser
    /// would, and anything beyond repair simply yields fewer elements.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let tree = Html::parse_document(&source);
        if !tree.errors.is_empty() {
            debug!(
                errors = tree.errors.len(),
                first = %tree.errors[0],
                "template parsed with recoverable errors"
            );
        }
        Self { source, tree }
    }

    /// Create an empty template.
    pub fn empty() -> Self {
        Self::parse(String::new())
    }

    /// The original HTML text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed document tree.
    pub const fn tree(&self) -> &Html {
        &self.tree
    }

    /// Editable text units in document order.
    pub fn editable_units(&self) -> Vec<EditableUnit> {
        extract(&self.tree)
    }

    /// Social media links in document order.
    pub fn social_links(&self) -> Vec<SocialLink> {
        find_social_links(&self.tree)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::empty()
    }
}
