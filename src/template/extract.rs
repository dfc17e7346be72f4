//! Editable text unit extraction.
//!
//! Walks the parsed tree in document order and runs every allow-listed
//! element through an ordered chain of [`UnitFilter`]s. The first filter
//! that rejects an element drops it; survivors become [`EditableUnit`]s.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::{debug, trace};

/// Tags whose text may be offered for editing.
pub const EDITABLE_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "p", "div", "span"];

/// Class carried by anchors that are rendered as buttons.
pub const BUTTON_CLASS: &str = "v-button";

/// Inline style signature of the tables that wrap buttons.
pub const BUTTON_TABLE_FONT: &str = "font-family:arial,helvetica,sans-serif";

/// Longest text (in characters) the form offers as a single-line field.
pub const MAX_FIELD_CHARS: usize = 128;

/// A text-bearing element exposed to the user for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditableUnit {
    /// Element tag name (`p`, `span`, ...)
    pub tag: String,
    /// Trimmed text content
    pub text: String,
    /// Stable key derived from position and content
    pub id: String,
}

impl EditableUnit {
    fn new(tag: &str, text: String, index: usize) -> Self {
        let id = format!("text_{tag}_{index}_{:016x}", hash_text(&text));
        Self {
            tag: tag.to_string(),
            text,
            id,
        }
    }

    /// Whether the unit is short enough to be shown as a form field.
    pub fn fits_field(&self) -> bool {
        self.text.chars().count() <= MAX_FIELD_CHARS
    }
}

fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// A predicate that can drop a candidate element from extraction.
pub trait UnitFilter {
    /// Short name used in trace logs.
    fn name(&self) -> &'static str;

    /// Return `true` to drop `element`. `text` is its trimmed text content.
    fn rejects(&mut self, element: ElementRef<'_>, text: &str) -> bool;

    /// Forget any state carried over from a previous pass.
    fn reset(&mut self) {}
}

/// Drops elements without visible text.
#[derive(Debug, Default)]
pub struct EmptyText;

impl UnitFilter for EmptyText {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn rejects(&mut self, _element: ElementRef<'_>, text: &str) -> bool {
        text.is_empty()
    }
}

/// Drops elements nested inside a button anchor.
#[derive(Debug, Default)]
pub struct InsideButton;

impl UnitFilter for InsideButton {
    fn name(&self) -> &'static str {
        "button"
    }

    fn rejects(&mut self, element: ElementRef<'_>, _text: &str) -> bool {
        ancestor_elements(element).any(is_button_anchor)
    }
}

/// Drops elements inside a button wrapper table.
///
/// The wrapper is the nearest ancestor table carrying the button font
/// signature in its inline style; it only counts if it contains a button
/// anchor somewhere below it.
#[derive(Debug, Default)]
pub struct InsideButtonTable;

impl UnitFilter for InsideButtonTable {
    fn name(&self) -> &'static str {
        "button-table"
    }

    fn rejects(&mut self, element: ElementRef<'_>, _text: &str) -> bool {
        let Some(table) = ancestor_elements(element).find(|a| {
            a.value().name() == "table"
                && a
                    .value()
                    .attr("style")
                    .is_some_and(|style| style.contains(BUTTON_TABLE_FONT))
        }) else {
            return false;
        };
        descendant_elements(table).any(is_button_anchor)
    }
}

/// Drops containers whose text all comes from editable children.
///
/// Any direct text child, whitespace included, keeps the element.
#[derive(Debug, Default)]
pub struct ContainerOnly;

impl UnitFilter for ContainerOnly {
    fn name(&self) -> &'static str {
        "container"
    }

    fn rejects(&mut self, element: ElementRef<'_>, _text: &str) -> bool {
        let has_editable_child =
            descendant_elements(element).any(|d| is_editable_tag(d.value().name()));
        let has_direct_text = element.children().any(|child| child.value().is_text());
        has_editable_child && !has_direct_text
    }
}

/// Drops text already collected earlier in the pass. First occurrence wins.
#[derive(Debug, Default)]
pub struct DuplicateText {
    seen: HashSet<String>,
}

impl UnitFilter for DuplicateText {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn rejects(&mut self, _element: ElementRef<'_>, text: &str) -> bool {
        // Last in the chain, so only survivors are recorded.
        !self.seen.insert(text.to_string())
    }

    fn reset(&mut self) {
        self.seen.clear();
    }
}

/// Runs the filter chain over a document.
pub struct Extractor {
    filters: Vec<Box<dyn UnitFilter>>,
}

impl Extractor {
    /// The standard chain: empty, button, button table, container, duplicate.
    pub fn new() -> Self {
        Self {
            filters: vec![
                Box::new(EmptyText),
                Box::new(InsideButton),
                Box::new(InsideButtonTable),
                Box::new(ContainerOnly),
                Box::new(DuplicateText::default()),
            ],
        }
    }

    /// A chain with no filters at all.
    pub fn bare() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter to the end of the chain.
    #[must_use]
    pub fn with_filter(mut self, filter: impl UnitFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Extract editable units from `tree` in document order.
    pub fn extract(&mut self, tree: &Html) -> Vec<EditableUnit> {
        for filter in &mut self.filters {
            filter.reset();
        }

        let mut units = Vec::new();
        for element in tree
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
        {
            let tag = element.value().name();
            if !is_editable_tag(tag) {
                continue;
            }
            let raw: String = element.text().collect();
            let text = raw.trim();

            if let Some(filter) = self
                .filters
                .iter_mut()
                .find_map(|f| f.rejects(element, text).then_some(f.name()))
            {
                trace!(tag, filter, "dropped candidate");
                continue;
            }
            units.push(EditableUnit::new(tag, text.to_string(), units.len()));
        }
        debug!(units = units.len(), "extracted editable units");
        units
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("Extractor").field("filters", &names).finish()
    }
}

/// Extract editable units with the standard filter chain.
pub fn extract(tree: &Html) -> Vec<EditableUnit> {
    Extractor::new().extract(tree)
}

/// Units short enough to be offered as single-line fields.
pub fn editable_fields(units: &[EditableUnit]) -> impl Iterator<Item = &EditableUnit> {
    units.iter().filter(|unit| unit.fits_field())
}

fn is_editable_tag(tag: &str) -> bool {
    EDITABLE_TAGS.contains(&tag)
}

fn is_button_anchor(element: ElementRef<'_>) -> bool {
    element.value().name() == "a" && element.value().classes().any(|c| c == BUTTON_CLASS)
}

fn ancestor_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.ancestors().filter_map(ElementRef::wrap)
}

fn descendant_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    // descendants() starts with the element itself
    element.descendants().skip(1).filter_map(ElementRef::wrap)
}
