//! Textual rewriting of the original template.
//!
//! Edits are applied to the raw HTML text, never to a re-serialized tree.
//! Each edit runs through an ordered list of [`SubstitutionRule`]s and the
//! first rule that claims it does the rewrite: markup-aware rules come
//! first, the plain literal replacement last. Button label overrides are a
//! second pass that runs after every edit has been applied.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

/// Inline-styled span wrapping a button label.
static BUTTON_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span style="([^"]*)">\s*([^<]*?)\s*</span>"#).expect("compile button span regex")
});

/// Ordered mapping of original text to replacement text.
///
/// Keys are unique. Re-inserting an existing key replaces its value but
/// keeps its original position, so iteration follows the order in which
/// keys were first accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditMap {
    entries: Vec<(String, String)>,
}

impl EditMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or update the replacement for `old`.
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) {
        let old = old.into();
        let new = new.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == old) {
            entry.1 = new;
        } else {
            self.entries.push((old, new));
        }
    }

    /// Remove the entry for `old`, returning its replacement.
    pub fn remove(&mut self, old: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(key, _)| key == old)?;
        Some(self.entries.remove(idx).1)
    }

    /// Replacement recorded for `old`.
    pub fn get(&self, old: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == old)
            .map(|(_, new)| new.as_str())
    }

    /// Merge `other` into this map, entry by entry.
    pub fn merge(&mut self, other: &Self) {
        for (old, new) in other.iter() {
            self.insert(old, new);
        }
    }

    /// Iterate entries in acceptance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EditMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (old, new) in iter {
            map.insert(old, new);
        }
        map
    }
}

/// A phrase whose visible text does not appear verbatim in the markup.
///
/// The trimmed text of such an element loses embedded markup (a `<br>`),
/// so a plain replace of the visible text cannot match. Instead the whole
/// literal fragment is swapped for a rebuilt one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownPhrase {
    /// Substring of the visible text that identifies the phrase
    pub marker: &'static str,
    /// Exact markup fragment as it appears in the template
    pub markup: &'static str,
    /// Replacement fragment; `{new}` is substituted with the edited text
    pub template: &'static str,
}

impl KnownPhrase {
    /// Build the replacement fragment for `new`.
    pub fn render(&self, new: &str) -> String {
        self.template.replace("{new}", new)
    }
}

/// Subtitles of the stock template that wrap across a `<br>`.
pub const KNOWN_PHRASES: &[KnownPhrase] = &[
    KnownPhrase {
        marker: "Annual Wellness Visits:",
        markup: "<span>Annual Wellness Visits: <br>A Smart Investment in Workforce Success</span>",
        template: "<span>{new}</span>",
    },
    KnownPhrase {
        marker: "Healthy Employees,",
        markup: "<span>Healthy Employees, <br>Thriving Business</span>",
        template: "<span>{new}</span>",
    },
];

/// Buttons of the stock template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKey {
    Wellness,
    Signup,
}

/// A styled button and the label it carries in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    pub key: ButtonKey,
    /// Label as it appears in the template
    pub label: &'static str,
}

pub const BUTTONS: &[ButtonSpec] = &[
    ButtonSpec {
        key: ButtonKey::Wellness,
        label: "Book Wellness Visits",
    },
    ButtonSpec {
        key: ButtonKey::Signup,
        label: "Sign Up for the Program",
    },
];

/// One way of applying an `old -> new` edit to HTML text.
pub trait SubstitutionRule: std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite `html` for the edit, or return `None` to pass the edit on.
    fn rewrite(&self, html: &str, old: &str, new: &str) -> Option<String>;
}

/// Replaces a known phrase's whole markup fragment.
///
/// Claims an edit when `old` contains the phrase marker and the template
/// still contains the literal fragment.
#[derive(Debug, Clone, Copy)]
pub struct KnownPhraseRule {
    phrase: KnownPhrase,
}

impl KnownPhraseRule {
    pub const fn new(phrase: KnownPhrase) -> Self {
        Self { phrase }
    }
}

impl SubstitutionRule for KnownPhraseRule {
    fn name(&self) -> &'static str {
        "known-phrase"
    }

    fn rewrite(&self, html: &str, old: &str, new: &str) -> Option<String> {
        if !old.contains(self.phrase.marker) || !html.contains(self.phrase.markup) {
            return None;
        }
        Some(html.replace(self.phrase.markup, &self.phrase.render(new)))
    }
}

/// Replaces every occurrence of `old` with `new`.
///
/// Replacement is global: an edited phrase that also appears inside
/// unrelated text is replaced there too.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralRule;

impl SubstitutionRule for LiteralRule {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn rewrite(&self, html: &str, old: &str, new: &str) -> Option<String> {
        Some(html.replace(old, new))
    }
}

/// Relabels a button while keeping its span's inline style.
#[derive(Debug, Clone, Copy)]
pub struct ButtonLabelRule {
    label: &'static str,
}

impl ButtonLabelRule {
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl SubstitutionRule for ButtonLabelRule {
    fn name(&self) -> &'static str {
        "button-label"
    }

    fn rewrite(&self, html: &str, old: &str, new: &str) -> Option<String> {
        if old != self.label {
            return None;
        }
        let out = BUTTON_SPAN.replace_all(html, |caps: &Captures<'_>| {
            if &caps[2] == self.label {
                format!(r#"<span style="{}">{new}</span>"#, &caps[1])
            } else {
                caps[0].to_string()
            }
        });
        Some(out.into_owned())
    }
}

/// Applies edits and button label overrides to HTML text.
#[derive(Debug)]
pub struct Rewriter {
    edit_rules: Vec<Box<dyn SubstitutionRule>>,
    label_rules: Vec<Box<dyn SubstitutionRule>>,
}

impl Rewriter {
    /// Rules for the stock template: known phrases, then literal; one
    /// label rule per button.
    pub fn new() -> Self {
        let mut edit_rules: Vec<Box<dyn SubstitutionRule>> = KNOWN_PHRASES
            .iter()
            .map(|phrase| Box::new(KnownPhraseRule::new(*phrase)) as Box<dyn SubstitutionRule>)
            .collect();
        edit_rules.push(Box::new(LiteralRule));
        let label_rules = BUTTONS
            .iter()
            .map(|button| Box::new(ButtonLabelRule::new(button.label)) as Box<dyn SubstitutionRule>)
            .collect();
        Self {
            edit_rules,
            label_rules,
        }
    }

    /// Build a rewriter from explicit rule lists.
    pub fn with_rules(
        edit_rules: Vec<Box<dyn SubstitutionRule>>,
        label_rules: Vec<Box<dyn SubstitutionRule>>,
    ) -> Self {
        Self {
            edit_rules,
            label_rules,
        }
    }

    /// Apply `edits` in order, then `labels`, to `original`.
    ///
    /// Entries whose old and new text are equal, or whose old text is
    /// empty, are skipped. With nothing to apply the result equals
    /// `original`.
    pub fn apply(&self, original: &str, edits: &EditMap, labels: &EditMap) -> String {
        let mut html = original.to_string();
        for (old, new) in edits.iter() {
            html = Self::apply_one(&self.edit_rules, html, old, new);
        }
        for (old, new) in labels.iter() {
            html = Self::apply_one(&self.label_rules, html, old, new);
        }
        html
    }

    fn apply_one(rules: &[Box<dyn SubstitutionRule>], html: String, old: &str, new: &str) -> String {
        if old.is_empty() || old == new {
            return html;
        }
        for rule in rules {
            if let Some(out) = rule.rewrite(&html, old, new) {
                debug!(rule = rule.name(), old, new, "applied edit");
                return out;
            }
        }
        debug!(old, "no rule claimed edit");
        html
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `edits` to `original` with the stock rules and no label overrides.
pub fn apply_edits(original: &str, edits: &EditMap) -> String {
    Rewriter::new().apply(original, edits, &EditMap::new())
}
