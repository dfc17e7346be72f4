//! HTML email template model.
//!
//! This module handles:
//! - Parsing the template with scraper (html5ever, best-effort)
//! - Finding the text units a user may edit
//! - Finding social media links
//! - Rewriting the original text from a set of edits
//! - Rendering a plain-text preview

mod extract;
mod preview;
mod rewrite;
mod social;
mod store;
mod types;

pub use extract::{
    BUTTON_CLASS, BUTTON_TABLE_FONT, EDITABLE_TAGS, EditableUnit, Extractor, MAX_FIELD_CHARS,
    UnitFilter, editable_fields, extract,
};
pub use preview::preview_lines;
pub use rewrite::{
    BUTTONS, ButtonKey, ButtonLabelRule, ButtonSpec, EditMap, KNOWN_PHRASES, KnownPhrase,
    KnownPhraseRule, LiteralRule, Rewriter, SubstitutionRule, apply_edits,
};
pub use social::{SocialLink, find_social_links};
pub use store::{FileStore, MemoryStore, TemplateError, TemplateStore};
pub use types::Template;

/// Default template file name, read from the working directory.
pub const DEFAULT_TEMPLATE_FILE: &str = "template.html";

/// Default file the modified template is written to.
pub const DEFAULT_OUTPUT_FILE: &str = "modified_template.html";

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><body>
<h1>Hello</h1>
<p>Hello</p>
<a href="https://www.facebook.com/ourpage">fb</a>
<span>Annual Wellness Visits: <br>A Smart Investment in Workforce Success</span>
</body></html>"#;

    #[test]
    fn test_template_exposes_source_unchanged() {
        let template = Template::parse(SAMPLE);
        assert_eq!(template.source(), SAMPLE);
    }

    #[test]
    fn test_extract_then_apply_known_phrase_unit() {
        let template = Template::parse(SAMPLE);
        let unit = template
            .editable_units()
            .into_iter()
            .find(|u| u.text.starts_with("Annual Wellness Visits:"))
            .unwrap();
        assert_eq!(
            unit.text,
            "Annual Wellness Visits: A Smart Investment in Workforce Success"
        );

        let mut edits = EditMap::new();
        edits.insert(unit.text, "New Title");
        let out = apply_edits(template.source(), &edits);
        assert!(out.contains("<span>New Title</span>"));
        assert!(!out.contains("<br>A Smart Investment"));
    }

    #[test]
    fn test_template_social_links() {
        let template = Template::parse(SAMPLE);
        let links = template.social_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].platform, "facebook");
    }
}
