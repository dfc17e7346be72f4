//! Editing session over one template.
//!
//! A [`Session`] owns everything a single user's edit pass needs: the
//! original template, the form fields derived from it, the edits waiting
//! to be applied and the last modified document. It is created when the
//! template is loaded and dropped when the user is done; nothing is shared
//! between sessions.

use serde::Serialize;
use tracing::{debug, info};

use crate::template::{
    BUTTONS, ButtonKey, EditMap, EditableUnit, Rewriter, SocialLink, Template, TemplateError,
    TemplateStore,
};

/// Link behind the "Book Wellness Visits" button unless configured otherwise.
pub const DEFAULT_WELLNESS_URL: &str = "file:///C:/Users/Administrator/wellness/template.html";

/// Link behind the "Sign Up for the Program" button unless configured otherwise.
pub const DEFAULT_SIGNUP_URL: &str = "file:///C:/Users/Administrator/signup/template.html";

/// Characters of a text unit shown in its field label.
const LABEL_PREVIEW_CHARS: usize = 50;

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Current link of the wellness button as it appears in the template
    pub wellness_url: String,
    /// Current link of the signup button as it appears in the template
    pub signup_url: String,
}

impl SessionOptions {
    pub fn url_for(&self, button: ButtonKey) -> &str {
        match button {
            ButtonKey::Wellness => &self.wellness_url,
            ButtonKey::Signup => &self.signup_url,
        }
    }

    fn set_url(&mut self, button: ButtonKey, url: String) {
        match button {
            ButtonKey::Wellness => self.wellness_url = url,
            ButtonKey::Signup => self.signup_url = url,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            wellness_url: DEFAULT_WELLNESS_URL.to_string(),
            signup_url: DEFAULT_SIGNUP_URL.to_string(),
        }
    }
}

/// What a form field edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Text of an editable unit
    Text { tag: String, id: String },
    /// Link behind a button
    ButtonUrl { button: ButtonKey },
    /// Label shown on a button
    ButtonLabel { button: ButtonKey },
    /// Link of a social media anchor
    SocialUrl { platform: String },
}

/// Form section a field is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Text,
    Buttons,
    Social,
}

impl Section {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Text => "Edit Text Content",
            Self::Buttons => "Button Links",
            Self::Social => "Social Media Links",
        }
    }
}

/// A single-line form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Label shown next to the input
    pub label: String,
    /// Text as it appears in the original template
    pub original: String,
    /// Current input value
    pub value: String,
    /// Value at the last save
    #[serde(skip)]
    saved: String,
}

impl Field {
    fn new(kind: FieldKind, label: String, original: String) -> Self {
        Self {
            kind,
            label,
            value: original.clone(),
            saved: original.clone(),
            original,
        }
    }

    pub const fn section(&self) -> Section {
        match self.kind {
            FieldKind::Text { .. } => Section::Text,
            FieldKind::ButtonUrl { .. } | FieldKind::ButtonLabel { .. } => Section::Buttons,
            FieldKind::SocialUrl { .. } => Section::Social,
        }
    }

    /// Whether the value differs from the original template.
    pub fn is_modified(&self) -> bool {
        self.value != self.original
    }

    /// Whether the value changed since the last save.
    pub fn is_unsaved(&self) -> bool {
        self.value != self.saved
    }

    const fn is_label(&self) -> bool {
        matches!(self.kind, FieldKind::ButtonLabel { .. })
    }
}

/// Pending and applied edits of one kind.
#[derive(Debug, Clone, Default)]
struct EditLedger {
    pending: EditMap,
    applied: EditMap,
}

impl EditLedger {
    fn record(&mut self, original: &str, value: &str, saved: &str) {
        if value == saved {
            self.pending.remove(original);
        } else {
            self.pending.insert(original, value);
        }
    }

    fn commit(&mut self) -> usize {
        let committed = self.pending.len();
        self.applied.merge(&self.pending);
        self.pending.clear();
        committed
    }
}

/// Outcome of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    /// Pending edits that were applied by this save
    pub applied: usize,
    /// Whether the modified document differs from the previous one
    pub changed: bool,
}

/// One user's edit pass over a template.
#[derive(Debug)]
pub struct Session {
    template: Template,
    fields: Vec<Field>,
    edits: EditLedger,
    labels: EditLedger,
    options: SessionOptions,
    modified: String,
    rewriter: Rewriter,
}

impl Session {
    /// Start a session on `source`.
    pub fn new(source: impl Into<String>, options: SessionOptions) -> Self {
        let template = Template::parse(source);
        let fields = build_fields(&template, &options);
        let modified = template.source().to_string();
        debug!(fields = fields.len(), "session started");
        Self {
            template,
            fields,
            edits: EditLedger::default(),
            labels: EditLedger::default(),
            options,
            modified,
            rewriter: Rewriter::new(),
        }
    }

    /// Load the template from `store` and start a session on it.
    ///
    /// # Errors
    /// Propagates the store's load error; no default template is substituted.
    pub fn load(store: &dyn TemplateStore, options: SessionOptions) -> Result<Self, TemplateError> {
        let source = store.load()?;
        Ok(Self::new(source, options))
    }

    /// An empty session with no fields.
    pub fn empty() -> Self {
        Self::new(String::new(), SessionOptions::default())
    }

    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Original HTML text.
    pub fn original(&self) -> &str {
        self.template.source()
    }

    /// HTML text as of the last save.
    pub fn modified(&self) -> &str {
        &self.modified
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Social links of the original template.
    pub fn social_links(&self) -> Vec<SocialLink> {
        self.template.social_links()
    }

    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Text and link edits waiting for the next save.
    pub const fn pending(&self) -> &EditMap {
        &self.edits.pending
    }

    /// Button label overrides waiting for the next save.
    pub const fn pending_labels(&self) -> &EditMap {
        &self.labels.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.edits.pending.is_empty() || !self.labels.pending.is_empty()
    }

    /// Set the value of field `index`.
    ///
    /// Returns `false` when the index is out of range or the value did not
    /// change. Setting a field back to its saved value withdraws its
    /// pending edit.
    pub fn set_field(&mut self, index: usize, value: impl Into<String>) -> bool {
        let Some(field) = self.fields.get_mut(index) else {
            return false;
        };
        let value = value.into();
        if field.value == value {
            return false;
        }
        field.value = value;
        let ledger = if field.is_label() {
            &mut self.labels
        } else {
            &mut self.edits
        };
        ledger.record(&field.original, &field.value, &field.saved);
        debug!(index, label = %field.label, "field updated");
        true
    }

    /// Put field `index` back to its original template text.
    pub fn revert_field(&mut self, index: usize) -> bool {
        let Some(original) = self.fields.get(index).map(|f| f.original.clone()) else {
            return false;
        };
        self.set_field(index, original)
    }

    /// Record an `old -> new` edit by its original text.
    ///
    /// The edit goes to the field whose original text is `old` when there
    /// is one (button labels become label overrides); otherwise it is kept
    /// as a raw text edit.
    pub fn record_edit(&mut self, old: &str, new: &str) -> bool {
        if let Some(index) = self.fields.iter().position(|f| f.original == old) {
            return self.set_field(index, new);
        }
        if old.is_empty() || old == new {
            return false;
        }
        self.edits.pending.insert(old, new);
        true
    }

    /// Apply every pending edit to the original template.
    ///
    /// Pending edits join the ones applied by earlier saves, the whole set
    /// is rewritten onto the original text, and the pending maps are
    /// cleared.
    pub fn save(&mut self) -> SaveReport {
        let committed = self.edits.commit() + self.labels.commit();
        let modified = self.rewriter.apply(
            self.template.source(),
            &self.edits.applied,
            &self.labels.applied,
        );
        let changed = modified != self.modified;
        self.modified = modified;

        for field in &mut self.fields {
            field.saved.clone_from(&field.value);
            if let FieldKind::ButtonUrl { button } = field.kind {
                self.options.set_url(button, field.value.clone());
            }
        }
        info!(applied = committed, changed, "applied pending edits");
        SaveReport {
            applied: committed,
            changed,
        }
    }

    /// Save, then write the modified document to `store`.
    ///
    /// # Errors
    /// Returns the store's write error. The session state is already
    /// updated when that happens.
    pub fn save_to(&mut self, store: &mut dyn TemplateStore) -> Result<SaveReport, TemplateError> {
        let report = self.save();
        store.save(&self.modified)?;
        Ok(report)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}

fn build_fields(template: &Template, options: &SessionOptions) -> Vec<Field> {
    let mut fields: Vec<Field> = template
        .editable_units()
        .into_iter()
        .filter(EditableUnit::fits_field)
        .map(|unit| {
            let preview: String = unit.text.chars().take(LABEL_PREVIEW_CHARS).collect();
            Field::new(
                FieldKind::Text {
                    tag: unit.tag,
                    id: unit.id,
                },
                format!("Edit text: {preview}..."),
                unit.text,
            )
        })
        .collect();

    for button in BUTTONS {
        fields.push(Field::new(
            FieldKind::ButtonUrl { button: button.key },
            format!("{} Button URL", button.label),
            options.url_for(button.key).to_string(),
        ));
    }
    for button in BUTTONS {
        fields.push(Field::new(
            FieldKind::ButtonLabel { button: button.key },
            format!("{} Button Label", button.label),
            button.label.to_string(),
        ));
    }
    for link in template.social_links() {
        let label = link.label();
        fields.push(Field::new(
            FieldKind::SocialUrl {
                platform: link.platform,
            },
            label,
            link.href,
        ));
    }
    fields
}
