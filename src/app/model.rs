use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::LineEditor;
use crate::export::download_link;
use crate::session::{Field, Session};
use crate::template::{DEFAULT_OUTPUT_FILE, preview_lines};
use crate::ui::viewport::Viewport;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Columns a tab character expands to in the HTML code view.
const TAB_WIDTH: usize = 4;

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Edit,
    Preview,
    Export,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Edit, Self::Preview, Self::Export];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Edit => "Edit Content",
            Self::Preview => "Preview",
            Self::Export => "Export",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Edit => 0,
            Self::Preview => 1,
            Self::Export => 2,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Edit => Self::Preview,
            Self::Preview => Self::Export,
            Self::Export => Self::Edit,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Edit => Self::Export,
            Self::Preview => Self::Edit,
            Self::Export => Self::Preview,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The editing session over the loaded template
    pub session: Session,
    /// Active tab
    pub tab: Tab,
    /// Index of the selected form field
    pub selected: usize,
    /// Scroll state of the form
    pub form_viewport: Viewport,
    /// Scroll state of the preview and HTML code panes
    pub viewport: Viewport,
    /// Open field editor, if a field is being edited
    pub editing: Option<LineEditor>,
    /// Plain-text rendering of the modified template
    pub preview: Vec<String>,
    /// Modified template split into display lines
    pub export: Vec<String>,
    /// Data-URI anchor for the modified template
    pub download_link: String,
    /// File name offered by the download link
    pub output_name: String,
    /// Where saves go, shown in the status bar
    pub destination: String,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after a first quit attempt with unsaved changes; a second quit proceeds
    pub quit_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("tab", &self.tab)
            .field("selected", &self.selected)
            .field("editing", &self.editing.is_some())
            .field("pending", &self.session.pending().len())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for `session` on a terminal of the given size.
    pub fn new(session: Session, terminal_size: (u16, u16)) -> Self {
        let (width, height) = terminal_size;
        let pane_height = crate::ui::pane_height(height);
        let mut model = Self {
            session,
            form_viewport: Viewport::new(width, pane_height, 0),
            viewport: Viewport::new(width, pane_height, 0),
            ..Self::default()
        };
        model.refresh_output();
        model
    }

    /// Set the file name used by the download link.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self.refresh_output();
        self
    }

    /// Recompute everything derived from the modified template.
    pub fn refresh_output(&mut self) {
        let html = self.session.modified();
        self.preview = preview_lines(html);
        self.export = html
            .lines()
            .map(|line| line.replace('\t', &" ".repeat(TAB_WIDTH)))
            .collect();
        self.download_link = download_link(html, &self.output_name);
        self.viewport.set_total_lines(self.pane_len());
    }

    /// Number of scrollable lines in the active tab.
    pub fn pane_len(&self) -> usize {
        match self.tab {
            Tab::Edit => 0,
            Tab::Preview => self.preview.len(),
            Tab::Export => self.export.len(),
        }
    }

    /// The field under the selection, if any.
    pub fn selected_field(&self) -> Option<&Field> {
        self.session.field(self.selected)
    }

    /// Whether quitting now would lose work.
    pub fn has_unsaved_work(&self) -> bool {
        self.session.has_pending() || self.editing.as_ref().is_some_and(LineEditor::is_dirty)
    }

    pub(super) fn scroll_to_selected(&mut self) {
        let rows = crate::ui::form_rows(self.session.fields());
        self.form_viewport.set_total_lines(rows.len());
        if let Some((label, value)) = crate::ui::field_rows(&rows, self.selected) {
            self.form_viewport.scroll_to_show(label, value);
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            session: Session::empty(),
            tab: Tab::Edit,
            selected: 0,
            form_viewport: Viewport::new(80, 20, 0),
            viewport: Viewport::new(80, 20, 0),
            editing: None,
            preview: Vec::new(),
            export: Vec::new(),
            download_link: String::new(),
            output_name: DEFAULT_OUTPUT_FILE.to_string(),
            destination: DEFAULT_OUTPUT_FILE.to_string(),
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
        }
    }
}
