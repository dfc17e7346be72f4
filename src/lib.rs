// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. template::TemplateError)
    clippy::module_name_repetitions
)]

//! # mailform
//!
//! A terminal editor for HTML email templates.
//!
//! mailform loads a template, lists its user-visible text, button links and
//! social media links as a form, and writes a modified copy with the edits
//! substituted into the original markup. Everything outside the edited
//! text is left byte-for-byte alone.
//!
//! ## Architecture
//!
//! The interactive host uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`template`]: Extraction, social-link discovery, rewriting, load/save
//! - [`session`]: One user's edit pass over a template
//! - [`editor`]: Single-line input buffer for form fields
//! - [`export`]: Download links and clipboard
//! - [`config`]: Saved defaults
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod export;
pub mod session;
pub mod template;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::session::Session;
    pub use crate::template::Template;
    pub use crate::ui::viewport::Viewport;
}
