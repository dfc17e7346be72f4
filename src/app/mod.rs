//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Saving and clipboard access are side effects and run after `update`,
//! against the [`TemplateStore`] the app was built with.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, Tab, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::session::{Session, SessionOptions};
use crate::template::{DEFAULT_OUTPUT_FILE, TemplateError, TemplateStore};

/// Main application struct that owns the template store and runs the event loop.
pub struct App {
    store: Box<dyn TemplateStore>,
    options: SessionOptions,
    output_name: String,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application reading from and saving to `store`.
    pub fn new(store: impl TemplateStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            options: SessionOptions::default(),
            output_name: DEFAULT_OUTPUT_FILE.to_string(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set the button links the session starts with.
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the file name offered by the download link.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Load the template and start a session on it.
    ///
    /// # Errors
    /// Returns the store's error when the template is missing or unreadable.
    pub fn load_session(&self) -> Result<Session, TemplateError> {
        Session::load(self.store.as_ref(), self.options.clone())
    }

    fn initial_model(&self, session: Session, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(session, terminal_size).with_output_name(&self.output_name);
        model.destination = self.store.destination();
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("destination", &self.store.destination())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
