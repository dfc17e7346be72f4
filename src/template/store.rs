//! Loading and saving template text.
//!
//! The core never touches storage directly: the host hands it a
//! [`TemplateStore`] that knows where the template comes from and where the
//! modified result goes.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading or saving a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read template {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template {} is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where template text is read from and written to.
pub trait TemplateStore {
    /// Read the original template text.
    ///
    /// # Errors
    /// Returns [`TemplateError::NotFound`] when there is no template, or a
    /// read/encoding error when it cannot be decoded.
    fn load(&self) -> Result<String, TemplateError>;

    /// Persist the modified template text.
    ///
    /// # Errors
    /// Returns [`TemplateError::Write`] when the destination cannot be written.
    fn save(&mut self, html: &str) -> Result<(), TemplateError>;

    /// Human-readable destination, for status messages.
    fn destination(&self) -> String;
}

/// Reads the template from one file and writes results to another.
#[derive(Debug, Clone)]
pub struct FileStore {
    template_path: PathBuf,
    output_path: PathBuf,
}

impl FileStore {
    pub fn new(template_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl TemplateStore for FileStore {
    fn load(&self) -> Result<String, TemplateError> {
        let path = &self.template_path;
        if !path.exists() {
            return Err(TemplateError::NotFound { path: path.clone() });
        }
        let bytes = fs::read(path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;
        let text =
            String::from_utf8(bytes).map_err(|_| TemplateError::Encoding { path: path.clone() })?;
        info!(path = %path.display(), bytes = text.len(), "loaded template");
        Ok(text)
    }

    fn save(&mut self, html: &str) -> Result<(), TemplateError> {
        let path = &self.output_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| TemplateError::Write {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(path, html).map_err(|source| TemplateError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = html.len(), "saved modified template");
        Ok(())
    }

    fn destination(&self) -> String {
        self.output_path.display().to_string()
    }
}

/// Keeps template text in memory. Useful for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    template: Option<String>,
    saved: Vec<String>,
}

impl MemoryStore {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            saved: Vec::new(),
        }
    }

    /// A store with no template, as if the file were missing.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Every text saved so far, oldest first.
    pub fn saved(&self) -> &[String] {
        &self.saved
    }
}

impl TemplateStore for MemoryStore {
    fn load(&self) -> Result<String, TemplateError> {
        self.template
            .clone()
            .ok_or_else(|| TemplateError::NotFound {
                path: PathBuf::from("<memory>"),
            })
    }

    fn save(&mut self, html: &str) -> Result<(), TemplateError> {
        debug!(bytes = html.len(), "saved template to memory");
        self.saved.push(html.to_string());
        Ok(())
    }

    fn destination(&self) -> String {
        "<memory>".to_string()
    }
}
