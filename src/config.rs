use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::session::SessionOptions;

/// Defaults that can be stored in a flag file and overridden on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub output: Option<PathBuf>,
    pub wellness_url: Option<String>,
    pub signup_url: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            output: other.output.clone().or_else(|| self.output.clone()),
            wellness_url: other
                .wellness_url
                .clone()
                .or_else(|| self.wellness_url.clone()),
            signup_url: other.signup_url.clone().or_else(|| self.signup_url.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Session settings, falling back to the stock button links.
    pub fn session_options(&self) -> SessionOptions {
        let defaults = SessionOptions::default();
        SessionOptions {
            wellness_url: self.wellness_url.clone().unwrap_or(defaults.wellness_url),
            signup_url: self.signup_url.clone().unwrap_or(defaults.signup_url),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mailform").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mailform")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mailform").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("mailform")
                .join("config");
        }
    }

    PathBuf::from(".mailformrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mailformrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# mailform defaults (saved with --save)".to_string());
    if let Some(output) = &flags.output {
        lines.push(format!("--output {}", output.display()));
    }
    if let Some(url) = &flags.wellness_url {
        lines.push(format!("--wellness-url {url}"));
    }
    if let Some(url) = &flags.signup_url {
        lines.push(format!("--signup-url {url}"));
    }
    if let Some(log) = &flags.debug_log {
        lines.push(format!("--debug-log {}", log.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list, ignoring everything else.
///
/// Values may be given as `--flag value` or `--flag=value`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token, None),
        };
        let is_known = matches!(
            name,
            "--output" | "--wellness-url" | "--signup-url" | "--debug-log"
        );
        if is_known {
            let value = match inline {
                Some(value) => Some(value),
                None => {
                    let next = tokens.get(i + 1).cloned();
                    if next.is_some() {
                        i += 1;
                    }
                    next
                }
            };
            if let Some(value) = value {
                match name {
                    "--output" => flags.output = Some(PathBuf::from(value)),
                    "--wellness-url" => flags.wellness_url = Some(value),
                    "--signup-url" => flags.signup_url = Some(value),
                    _ => flags.debug_log = Some(PathBuf::from(value)),
                }
            }
        }
        i += 1;
    }
    flags
}
