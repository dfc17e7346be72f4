//! mailform - edit the text, button links and social links of an HTML email template.
//!
//! # Usage
//!
//! ```bash
//! mailform template.html
//! mailform --output campaign.html template.html
//! mailform --list template.html
//! mailform --edits edits.json template.html
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use mailform::app::App;
use mailform::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use mailform::session::Session;
use mailform::template::{
    DEFAULT_OUTPUT_FILE, DEFAULT_TEMPLATE_FILE, FileStore, TemplateStore,
};

/// Edit the text, button links and social links of an HTML email template
#[derive(Parser, Debug)]
#[command(name = "mailform", version, about, long_about = None)]
struct Cli {
    /// HTML template to edit
    #[arg(value_name = "FILE", default_value = DEFAULT_TEMPLATE_FILE)]
    file: PathBuf,

    /// Where saved changes are written
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Current link of the "Book Wellness Visits" button
    #[arg(long, value_name = "URL")]
    wellness_url: Option<String>,

    /// Current link of the "Sign Up for the Program" button
    #[arg(long, value_name = "URL")]
    signup_url: Option<String>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Print the editable fields as JSON and exit
    #[arg(long, conflicts_with = "edits")]
    list: bool,

    /// Apply a JSON array of {"old", "new"} edits, save, and exit
    #[arg(long, value_name = "FILE.json")]
    edits: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// One entry of an `--edits` file.
#[derive(Debug, Deserialize)]
struct EditEntry {
    old: String,
    new: String,
}

fn init_tracing(debug_log: Option<&Path>) -> Result<()> {
    match debug_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env().add_directive(Level::DEBUG.into()))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn list_fields(store: &FileStore, flags: &ConfigFlags) -> Result<()> {
    let session = Session::load(store, flags.session_options())
        .context("Failed to load the email template")?;
    let json = serde_json::to_string_pretty(session.fields()).context("Failed to encode fields")?;
    println!("{json}");
    Ok(())
}

fn apply_edit_file(store: &mut FileStore, flags: &ConfigFlags, edits_path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(edits_path)
        .with_context(|| format!("Failed to read edits {}", edits_path.display()))?;
    let entries: Vec<EditEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse edits {}", edits_path.display()))?;

    let mut session = Session::load(store, flags.session_options())
        .context("Failed to load the email template")?;
    let recorded = entries
        .iter()
        .filter(|entry| session.record_edit(&entry.old, &entry.new))
        .count();
    let report = session
        .save_to(store)
        .context("Failed to write the modified template")?;
    info!(entries = entries.len(), recorded, "applied edit file");

    println!(
        "Applied {} of {} edits ({}); wrote {}",
        report.applied,
        entries.len(),
        if report.changed { "changed" } else { "unchanged" },
        store.destination()
    );
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let debug_log = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("MAILFORM_DEBUG_LOG").map(PathBuf::from));
    init_tracing(debug_log.as_deref())?;

    let output = effective
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));
    let mut store = FileStore::new(&cli.file, &output);

    if cli.list {
        return list_fields(&store, &effective);
    }
    if let Some(edits_path) = &cli.edits {
        return apply_edit_file(&mut store, &effective, edits_path);
    }

    let output_name = output
        .file_name()
        .map_or_else(|| DEFAULT_OUTPUT_FILE.to_string(), |name| name.to_string_lossy().into_owned());
    let mut app = App::new(store)
        .with_options(effective.session_options())
        .with_output_name(output_name)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
