use tracing::{debug, warn};

use crate::app::{App, Message, Model, ToastLevel};
use crate::export::copy_to_clipboard;

impl App {
    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => self.save(model),
            Message::CopyHtml => {
                let html = model.session.modified().to_string();
                Self::copy(model, &html, "Copied HTML to clipboard");
            }
            Message::CopyDownloadLink => {
                let link = model.download_link.clone();
                Self::copy(model, &link, "Copied download link to clipboard");
            }
            _ => {}
        }
    }

    fn save(&mut self, model: &mut Model) {
        let result = model.session.save_to(self.store.as_mut());
        // The session is updated even when the write fails.
        model.refresh_output();
        match result {
            Ok(report) => {
                debug!(
                    applied = report.applied,
                    changed = report.changed,
                    destination = %self.store.destination(),
                    "save finished"
                );
                model.show_toast(ToastLevel::Info, "Changes saved successfully!");
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }

    fn copy(model: &mut Model, text: &str, done: &str) {
        match copy_to_clipboard(text) {
            Ok(()) => model.show_toast(ToastLevel::Info, done),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Copy failed: {err}")),
        }
    }
}
