use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, Tab};

use super::style;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let position = match model.tab {
        Tab::Edit => format!(
            "Field {}/{}",
            (model.selected + 1).min(model.session.fields().len()),
            model.session.fields().len()
        ),
        Tab::Preview | Tab::Export => format!(
            "Line {}/{}",
            (model.viewport.offset() + 1).min(model.viewport.total_lines()),
            model.viewport.total_lines()
        ),
    };
    let pending = model.session.pending().len() + model.session.pending_labels().len();
    let pending_indicator = if pending > 0 {
        format!("  [{pending} unsaved]")
    } else {
        String::new()
    };
    let editing_indicator = if model.editing.is_some() {
        "  [editing]"
    } else {
        ""
    };

    let status = format!(
        " {}  {}{}{}  ?:help",
        model.destination, position, pending_indicator, editing_indicator
    );
    frame.render_widget(Paragraph::new(status).style(style::status_bar()), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = style::toast(level);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
