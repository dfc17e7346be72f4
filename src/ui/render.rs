use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use unicode_width::UnicodeWidthChar;

use crate::app::{Model, Tab};
use crate::export::DOWNLOAD_LABEL;
use crate::session::FieldKind;

use super::form::{FormRow, field_rows, form_rows};
use super::{STATUS_BAR_HEIGHT, TAB_BAR_HEIGHT, overlays, status, style};

/// Width of the `  > ` gutter in front of field values.
const VALUE_INDENT: u16 = 4;

/// Rows taken by the export summary box.
const EXPORT_INFO_HEIGHT: u16 = 5;

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_rows = u16::from(model.active_toast().is_some());
    let [tabs_area, body_area, toast_area, status_area] = Layout::vertical([
        Constraint::Length(TAB_BAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(toast_rows),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);

    render_tabs(model, frame, tabs_area);
    match model.tab {
        Tab::Edit => render_form(model, frame, body_area),
        Tab::Preview => render_preview(model, frame, body_area),
        Tab::Export => render_export(model, frame, body_area),
    }
    status::render_toast_bar(model, frame, toast_area);
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_tabs(model: &Model, frame: &mut Frame, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()));
    let tabs = Tabs::new(titles)
        .select(model.tab.index())
        .highlight_style(style::active_tab())
        .divider("|");
    frame.render_widget(tabs, area);
}

fn render_form(model: &mut Model, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Edit Template Content ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = form_rows(model.session.fields());
    model.form_viewport.resize(inner.width, inner.height);
    model.form_viewport.set_total_lines(rows.len());
    if let Some((label, value)) = field_rows(&rows, model.selected) {
        // Keep a section's heading on screen together with its first field.
        let first = match label.checked_sub(1).map(|above| rows[above]) {
            Some(FormRow::Heading(_)) => label - 1,
            _ => label,
        };
        model.form_viewport.scroll_to_show(first, value);
    }

    let fields = model.session.fields();
    let value_width = usize::from(inner.width.saturating_sub(VALUE_INDENT));
    let mut lines: Vec<Line> = Vec::with_capacity(usize::from(inner.height));
    let mut cursor = None;

    for (screen_row, row) in rows[model.form_viewport.visible_range()].iter().enumerate() {
        match *row {
            FormRow::Heading(section) => {
                lines.push(Line::styled(section.title(), style::heading()));
            }
            FormRow::Spacer => lines.push(Line::raw("")),
            FormRow::Label(index) => {
                let field = &fields[index];
                let marker = if field.is_unsaved() {
                    Span::styled(" (unsaved)", style::unsaved())
                } else if field.is_modified() {
                    Span::styled(" (edited)", style::modified())
                } else {
                    Span::raw("")
                };
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::raw(field.label.as_str()),
                    marker,
                ]));
            }
            FormRow::Value(index) => {
                let field = &fields[index];
                let selected = index == model.selected;
                if selected && let Some(editor) = &model.editing {
                    let (visible, cursor_x) =
                        scrolled_text(editor.text(), editor.display_col(), value_width);
                    lines.push(Line::from(vec![
                        Span::styled("  > ", style::heading()),
                        Span::raw(visible),
                    ]));
                    let x = u16::try_from(cursor_x).unwrap_or(u16::MAX);
                    let y = u16::try_from(screen_row).unwrap_or(u16::MAX);
                    cursor = Some(Position::new(
                        inner.x.saturating_add(VALUE_INDENT).saturating_add(x),
                        inner.y.saturating_add(y),
                    ));
                    continue;
                }

                let gutter = if selected { "  > " } else { "    " };
                let value_style = match field.kind {
                    FieldKind::ButtonUrl { .. } | FieldKind::SocialUrl { .. } => style::link(),
                    FieldKind::Text { .. } | FieldKind::ButtonLabel { .. } => Style::default(),
                };
                let value_style = if selected {
                    value_style.patch(style::selected())
                } else {
                    value_style
                };
                let value = if field.value.is_empty() {
                    Span::styled("(empty)", style::dim())
                } else {
                    Span::styled(field.value.as_str(), value_style)
                };
                lines.push(Line::from(vec![Span::raw(gutter), value]));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

fn render_preview(model: &mut Model, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Preview of Modified Template ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    model.viewport.resize(inner.width, inner.height);
    model.viewport.set_total_lines(model.preview.len());
    if model.preview.is_empty() {
        let empty = Paragraph::new(Line::styled("(no visible text)", style::dim()));
        frame.render_widget(empty, inner);
        return;
    }
    let lines: Vec<Line> = model.preview[model.viewport.visible_range()]
        .iter()
        .map(|line| Line::raw(line.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_export(model: &mut Model, frame: &mut Frame, area: Rect) {
    let [info_area, code_area] = Layout::vertical([
        Constraint::Length(EXPORT_INFO_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(area);

    let info = vec![
        Line::from(vec![
            Span::raw("Save writes to: "),
            Span::styled(model.destination.as_str(), style::link()),
        ]),
        Line::from(vec![
            Span::raw(format!("{DOWNLOAD_LABEL}: ")),
            Span::styled(model.download_link.as_str(), style::link()),
        ]),
        Line::styled("s save · y copy HTML · l copy download link", style::dim()),
    ];
    let info_block = Block::default().title(" Export ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(info).block(info_block), info_area);

    let code_block = Block::default().title(" HTML Code ").borders(Borders::ALL);
    let inner = code_block.inner(code_area);
    frame.render_widget(code_block, code_area);

    model.viewport.resize(inner.width, inner.height);
    model.viewport.set_total_lines(model.export.len());
    let lines: Vec<Line> = model.export[model.viewport.visible_range()]
        .iter()
        .map(|line| Line::raw(line.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Slice `text` so the cursor at display column `cursor_col` fits in `width`.
///
/// Returns the visible text and the cursor's column within it.
fn scrolled_text(text: &str, cursor_col: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let skip_cols = (cursor_col + 1).saturating_sub(width);
    let mut skipped = 0;
    let mut used = 0;
    let mut visible = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if skipped < skip_cols {
            skipped += w;
            continue;
        }
        if used + w > width {
            break;
        }
        used += w;
        visible.push(ch);
    }
    (visible, cursor_col.saturating_sub(skipped))
}
