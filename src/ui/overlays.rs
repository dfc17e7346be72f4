use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::style;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = style::heading();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Tabs", section_style));
    lines.push(Line::raw("  Tab / Shift-Tab     Next / previous tab"));
    lines.push(Line::raw("  1 2 3               Edit Content / Preview / Export"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Edit Content", section_style));
    lines.push(Line::raw("  j/k or Up/Down      Select field"));
    lines.push(Line::raw("  g / G               First / last field"));
    lines.push(Line::raw("  Enter or e          Edit field"));
    lines.push(Line::raw("  Enter / Esc         Apply / cancel edit"));
    lines.push(Line::raw("  r                   Revert field to original"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Field editor", section_style));
    lines.push(Line::raw("  Left/Right, Home/End Move cursor"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl-u              Delete to start"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Preview / Export", section_style));
    lines.push(Line::raw("  j/k, Space/b        Scroll line / page"));
    lines.push(Line::raw("  y                   Copy HTML to clipboard"));
    lines.push(Line::raw("  l                   Copy download link"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  s / Ctrl-s          Save changes"));
    lines.push(Line::raw("  q / Ctrl-c          Quit"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let content_height = inner.height.saturating_sub(1);
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(lines), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", style::dim());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
