//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - the form layout of the Edit Content tab
//! - status bar, toasts and the help overlay

pub mod viewport;

mod form;
mod overlays;
mod render;
mod status;
mod style;

pub use form::{FormRow, field_rows, form_rows};
pub use render::render;

pub const TAB_BAR_HEIGHT: u16 = 1;
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows available inside a bordered pane for a terminal `height` rows tall.
pub const fn pane_height(height: u16) -> u16 {
    height.saturating_sub(TAB_BAR_HEIGHT + STATUS_BAR_HEIGHT + 2)
}
