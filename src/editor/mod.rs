//! Single-line field editor.
//!
//! Provides the text box used to edit one form field at a time, with
//! cursor management designed for integration into the TEA architecture.

mod line;

pub use line::{Direction, LineEditor};
