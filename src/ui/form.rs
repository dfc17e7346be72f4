//! Row layout of the Edit Content form.

use crate::session::{Field, Section};

/// One screen row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    /// Title of a section
    Heading(Section),
    /// Label of field `n`
    Label(usize),
    /// Input of field `n`
    Value(usize),
    /// Blank row between sections
    Spacer,
}

/// Lay out `fields` as rows, starting a new section whenever it changes.
pub fn form_rows(fields: &[Field]) -> Vec<FormRow> {
    let mut rows = Vec::with_capacity(fields.len() * 2 + 6);
    let mut current: Option<Section> = None;
    for (index, field) in fields.iter().enumerate() {
        let section = field.section();
        if current != Some(section) {
            if current.is_some() {
                rows.push(FormRow::Spacer);
            }
            rows.push(FormRow::Heading(section));
            current = Some(section);
        }
        rows.push(FormRow::Label(index));
        rows.push(FormRow::Value(index));
    }
    rows
}

/// Label and value rows of field `index`.
pub fn field_rows(rows: &[FormRow], index: usize) -> Option<(usize, usize)> {
    let label = rows.iter().position(|row| *row == FormRow::Label(index))?;
    Some((label, label + 1))
}
