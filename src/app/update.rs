use crate::app::{Model, Tab, ToastLevel};
use crate::editor::{Direction, LineEditor};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Tabs
    /// Switch to the next tab
    NextTab,
    /// Switch to the previous tab
    PrevTab,
    /// Switch to a specific tab
    SelectTab(Tab),

    // Form
    /// Select the next field
    SelectNext,
    /// Select the previous field
    SelectPrev,
    /// Select the first field
    SelectFirst,
    /// Select the last field
    SelectLast,
    /// Open the editor on the selected field
    StartEdit,
    /// Write the editor text back to the field
    CommitEdit,
    /// Close the editor without changing the field
    CancelEdit,
    /// Put the selected field back to its original text
    RevertField,

    // Field editor
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert pasted text at the cursor
    EditorInsertStr(String),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Delete everything before the cursor (Ctrl+U)
    EditorClearToStart,
    /// Move cursor one character
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EditorMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EditorMoveWordRight,

    // Preview and export
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to the first line
    GoToTop,
    /// Go to the last line
    GoToBottom,

    // Output
    /// Apply pending edits and write the modified template
    Save,
    /// Copy the modified HTML to the clipboard
    CopyHtml,
    /// Copy the data-URI download link to the clipboard
    CopyDownloadLink,

    // Help
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Saving and clipboard access happen afterwards, in the side-effect pass.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save keeps the flag so a save can come between two quit presses.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        // Tabs
        Message::NextTab => {
            let tab = model.tab.next();
            switch_tab(&mut model, tab);
        }
        Message::PrevTab => {
            let tab = model.tab.prev();
            switch_tab(&mut model, tab);
        }
        Message::SelectTab(tab) => switch_tab(&mut model, tab),

        // Form
        Message::SelectNext => {
            let last = model.session.fields().len().saturating_sub(1);
            model.selected = (model.selected + 1).min(last);
            model.scroll_to_selected();
        }
        Message::SelectPrev => {
            model.selected = model.selected.saturating_sub(1);
            model.scroll_to_selected();
        }
        Message::SelectFirst => {
            model.selected = 0;
            model.scroll_to_selected();
        }
        Message::SelectLast => {
            model.selected = model.session.fields().len().saturating_sub(1);
            model.scroll_to_selected();
        }
        Message::StartEdit => {
            if model.editing.is_none()
                && let Some(field) = model.selected_field()
            {
                model.editing = Some(LineEditor::from_text(&field.value));
            }
        }
        Message::CommitEdit => commit_edit(&mut model),
        Message::CancelEdit => {
            model.editing = None;
        }
        Message::RevertField => {
            if model.editing.is_none() && model.session.revert_field(model.selected) {
                model.show_toast(ToastLevel::Info, "Field reverted to original text");
            }
        }

        // Field editor
        Message::EditorInsertChar(ch) => {
            if let Some(editor) = &mut model.editing {
                editor.insert_char(ch);
            }
        }
        Message::EditorInsertStr(text) => {
            if let Some(editor) = &mut model.editing {
                editor.insert_str(&text);
            }
        }
        Message::EditorDeleteBack => {
            if let Some(editor) = &mut model.editing {
                editor.delete_back();
            }
        }
        Message::EditorDeleteForward => {
            if let Some(editor) = &mut model.editing {
                editor.delete_forward();
            }
        }
        Message::EditorClearToStart => {
            if let Some(editor) = &mut model.editing {
                editor.clear_to_start();
            }
        }
        Message::EditorMoveCursor(direction) => {
            if let Some(editor) = &mut model.editing {
                editor.move_cursor(direction);
            }
        }
        Message::EditorMoveHome => {
            if let Some(editor) = &mut model.editing {
                editor.move_home();
            }
        }
        Message::EditorMoveEnd => {
            if let Some(editor) = &mut model.editing {
                editor.move_end();
            }
        }
        Message::EditorMoveWordLeft => {
            if let Some(editor) = &mut model.editing {
                editor.move_word_left();
            }
        }
        Message::EditorMoveWordRight => {
            if let Some(editor) = &mut model.editing {
                editor.move_word_right();
            }
        }

        // Preview and export
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        // Output
        // The open editor is committed first so Ctrl+S saves what is on screen.
        Message::Save => commit_edit(&mut model),
        // Clipboard and redraw: handled in effects / event loop
        Message::CopyHtml | Message::CopyDownloadLink | Message::Redraw => {}

        // Help
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            let pane_height = crate::ui::pane_height(height);
            model.viewport.resize(width, pane_height);
            model.form_viewport.resize(width, pane_height);
            model.scroll_to_selected();
        }

        // Application
        Message::Quit => {
            if model.has_unsaved_work() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press q again to quit, or s to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn switch_tab(model: &mut Model, tab: Tab) {
    if model.tab == tab {
        return;
    }
    model.tab = tab;
    model.viewport.go_to_top();
    model.viewport.set_total_lines(model.pane_len());
}

fn commit_edit(model: &mut Model) {
    if let Some(editor) = model.editing.take() {
        model.session.set_field(model.selected, editor.into_text());
    }
}
