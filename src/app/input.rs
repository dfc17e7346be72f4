use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model, Tab};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Paste(text) if model.editing.is_some() => {
                Some(Message::EditorInsertStr(text.clone()))
            }
            Event::Resize(w, h) => {
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if model.editing.is_some() {
            return Self::handle_editor_key(key, ctrl);
        }

        match key.code {
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('c') if ctrl => Some(Message::Quit),
            KeyCode::Tab => Some(Message::NextTab),
            KeyCode::BackTab => Some(Message::PrevTab),
            KeyCode::Char('1') => Some(Message::SelectTab(Tab::Edit)),
            KeyCode::Char('2') => Some(Message::SelectTab(Tab::Preview)),
            KeyCode::Char('3') => Some(Message::SelectTab(Tab::Export)),
            KeyCode::Char('s') => Some(Message::Save),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => match model.tab {
                Tab::Edit => Self::handle_form_key(key),
                Tab::Preview | Tab::Export => Self::handle_pane_key(key, model),
            },
        }
    }

    fn handle_editor_key(key: KeyEvent, ctrl: bool) -> Option<Message> {
        match key.code {
            KeyCode::Enter => Some(Message::CommitEdit),
            KeyCode::Esc => Some(Message::CancelEdit),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('u') if ctrl => Some(Message::EditorClearToStart),
            KeyCode::Char('a') if ctrl => Some(Message::EditorMoveHome),
            KeyCode::Char('e') if ctrl => Some(Message::EditorMoveEnd),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left if ctrl => Some(Message::EditorMoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::EditorMoveWordRight),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::EditorInsertChar(c))
            }
            _ => None,
        }
    }

    fn handle_form_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::SelectPrev),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::SelectFirst),
            KeyCode::Char('G') | KeyCode::End => Some(Message::SelectLast),
            KeyCode::Enter | KeyCode::Char('e') => Some(Message::StartEdit),
            KeyCode::Char('r') => Some(Message::RevertField),
            _ => None,
        }
    }

    fn handle_pane_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => {
                model.viewport.can_scroll_up().then_some(Message::ScrollUp(1))
            }
            KeyCode::Char(' ') | KeyCode::PageDown => {
                model.viewport.can_scroll_down().then_some(Message::PageDown)
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                model.viewport.can_scroll_up().then_some(Message::PageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('y') => Some(Message::CopyHtml),
            KeyCode::Char('l') => Some(Message::CopyDownloadLink),
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
