use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

use crate::editor::Direction;
use crate::session::{Section, Session, SessionOptions};
use crate::template::{FileStore, MemoryStore};

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, Tab, ToastLevel, update};

const HTML: &str = r#"<html><body>
<h1>Welcome</h1>
<p>Sign Up</p>
<div class="footer">Questions? Sign Up anytime</div>
<table style="font-family:arial,helvetica,sans-serif;"><tr><td>
  <a class="v-button" href="file:///C:/Users/Administrator/wellness/template.html"><span style="font-size: 14px;">Book Wellness Visits</span></a>
</td></tr></table>
<a href="https://www.facebook.com/ourpage">Facebook</a>
</body></html>"#;

fn create_test_model() -> Model {
    Model::new(Session::new(HTML, SessionOptions::default()), (80, 24))
}

fn create_long_test_model() -> Model {
    let mut html = String::from("<html><body>");
    for i in 1..=60 {
        html.push_str(&format!("<p>Paragraph number {i}</p>\n"));
    }
    html.push_str("</body></html>");
    Model::new(Session::new(html, SessionOptions::default()), (80, 12))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn apply(model: Model, messages: impl IntoIterator<Item = Message>) -> Model {
    messages.into_iter().fold(model, update)
}

fn type_text(model: Model, text: &str) -> Model {
    apply(model, text.chars().map(Message::EditorInsertChar))
}

#[test]
fn test_new_model_starts_on_edit_tab() {
    let model = create_test_model();
    assert_eq!(model.tab, Tab::Edit);
    assert_eq!(model.selected, 0);
    assert!(model.editing.is_none());
    assert!(!model.has_unsaved_work());
    assert_eq!(model.session.modified(), HTML);
}

#[test]
fn test_new_model_builds_preview_and_export() {
    let model = create_test_model();
    assert!(model.preview.iter().any(|line| line.contains("Welcome")));
    assert_eq!(model.export.len(), HTML.lines().count());
    assert!(model.download_link.contains("modified_template.html"));
}

#[test]
fn test_next_tab_cycles() {
    let model = create_test_model();
    let model = update(model, Message::NextTab);
    assert_eq!(model.tab, Tab::Preview);
    let model = update(model, Message::NextTab);
    assert_eq!(model.tab, Tab::Export);
    let model = update(model, Message::NextTab);
    assert_eq!(model.tab, Tab::Edit);
}

#[test]
fn test_prev_tab_wraps() {
    let model = update(create_test_model(), Message::PrevTab);
    assert_eq!(model.tab, Tab::Export);
}

#[test]
fn test_switch_tab_resets_scroll() {
    let model = create_long_test_model();
    let model = apply(
        model,
        [Message::SelectTab(Tab::Export), Message::ScrollDown(5)],
    );
    assert_eq!(model.viewport.offset(), 5);
    let model = update(model, Message::SelectTab(Tab::Preview));
    assert_eq!(model.viewport.offset(), 0);
    assert_eq!(model.viewport.total_lines(), model.preview.len());
}

#[test]
fn test_selection_is_clamped() {
    let model = create_test_model();
    let model = update(model, Message::SelectPrev);
    assert_eq!(model.selected, 0);

    let last = model.session.fields().len() - 1;
    let model = update(model, Message::SelectLast);
    assert_eq!(model.selected, last);
    let model = update(model, Message::SelectNext);
    assert_eq!(model.selected, last);

    let model = update(model, Message::SelectFirst);
    assert_eq!(model.selected, 0);
}

#[test]
fn test_selecting_far_field_scrolls_form() {
    let model = create_long_test_model();
    let model = update(model, Message::SelectLast);
    assert!(model.form_viewport.offset() > 0);
    let model = update(model, Message::SelectFirst);
    assert_eq!(model.form_viewport.offset(), 0);
}

#[test]
fn test_edit_and_commit_marks_field_pending() {
    let model = update(create_test_model(), Message::StartEdit);
    assert_eq!(model.editing.as_ref().map(|e| e.text()), Some("Welcome"));

    let model = type_text(model, " aboard");
    let model = update(model, Message::CommitEdit);
    assert!(model.editing.is_none());

    let field = model.selected_field().unwrap();
    assert_eq!(field.value, "Welcome aboard");
    assert!(field.is_unsaved());
    assert_eq!(model.session.pending().get("Welcome"), Some("Welcome aboard"));
    // Nothing is applied before a save.
    assert_eq!(model.session.modified(), HTML);
}

#[test]
fn test_cancel_edit_keeps_value() {
    let model = apply(
        create_test_model(),
        [
            Message::StartEdit,
            Message::EditorClearToStart,
            Message::CancelEdit,
        ],
    );
    assert!(model.editing.is_none());
    assert_eq!(model.selected_field().unwrap().value, "Welcome");
    assert!(!model.session.has_pending());
}

#[test]
fn test_editor_messages_without_editor_are_ignored() {
    let model = apply(
        create_test_model(),
        [
            Message::EditorInsertChar('x'),
            Message::EditorDeleteBack,
            Message::EditorMoveCursor(Direction::Left),
        ],
    );
    assert_eq!(model.selected_field().unwrap().value, "Welcome");
}

#[test]
fn test_editor_cursor_movement() {
    let model = apply(
        create_test_model(),
        [
            Message::StartEdit,
            Message::EditorMoveHome,
            Message::EditorInsertChar('>'),
            Message::EditorMoveEnd,
            Message::EditorMoveCursor(Direction::Left),
            Message::EditorDeleteForward,
            Message::CommitEdit,
        ],
    );
    assert_eq!(model.selected_field().unwrap().value, ">Welcom");
}

#[test]
fn test_paste_joins_lines() {
    let model = apply(
        create_test_model(),
        [
            Message::StartEdit,
            Message::EditorClearToStart,
            Message::EditorInsertStr("Hello\nthere".to_string()),
            Message::CommitEdit,
        ],
    );
    assert_eq!(model.selected_field().unwrap().value, "Hello there");
}

#[test]
fn test_revert_field_restores_original() {
    let model = apply(
        create_test_model(),
        [
            Message::StartEdit,
            Message::EditorClearToStart,
            Message::EditorInsertStr("Hi".to_string()),
            Message::CommitEdit,
        ],
    );
    assert!(model.session.has_pending());

    let model = update(model, Message::RevertField);
    assert_eq!(model.selected_field().unwrap().value, "Welcome");
    assert!(!model.session.has_pending());
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(message, "Field reverted to original text");
    assert_eq!(level, ToastLevel::Info);
}

#[test]
fn test_revert_unchanged_field_has_no_toast() {
    let model = update(create_test_model(), Message::RevertField);
    assert!(model.active_toast().is_none());
}

#[test]
fn test_save_commits_open_editor() {
    let model = apply(
        create_test_model(),
        [Message::StartEdit, Message::EditorInsertChar('!'), Message::Save],
    );
    assert!(model.editing.is_none());
    assert_eq!(model.session.pending().get("Welcome"), Some("Welcome!"));
}

#[test]
fn test_quit_without_changes_quits() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_with_pending_edits_asks_first() {
    let model = apply(
        create_test_model(),
        [Message::StartEdit, Message::EditorInsertChar('!'), Message::CommitEdit],
    );
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    let (message, level) = model.active_toast().unwrap();
    assert!(message.starts_with("Unsaved changes!"));
    assert_eq!(level, ToastLevel::Warning);

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_confirmation_resets_on_other_input() {
    let model = apply(
        create_test_model(),
        [Message::StartEdit, Message::EditorInsertChar('!'), Message::CommitEdit],
    );
    let model = apply(model, [Message::Quit, Message::SelectNext, Message::Quit]);
    assert!(!model.should_quit);
}

#[test]
fn test_quit_with_dirty_editor_asks_first() {
    let model = apply(
        create_test_model(),
        [Message::StartEdit, Message::EditorInsertChar('!'), Message::Quit],
    );
    assert!(!model.should_quit);
}

#[test]
fn test_toggle_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::ToggleHelp);
    assert!(!model.help_visible);
    let model = apply(model, [Message::ToggleHelp, Message::HideHelp]);
    assert!(!model.help_visible);
}

#[test]
fn test_resize_updates_viewports() {
    let model = update(create_test_model(), Message::Resize(100, 40));
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), crate::ui::pane_height(40));
    assert_eq!(model.form_viewport.height(), crate::ui::pane_height(40));
}

#[test]
fn test_toast_expires() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Info, "hello");
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.active_toast().is_some());
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(60)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_fields_cover_all_sections() {
    let model = create_test_model();
    let sections: Vec<Section> = model.session.fields().iter().map(|f| f.section()).collect();
    assert!(sections.contains(&Section::Text));
    assert!(sections.contains(&Section::Buttons));
    assert!(sections.contains(&Section::Social));
}

// Key mapping

#[test]
fn test_global_keys() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Tab), &model), Some(Message::NextTab));
    assert_eq!(App::handle_key(key(KeyCode::BackTab), &model), Some(Message::PrevTab));
    assert_eq!(
        App::handle_key(key(KeyCode::Char('3')), &model),
        Some(Message::SelectTab(Tab::Export))
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('s')), &model), Some(Message::Save));
    assert_eq!(App::handle_key(ctrl('s'), &model), Some(Message::Save));
    assert_eq!(App::handle_key(ctrl('c'), &model), Some(Message::Quit));
    assert_eq!(App::handle_key(key(KeyCode::Char('q')), &model), Some(Message::Quit));
    assert_eq!(
        App::handle_key(key(KeyCode::Char('?')), &model),
        Some(Message::ToggleHelp)
    );
}

#[test]
fn test_form_keys() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Char('j')), &model), Some(Message::SelectNext));
    assert_eq!(App::handle_key(key(KeyCode::Up), &model), Some(Message::SelectPrev));
    assert_eq!(App::handle_key(key(KeyCode::Enter), &model), Some(Message::StartEdit));
    assert_eq!(App::handle_key(key(KeyCode::Char('r')), &model), Some(Message::RevertField));
}

#[test]
fn test_pane_keys_respect_scroll_bounds() {
    let model = update(create_long_test_model(), Message::SelectTab(Tab::Export));
    assert_eq!(App::handle_key(key(KeyCode::Char('k')), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::ScrollDown(1))
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('y')), &model), Some(Message::CopyHtml));
    assert_eq!(
        App::handle_key(key(KeyCode::Char('l')), &model),
        Some(Message::CopyDownloadLink)
    );
}

#[test]
fn test_editor_captures_letters() {
    let model = update(create_test_model(), Message::StartEdit);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::EditorInsertChar('q'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('s')), &model),
        Some(Message::EditorInsertChar('s'))
    );
    assert_eq!(App::handle_key(key(KeyCode::Enter), &model), Some(Message::CommitEdit));
    assert_eq!(App::handle_key(key(KeyCode::Esc), &model), Some(Message::CancelEdit));
    assert_eq!(App::handle_key(ctrl('s'), &model), Some(Message::Save));
    assert_eq!(App::handle_key(ctrl('u'), &model), Some(Message::EditorClearToStart));
    assert_eq!(
        App::handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL), &model),
        Some(Message::EditorMoveWordLeft)
    );
}

#[test]
fn test_any_key_closes_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert_eq!(App::handle_key(key(KeyCode::Char('j')), &model), Some(Message::HideHelp));
}

#[test]
fn test_key_release_is_ignored() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let mut release = key(KeyCode::Char('j'));
    release.kind = KeyEventKind::Release;
    assert_eq!(
        App::handle_event(&Event::Key(release), &model, 0, &mut debouncer),
        None
    );
}

#[test]
fn test_paste_only_reaches_open_editor() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let paste = Event::Paste("hello".to_string());
    assert_eq!(App::handle_event(&paste, &model, 0, &mut debouncer), None);

    let model = update(model, Message::StartEdit);
    assert_eq!(
        App::handle_event(&paste, &model, 0, &mut debouncer),
        Some(Message::EditorInsertStr("hello".to_string()))
    );
}

#[test]
fn test_resize_event_is_debounced() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    assert_eq!(
        App::handle_event(&Event::Resize(120, 40), &model, 1000, &mut debouncer),
        None
    );
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(1050), None);

    // A later resize replaces the queued one.
    debouncer.queue(100, 30, 1080);
    assert_eq!(debouncer.take_ready(1150), None);
    assert_eq!(debouncer.take_ready(1180), Some((100, 30)));
    assert!(!debouncer.is_pending());
}

// Side effects

#[test]
fn test_save_effect_writes_output_file() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template.html");
    let output = dir.path().join("modified_template.html");
    std::fs::write(&template, HTML).unwrap();

    let mut app = App::new(FileStore::new(&template, &output));
    let session = app.load_session().unwrap();
    let mut model = Model::new(session, (80, 24));

    let messages = [
        Message::StartEdit,
        Message::EditorClearToStart,
        Message::EditorInsertStr("Hello team".to_string()),
        Message::Save,
    ];
    for msg in messages {
        let side_msg = msg.clone();
        model = update(model, msg);
        app.handle_message_side_effects(&mut model, &side_msg);
    }

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("<h1>Hello team</h1>"));
    assert_eq!(model.session.modified(), written);
    assert!(!model.session.has_pending());
    assert!(model.export.iter().any(|line| line.contains("Hello team")));
    assert_eq!(
        model.active_toast(),
        Some(("Changes saved successfully!", ToastLevel::Info))
    );
}

#[test]
fn test_save_effect_then_quit_does_not_ask() {
    let mut app = App::new(MemoryStore::new(HTML));
    let mut model = Model::new(app.load_session().unwrap(), (80, 24));
    for msg in [
        Message::StartEdit,
        Message::EditorInsertChar('!'),
        Message::CommitEdit,
        Message::Save,
    ] {
        let side_msg = msg.clone();
        model = update(model, msg);
        app.handle_message_side_effects(&mut model, &side_msg);
    }
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_save_failure_shows_error_toast() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template.html");
    std::fs::write(&template, HTML).unwrap();
    // The output path is an existing directory, so the write fails.
    let mut app = App::new(FileStore::new(&template, dir.path()));
    let mut model = Model::new(app.load_session().unwrap(), (80, 24));

    model = update(model, Message::Save);
    app.handle_message_side_effects(&mut model, &Message::Save);

    let (message, level) = model.active_toast().unwrap();
    assert!(message.starts_with("Save failed:"));
    assert_eq!(level, ToastLevel::Error);
}

#[test]
fn test_load_session_missing_template_fails() {
    let app = App::new(MemoryStore::missing());
    assert!(app.load_session().is_err());
}

#[test]
fn test_initial_model_uses_app_settings() {
    let app = App::new(MemoryStore::new(HTML))
        .with_output_name("campaign.html")
        .with_config_paths(Some("/tmp/global".into()), None);
    let model = app.initial_model(app.load_session().unwrap(), (80, 24));
    assert_eq!(model.destination, "<memory>");
    assert_eq!(model.output_name, "campaign.html");
    assert!(model.download_link.contains("campaign.html"));
    assert!(model.config_global_path.is_some());
}

#[test]
fn test_view_renders_without_panic() {
    let mut model = create_test_model();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| App::view(&mut model, frame)).unwrap();
}
