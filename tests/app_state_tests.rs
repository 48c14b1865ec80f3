//! Selection model tests
//!
//! Tests for cursor movement, snapshot refresh after execution, and the
//! output buffer lifecycle.

use deckhand::config::{Config, Context};
use deckhand::store::ContextStore;
use deckhand::ui::{App, AppEvent};
use tempfile::TempDir;

fn context_with_run(name: &str, label: &str, command: &str) -> Context {
    let mut ctx = Context::new(name, label);
    ctx.commands.insert("run".to_string(), command.to_string());
    ctx
}

fn create_test_app() -> (App, TempDir) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("config.json");

    let mut config = Config::default();
    for ctx in [
        context_with_run("alpha", "Alpha", "echo alpha"),
        context_with_run("bravo", "Bravo", "echo bravo"),
        Context::new("charlie", "Charlie"), // no run command
    ] {
        config.contexts.insert(ctx.name.clone(), ctx);
    }

    (App::new(ContextStore::with_config(config, path)), temp_dir)
}

#[test]
fn test_snapshot_sorted_and_cursor_at_top() {
    let (app, _dir) = create_test_app();
    let names: Vec<&str> = app.contexts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_cursor_clamps_no_wraparound() {
    let (mut app, _dir) = create_test_app();

    // Up at the top stays at the top.
    app.handle(AppEvent::MoveUp).expect("move");
    assert_eq!(app.cursor, 0);

    app.handle(AppEvent::MoveDown).expect("move");
    app.handle(AppEvent::MoveDown).expect("move");
    assert_eq!(app.cursor, 2);

    // Down at the bottom stays at the bottom.
    app.handle(AppEvent::MoveDown).expect("move");
    assert_eq!(app.cursor, 2);
}

#[test]
fn test_resize_updates_viewport_only() {
    let (mut app, _dir) = create_test_app();
    let cursor_before = app.cursor;

    app.handle(AppEvent::Resize(120, 50)).expect("resize");
    assert_eq!(app.width, 120);
    assert_eq!(app.height, 50);
    assert_eq!(app.cursor, cursor_before);
}

#[test]
fn test_quit_sets_flag() {
    let (mut app, _dir) = create_test_app();
    assert!(!app.should_quit);
    app.handle(AppEvent::Quit).expect("quit");
    assert!(app.should_quit);
}

#[test]
fn test_execute_fills_output_and_refreshes_snapshot() {
    let (mut app, _dir) = create_test_app();

    app.handle(AppEvent::Execute).expect("execute");
    assert!(app.last_output.contains("Command: echo alpha"));
    assert!(app.last_output.contains("STDOUT:\nalpha\n"));

    // The snapshot was re-pulled: it now carries the recorded result, and
    // the cursor is re-anchored to the same context name.
    assert_eq!(app.cursor, 0);
    let selected = app.selected().expect("selected");
    assert_eq!(selected.name, "alpha");
    assert!(selected.last_result.as_ref().expect("result").success);
}

#[test]
fn test_execute_without_run_command_reports_error() {
    let (mut app, _dir) = create_test_app();
    app.handle(AppEvent::MoveDown).expect("move");
    app.handle(AppEvent::MoveDown).expect("move");

    app.handle(AppEvent::Execute).expect("execute");
    assert!(app.last_output.contains("has no run command"));

    // Lookup failures do not create a result.
    assert!(app.selected().expect("selected").last_result.is_none());
}

#[test]
fn test_movement_clears_output_buffer() {
    let (mut app, _dir) = create_test_app();
    app.handle(AppEvent::Execute).expect("execute");
    assert!(!app.last_output.is_empty());

    app.handle(AppEvent::MoveDown).expect("move");
    assert!(app.last_output.is_empty());
}

#[test]
fn test_execute_on_empty_deck_is_a_no_op() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let store = ContextStore::with_config(
        Config::default(),
        temp_dir.path().join("config.json"),
    );
    let mut app = App::new(store);

    app.handle(AppEvent::Execute).expect("execute");
    assert!(app.last_output.is_empty());
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_execute_failure_is_recorded_not_fatal() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let mut config = Config::default();
    let ctx = context_with_run("flaky", "Flaky", "echo bad >&2 && exit 9");
    config.contexts.insert(ctx.name.clone(), ctx);
    let mut app = App::new(ContextStore::with_config(
        config,
        temp_dir.path().join("config.json"),
    ));

    app.handle(AppEvent::Execute).expect("execute");
    assert!(app.last_output.contains("Exit Code: 9"));
    assert!(app.last_output.contains("STDERR:\nbad\n"));

    let result = app
        .selected()
        .and_then(|c| c.last_result.as_ref())
        .expect("result");
    assert!(!result.success);
}
