//! Context store tests
//!
//! Tests for list ordering, switch/execute/add/remove semantics, and the
//! persistence behavior of mutating operations.

use deckhand::config::{Config, Context};
use deckhand::store::{ActivationStatus, ContextStore, StoreError};
use tempfile::TempDir;

fn context_with_run(name: &str, label: &str, command: &str) -> Context {
    let mut ctx = Context::new(name, label);
    ctx.commands.insert("run".to_string(), command.to_string());
    ctx
}

/// Store with three contexts persisted under a temp dir. The temp dir is
/// returned so it lives as long as the store.
fn create_test_store() -> (ContextStore, TempDir) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("config.json");

    let mut config = Config::default();
    for ctx in [
        context_with_run("bravo", "Bravo", "echo bravo"),
        context_with_run("alpha", "Alpha", "echo alpha"),
        Context::new("charlie", "Charlie"), // no run command
    ] {
        config.contexts.insert(ctx.name.clone(), ctx);
    }

    (ContextStore::with_config(config, path), temp_dir)
}

#[test]
fn test_list_sorted_by_name() {
    let (store, _dir) = create_test_store();
    let contexts = store.list();
    let names: Vec<&str> = contexts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
}

#[test]
fn test_list_is_idempotent() {
    let (store, _dir) = create_test_store();
    assert_eq!(store.list(), store.list());
}

#[test]
fn test_current_none_when_unset() {
    let (store, _dir) = create_test_store();
    assert!(store.current().is_none());
}

#[test]
fn test_current_tolerates_dangling_pointer() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let mut config = Config::default();
    config.current_context = "ghost".to_string();
    let store = ContextStore::with_config(config, temp_dir.path().join("config.json"));

    assert!(store.current().is_none());
}

#[test]
fn test_switch_unknown_name_fails_without_mutation() {
    let (mut store, _dir) = create_test_store();
    store.switch("alpha").expect("switch alpha");

    let err = store.switch("ghost").expect_err("should fail");
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.current_name(), "alpha");
}

#[test]
fn test_switch_commits_even_when_activation_fails() {
    let (mut store, _dir) = create_test_store();
    store
        .add(context_with_run("broken", "Broken", "exit 7"))
        .expect("add");

    let status = store.switch("broken").expect("switch");
    assert_eq!(status, ActivationStatus::Exited(7));
    assert_eq!(store.current_name(), "broken");
}

#[test]
fn test_switch_without_activation_command() {
    let (mut store, _dir) = create_test_store();
    let status = store.switch("charlie").expect("switch");
    assert_eq!(status, ActivationStatus::NoCommand);
    assert_eq!(store.current_name(), "charlie");
}

#[test]
fn test_switch_prefers_activate_role() {
    let (mut store, _dir) = create_test_store();
    let mut ctx = context_with_run("dual", "Dual", "exit 1");
    ctx.commands
        .insert("activate".to_string(), "true".to_string());
    store.add(ctx).expect("add");

    // The activate role (exit 0) wins over the run role (exit 1).
    let status = store.switch("dual").expect("switch");
    assert_eq!(status, ActivationStatus::Exited(0));
}

#[test]
fn test_execute_job_records_success() {
    let (mut store, _dir) = create_test_store();
    store.switch("alpha").expect("switch");

    let result = store.execute_job("alpha").expect("execute");
    assert!(result.success);
    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("STDOUT:\nalpha\n"));

    // getCurrent reflects the stored result.
    let current = store.current().expect("current");
    assert_eq!(current.last_result.as_ref(), Some(&result));
}

#[test]
fn test_execute_job_records_failure_without_error() {
    let (mut store, _dir) = create_test_store();
    store
        .add(context_with_run("flaky", "Flaky", "echo oops >&2 && exit 3"))
        .expect("add");

    let result = store.execute_job("flaky").expect("execute");
    assert!(!result.success);
    assert_eq!(result.exit_code, 3);
    assert!(result.output.contains("STDERR:\noops\n"));
}

#[test]
fn test_execute_job_replaces_previous_result() {
    let (mut store, _dir) = create_test_store();
    let first = store.execute_job("alpha").expect("first run");
    let second = store.execute_job("alpha").expect("second run");

    let stored = store.get("alpha").and_then(|c| c.last_result.as_ref());
    assert_eq!(stored, Some(&second));
    assert!(second.timestamp >= first.timestamp);
}

#[test]
fn test_execute_job_unknown_name() {
    let (mut store, _dir) = create_test_store();
    let err = store.execute_job("ghost").expect_err("should fail");
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_execute_job_without_run_command() {
    let (mut store, _dir) = create_test_store();
    let err = store.execute_job("charlie").expect_err("should fail");
    assert!(matches!(err, StoreError::NoRunCommand(_)));

    // No result is created on failure to look up the command.
    assert!(store.get("charlie").expect("get").last_result.is_none());
}

#[test]
fn test_expansion_feeds_execution() {
    let (mut store, _dir) = create_test_store();
    let mut ctx = context_with_run("greeter", "Greeter", "echo ${WHO}-${TONE}");
    ctx.variables.insert("WHO".to_string(), "ops".to_string());
    ctx.variables
        .insert("TONE".to_string(), "friendly".to_string());
    store.add(ctx).expect("add");

    let result = store.execute_job("greeter").expect("execute");
    assert!(result.output.contains("Command: echo ops-friendly"));
    assert!(result.output.contains("STDOUT:\nops-friendly\n"));
}

#[test]
fn test_add_overwrites_by_name() {
    let (mut store, _dir) = create_test_store();
    store
        .add(context_with_run("alpha", "Alpha v2", "echo new"))
        .expect("add");

    assert_eq!(store.list().len(), 3);
    assert_eq!(store.get("alpha").expect("get").label, "Alpha v2");
}

#[test]
fn test_remove_clears_current_pointer() {
    let (mut store, _dir) = create_test_store();
    store.switch("alpha").expect("switch");
    store.remove("alpha").expect("remove");

    assert!(store.current().is_none());
    assert!(store.get("alpha").is_none());
}

#[test]
fn test_remove_keeps_unrelated_current() {
    let (mut store, _dir) = create_test_store();
    store.switch("alpha").expect("switch");
    store.remove("bravo").expect("remove");

    assert_eq!(store.current_name(), "alpha");
}

#[test]
fn test_remove_unknown_name() {
    let (mut store, _dir) = create_test_store();
    let err = store.remove("ghost").expect_err("should fail");
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.list().len(), 3);
}

#[test]
fn test_mutations_persist_to_disk() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("config.json");

    let mut store = ContextStore::open_at(path.clone()).expect("open");
    store
        .add(context_with_run("persisted", "Persisted", "echo hi"))
        .expect("add");
    store.switch("persisted").expect("switch");
    let result = store.execute_job("persisted").expect("execute");

    // Reload from the same file: everything round-trips.
    let reloaded = ContextStore::open_at(path).expect("reload");
    assert_eq!(reloaded.current_name(), "persisted");
    let ctx = reloaded.get("persisted").expect("get");
    assert_eq!(ctx.last_result.as_ref(), Some(&result));
    assert_eq!(reloaded.config(), store.config());
}

#[test]
fn test_persistence_failure_propagates() {
    let temp_dir = TempDir::new().expect("create temp dir");
    // Parent "directory" is actually a file, so saving must fail.
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("write blocker");
    let path = blocker.join("config.json");

    let mut store = ContextStore::with_config(Config::default(), path);
    let err = store
        .add(Context::new("doomed", "Doomed"))
        .expect_err("persist should fail");
    assert!(matches!(err, StoreError::Persistence(_)));

    // The in-memory change is not rolled back.
    assert!(store.get("doomed").is_some());
}
