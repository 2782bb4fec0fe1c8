use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use vellum_commands::{CommandDef, CommandsConfig, ViewAccess};
use vellum_editor::{CommandEditor, CommandError, CommandOptions, EditorConfig};
use vellum_primitives::UiView;

use crate::common::{editor, editor_with, event_names, events_named, record};

fn counter_def(calls: &Arc<AtomicUsize>, with_stop: bool) -> CommandDef {
	let runs = calls.clone();
	let def = CommandDef::new().with_run(move |_, _, _| Ok(json!(runs.fetch_add(1, Ordering::SeqCst) + 1)));
	if with_stop { def.with_stop(|_, _, _| Ok(Value::Null)) } else { def }
}

#[test]
fn stopless_command_is_never_active() {
	let mut ed = editor();
	let calls = Arc::new(AtomicUsize::new(0));
	ed.commands_mut().add("ping", counter_def(&calls, false));

	ed.run_command("ping", CommandOptions::new()).expect("run");
	assert!(!ed.is_active("ping"));
	ed.run_command("ping", CommandOptions::new()).expect("run");
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn run_stop_pairs_toggle_activity() {
	let mut ed = editor();
	let calls = Arc::new(AtomicUsize::new(0));
	ed.commands_mut().add("toggle", counter_def(&calls, true));

	for _ in 0..3 {
		ed.run_command("toggle", CommandOptions::new()).expect("run");
		assert!(ed.is_active("toggle"));
		ed.stop_command("toggle", CommandOptions::new()).expect("stop");
		assert!(!ed.is_active("toggle"));
	}
	assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn strict_mode_runs_active_command_once() {
	let mut ed = editor();
	let calls = Arc::new(AtomicUsize::new(0));
	ed.commands_mut().add("toggle", counter_def(&calls, true));

	assert_eq!(ed.run_command("toggle", CommandOptions::new()), Ok(Some(json!(1))));
	assert_eq!(ed.run_command("toggle", CommandOptions::new()), Ok(None));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn non_strict_mode_reruns_active_command() {
	let mut ed = editor_with(EditorConfig {
		commands: CommandsConfig {
			strict: false,
			..CommandsConfig::default()
		},
		..EditorConfig::default()
	});
	let calls = Arc::new(AtomicUsize::new(0));
	ed.commands_mut().add("toggle", counter_def(&calls, true));

	ed.run_command("toggle", CommandOptions::new()).expect("run");
	assert_eq!(ed.run_command("toggle", CommandOptions::new()), Ok(Some(json!(2))));
	assert_eq!(ed.commands().active()["toggle"], json!(2));
}

#[test]
fn force_bypasses_both_guards() {
	let mut ed = editor();
	let calls = Arc::new(AtomicUsize::new(0));
	ed.commands_mut().add("toggle", counter_def(&calls, true));

	assert_eq!(ed.stop_command("toggle", CommandOptions::new()), Ok(None));
	assert_eq!(ed.stop_command("toggle", CommandOptions::forced()), Ok(Some(Value::Null)));

	ed.run_command("toggle", CommandOptions::new()).expect("run");
	assert_eq!(ed.run_command("toggle", CommandOptions::forced()), Ok(Some(json!(2))));
	assert!(ed.is_active("toggle"));
}

#[test]
fn abort_keeps_command_inactive_but_runs_side_effect() {
	let mut ed = editor();
	ed.on("run:core:fullscreen:before", |_, event| {
		event.abort();
	});
	let recorded = record(&ed);

	assert_eq!(ed.run_command("core:fullscreen", CommandOptions::new()), Ok(Some(Value::Null)));
	assert!(ed.is_view_open(UiView::Fullscreen));
	assert!(!ed.is_active("core:fullscreen"));
	assert_eq!(event_names(&recorded), vec!["run:core:fullscreen:before", "abort:core:fullscreen"]);
}

#[test]
fn unknown_command_warns_once() {
	let mut ed = editor();
	let recorded = record(&ed);

	assert!(ed.commands_mut().get("unregistered-id").is_none());
	let warnings = events_named(&recorded, "log:warning");
	assert_eq!(warnings.len(), 1);
	assert_eq!(warnings[0][0], json!("'unregistered-id' command not found"));
	assert_eq!(warnings[0][1]["ns"], json!("commands"));

	assert_eq!(ed.run_command("unregistered-id", CommandOptions::new()), Ok(None));
}

#[test]
fn stop_behavior_observes_inactive_state() {
	let mut ed = editor();
	let observed = Arc::new(AtomicUsize::new(usize::MAX));
	let sink = observed.clone();
	ed.commands_mut().add(
		"observer",
		CommandDef::new().with_run(|_, _, _| Ok(Value::Null)).with_stop(move |ed, _, _| {
			sink.store(usize::from(ed.commands().is_active("observer")), Ordering::SeqCst);
			Ok(Value::Null)
		}),
	);

	ed.run_command("observer", CommandOptions::new()).expect("run");
	ed.stop_command("observer", CommandOptions::new()).expect("stop");
	assert_eq!(observed.load(Ordering::SeqCst), 0);
}

#[test]
fn nested_failures_reach_the_caller() {
	let mut ed = editor();
	ed.commands_mut().add("fails", CommandDef::from_fn(|_, _, _| Err(CommandError::InvalidArgument("bad".into()))));
	ed.commands_mut().add(
		"wrapper",
		CommandDef::new()
			.with_run(|ed, _, _| Ok(ed.run_command("fails", CommandOptions::new())?.unwrap_or_default()))
			.with_stop(|_, _, _| Ok(Value::Null)),
	);

	assert_eq!(
		ed.run_command("wrapper", CommandOptions::new()),
		Err(CommandError::InvalidArgument("bad".into()))
	);
	assert!(!ed.is_active("wrapper"));
}

#[test]
fn editors_are_isolated() {
	let mut first = editor();
	let second = editor();
	first.run_command("core:open-layers", CommandOptions::new()).expect("run");
	assert!(first.is_active("core:open-layers"));
	assert!(!second.is_active("core:open-layers"));
}
