use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use vellum_commands::builtins::{
	CANVAS_CLEAR, COMPONENT_DELETE, COMPONENT_ENTER, COMPONENT_EXIT, COMPONENT_NEXT, COMPONENT_PREV, COMPONENT_STYLE_CLEAR, COPY, PASTE,
	PREVIEW, REDO, TLB_CLONE, TLB_DELETE, UNDO,
};
use vellum_commands::{Capability, ClipboardAccess, CommandDef, SelectionAccess, UndoAccess, ViewAccess};
use vellum_editor::{CommandEditor, CommandError, CommandOptions};
use vellum_primitives::UiView;

use crate::common::{editor, event_names, events_named, id, names, record};

#[test]
fn copy_then_paste_clones_after_selection() {
	let mut ed = editor();
	let header = id(&ed, "header");
	ed.select(&[header]);

	assert_eq!(ed.run_command(COPY, CommandOptions::new()), Ok(Some(json!([header]))));
	let pasted = ed.run_command(PASTE, CommandOptions::new()).expect("paste").expect("result");

	let roots = ed.component_tree().roots().to_vec();
	assert_eq!(names(&ed, &roots), vec!["header", "header", "section", "footer", "floating"]);
	assert_eq!(pasted, json!([roots[1]]));
	assert_eq!(ed.selected_all(), vec![roots[1]]);
}

#[test]
fn toolbar_clone_inserts_copy_right_after_original() {
	let mut ed = editor();
	let title = id(&ed, "title");
	ed.select(&[title]);

	ed.run_command(TLB_CLONE, CommandOptions::new()).expect("clone");

	let siblings = ed.component_tree().siblings(title).to_vec();
	assert_eq!(names(&ed, &siblings), vec!["title", "title", "body"]);
	assert_eq!(siblings[0], title);
	assert_eq!(ed.selected_all(), vec![siblings[1]]);
	assert_eq!(ed.changes_count(), 1);
}

#[test]
fn uncopyable_components_are_not_copied() {
	let mut ed = editor();
	let footer = id(&ed, "footer");
	ed.select(&[footer]);

	assert_eq!(ed.run_command(COPY, CommandOptions::new()), Ok(Some(Value::Null)));
	assert!(ed.clipboard_contents().is_empty());
	assert_eq!(ed.run_command(PASTE, CommandOptions::new()), Ok(Some(Value::Null)));
	assert_eq!(ed.component_tree().len(), 6);
}

#[test]
fn paste_skips_removed_clipboard_entries() {
	let mut ed = editor();
	let header = id(&ed, "header");
	let body = id(&ed, "body");
	ed.set_clipboard(vec![header, body]);
	ed.select(&[body]);
	ed.run_command(COMPONENT_DELETE, CommandOptions::new().with("component", header.get())).expect("delete");
	ed.select(&[body]);

	let pasted = ed.run_command(PASTE, CommandOptions::new()).expect("paste").expect("result");
	assert_eq!(pasted.as_array().map(Vec::len), Some(1));
	let siblings = ed.component_tree().siblings(body).to_vec();
	assert_eq!(names(&ed, &siblings), vec!["title", "body", "body"]);
}

#[test]
fn delete_keeps_and_reports_unremovable_components() {
	let mut ed = editor();
	let header = id(&ed, "header");
	let footer = id(&ed, "footer");
	ed.select(&[header, footer]);
	let recorded = record(&ed);

	assert_eq!(ed.run_command(TLB_DELETE, CommandOptions::new()), Ok(Some(json!([header]))));
	assert!(!ed.component_tree().contains(header));
	assert!(ed.component_tree().contains(footer));
	assert_eq!(ed.selected_all(), vec![footer]);

	let warnings = events_named(&recorded, "log:warning");
	assert_eq!(warnings.len(), 1);
	assert_eq!(warnings[0][0], json!("The element is not removable"));
}

#[rstest]
#[case("title", COMPONENT_NEXT, "body")]
#[case("body", COMPONENT_PREV, "title")]
#[case("title", COMPONENT_EXIT, "section")]
#[case("title", "select-parent", "section")]
#[case("section", COMPONENT_ENTER, "title")]
#[case("floating", COMPONENT_NEXT, "floating")]
#[case("header", COMPONENT_PREV, "header")]
#[case("header", COMPONENT_ENTER, "header")]
fn navigation_moves_selection(#[case] from: &str, #[case] command: &str, #[case] to: &str) {
	let mut ed = editor();
	let start = id(&ed, from);
	ed.select(&[start]);

	ed.run_command(command, CommandOptions::new()).expect("navigate");
	assert_eq!(ed.selected_all(), vec![id(&ed, to)]);
}

#[test]
fn style_clear_empties_inline_styles() {
	let mut ed = editor();
	let header = id(&ed, "header");
	if let Some(node) = ed.component_mut(header) {
		node.style.insert("color".into(), "red".into());
	}
	ed.select(&[header]);

	assert_eq!(ed.run_command(COMPONENT_STYLE_CLEAR, CommandOptions::new()), Ok(Some(json!(1))));
	assert!(ed.component_tree().get(header).is_some_and(|node| node.style.is_empty()));
	assert_eq!(ed.changes_count(), 1);
}

#[test]
fn canvas_clear_removes_everything() {
	let mut ed = editor();
	let header = id(&ed, "header");
	ed.select(&[header]);
	let recorded = record(&ed);

	assert_eq!(ed.run_command(CANVAS_CLEAR, CommandOptions::new()), Ok(Some(json!(4))));
	assert!(ed.component_tree().is_empty());
	assert!(ed.selected_all().is_empty());
	assert_eq!(events_named(&recorded, "component:deselected"), vec![vec![json!(header)]]);
}

#[derive(Default, Clone)]
struct CountingHistory {
	undone: Arc<AtomicUsize>,
	redone: Arc<AtomicUsize>,
}

impl UndoAccess for CountingHistory {
	fn undo(&mut self) -> bool {
		self.undone.fetch_add(1, Ordering::SeqCst);
		true
	}

	fn redo(&mut self) -> bool {
		self.redone.fetch_add(1, Ordering::SeqCst);
		false
	}

	fn has_undo(&self) -> bool {
		true
	}

	fn has_redo(&self) -> bool {
		false
	}
}

#[test]
fn undo_and_redo_delegate_to_the_manager() {
	let history = CountingHistory::default();
	let mut ed = editor().with_undo_manager(history.clone());

	assert_eq!(ed.run_command(UNDO, CommandOptions::new()), Ok(Some(json!(true))));
	assert_eq!(ed.run_command(REDO, CommandOptions::new()), Ok(Some(json!(false))));
	assert_eq!(history.undone.load(Ordering::SeqCst), 1);
	assert_eq!(history.redone.load(Ordering::SeqCst), 1);
	assert!(!ed.is_active(UNDO));
}

#[test]
fn undo_without_manager_is_a_capability_error() {
	let mut ed = editor();
	assert_eq!(
		ed.run_command(UNDO, CommandOptions::new()),
		Err(CommandError::MissingCapability(Capability::Undo))
	);
}

#[test]
fn legacy_preview_reaches_canonical_listeners() {
	let mut ed = editor();
	let recorded = record(&ed);

	ed.run_command("preview", CommandOptions::new()).expect("legacy run");
	assert!(ed.is_active("preview"));
	assert!(ed.is_view_open(UiView::Preview));
	ed.stop_command("preview", CommandOptions::new()).expect("legacy stop");

	ed.run_command(PREVIEW, CommandOptions::new()).expect("canonical run");

	let runs = events_named(&recorded, "run:core:preview");
	assert_eq!(runs.len(), 2);
	assert_eq!(runs[0], runs[1]);
	assert_eq!(events_named(&recorded, "stop:core:preview").len(), 1);
	assert!(event_names(&recorded).contains(&"run:preview".to_string()));
}

#[test]
fn preview_hides_and_restores_default_command() {
	let mut ed = editor();
	assert!(ed.is_view_open(UiView::SelectMode));

	ed.run_command(PREVIEW, CommandOptions::new()).expect("preview");
	assert!(!ed.is_view_open(UiView::SelectMode));
	assert!(!ed.commands().default_running());

	ed.stop_command(PREVIEW, CommandOptions::new()).expect("stop preview");
	assert!(ed.is_view_open(UiView::SelectMode));
	assert!(ed.commands().default_running());
}

#[test]
fn extended_legacy_command_keeps_its_stop() {
	let mut ed = editor();
	let runs = Arc::new(AtomicUsize::new(0));
	let counter = runs.clone();
	ed.commands_mut().extend(
		"open-sm",
		CommandDef::new().with_run(move |_, _, _| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(json!("custom"))
		}),
	);

	assert_eq!(ed.run_command("open-sm", CommandOptions::new()), Ok(Some(json!("custom"))));
	assert_eq!(runs.load(Ordering::SeqCst), 1);
	assert!(!ed.is_view_open(UiView::StyleManager));
	assert!(ed.is_active("open-sm"));

	ed.set_view_open(UiView::StyleManager, true);
	ed.stop_command("open-sm", CommandOptions::new()).expect("stop");
	assert!(!ed.is_view_open(UiView::StyleManager));
	assert!(!ed.is_active("open-sm"));
}
