use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use vellum_commands::builtins::{COMPONENT_DRAG, DRAG_END_EVENT, DRAG_EVENT, DRAG_START_EVENT, TLB_MOVE};
use vellum_commands::{SelectionAccess, ViewAccess};
use vellum_editor::{CommandError, CommandOptions, Editor};
use vellum_primitives::{ComponentId, ComponentStatus, DragMode, Point, UiView};

use crate::common::{editor, event_names, events_named, id, record};

fn status(ed: &Editor, id: ComponentId) -> Option<ComponentStatus> {
	ed.component_tree().get(id).map(|node| node.status)
}

#[test]
fn sorter_move_runs_through_drag_lifecycle() {
	let mut ed = editor();
	let header = id(&ed, "header");
	ed.select(&[header]);
	let recorded = record(&ed);

	let started = ed.run_command(TLB_MOVE, CommandOptions::new()).expect("move");
	assert_eq!(started, Some(json!({ "targets": [header], "mode": "default" })));
	assert!(ed.is_dragging());
	assert!(!ed.is_view_open(UiView::SelectMode));
	assert_eq!(ed.selected_all(), vec![header]);
	assert_eq!(status(&ed, header), Some(ComponentStatus::FreezedSelected));
	assert!(!ed.is_active(TLB_MOVE));

	let moved = ed.drag_move(Point { x: 4.0, y: 2.0 }).expect("session");
	assert_eq!(moved.position, Some(Point { x: 4.0, y: 2.0 }));

	let dropped = ed.drag_drop(false).expect("drop").expect("data");
	assert_eq!(dropped["cancelled"], json!(false));
	assert!(!ed.is_dragging());
	assert!(ed.is_view_open(UiView::SelectMode));
	assert_eq!(status(&ed, header), Some(ComponentStatus::Selected));

	let drag_events: Vec<_> = event_names(&recorded)
		.into_iter()
		.filter(|name| name.starts_with("component:drag"))
		.collect();
	assert_eq!(drag_events, vec![DRAG_START_EVENT, DRAG_EVENT, DRAG_END_EVENT]);
	assert_eq!(events_named(&recorded, DRAG_EVENT)[0][0]["position"], json!({ "x": 4.0, "y": 2.0 }));
}

#[test]
fn drop_reselects_targets_on_next_tick() {
	let mut ed = editor();
	let header = id(&ed, "header");
	ed.select(&[header]);
	ed.run_command(TLB_MOVE, CommandOptions::new()).expect("move");
	ed.select(&[]);

	ed.drag_drop(false).expect("drop");
	assert!(ed.selected_all().is_empty());
	assert_eq!(ed.pending_tasks(), 1);

	assert_eq!(ed.tick(), 1);
	assert_eq!(ed.selected_all(), vec![header]);
	assert_eq!(ed.tick(), 0);
}

#[test]
fn destroy_cancels_pending_reselection() {
	let mut ed = editor();
	let header = id(&ed, "header");
	ed.select(&[header]);
	ed.run_command(TLB_MOVE, CommandOptions::new()).expect("move");
	ed.select(&[]);
	ed.drag_drop(false).expect("drop");
	assert_eq!(ed.pending_tasks(), 1);

	ed.destroy();
	assert_eq!(ed.pending_tasks(), 0);
	assert_eq!(ed.tick(), 0);
	assert!(ed.selected_all().is_empty());
}

#[test]
fn absolute_component_uses_free_drag() {
	let mut ed = editor();
	let floating = id(&ed, "floating");
	ed.select(&[floating]);
	let recorded = record(&ed);

	let started = ed.run_command(TLB_MOVE, CommandOptions::new()).expect("move");
	assert_eq!(started, Some(json!({ "targets": [floating], "mode": "absolute" })));
	assert!(ed.is_active(COMPONENT_DRAG));
	assert_eq!(status(&ed, floating), Some(ComponentStatus::Disabled));

	let dropped = ed.drag_drop(true).expect("drop").expect("data");
	assert_eq!(dropped["cancelled"], json!(true));
	assert_eq!(dropped["mode"], json!("absolute"));
	assert!(!ed.is_active(COMPONENT_DRAG));
	assert!(!ed.is_dragging());

	let ends = events_named(&recorded, DRAG_END_EVENT);
	assert_eq!(ends.len(), 1);
	assert_eq!(ends[0][0]["cancelled"], json!(true));
	assert_eq!(events_named(&recorded, &format!("stop:{COMPONENT_DRAG}")).len(), 1);
}

#[test]
fn editor_drag_mode_applies_without_component_override() {
	let mut ed = editor();
	ed.set_drag_mode(DragMode::Translate);
	let header = id(&ed, "header");
	ed.select(&[header]);

	let started = ed.run_command(TLB_MOVE, CommandOptions::new()).expect("move");
	assert_eq!(started.and_then(|value| value.get("mode").cloned()), Some(json!("translate")));
	assert!(ed.is_active(COMPONENT_DRAG));
}

#[test]
fn explicit_target_overrides_selection() {
	let mut ed = editor();
	let header = id(&ed, "header");
	let body = id(&ed, "body");
	ed.select(&[header]);

	let started = ed
		.run_command(TLB_MOVE, CommandOptions::new().with("target", body.get()))
		.expect("move");
	assert_eq!(started, Some(json!({ "targets": [body], "mode": "default" })));
	assert_eq!(status(&ed, body), Some(ComponentStatus::FreezedSelected));
}

#[test]
fn native_drag_defers_hiding_the_toolbar() {
	let mut ed = editor();
	let header = id(&ed, "header");
	ed.select(&[header]);

	ed.run_command(TLB_MOVE, CommandOptions::new().with("native_drag", true))
		.expect("move");
	assert!(ed.is_dragging());
	assert!(ed.is_view_open(UiView::SelectMode));
	assert_eq!(ed.pending_tasks(), 1);

	assert_eq!(ed.tick(), 1);
	assert!(!ed.is_view_open(UiView::SelectMode));
	assert_eq!(ed.selected_all(), vec![header]);
}

#[test]
fn second_free_move_is_refused_while_dragging() {
	let mut ed = editor();
	ed.set_drag_mode(DragMode::Absolute);
	let header = id(&ed, "header");
	let body = id(&ed, "body");
	ed.select(&[header]);
	ed.run_command(TLB_MOVE, CommandOptions::new()).expect("first move");
	assert!(ed.is_active(COMPONENT_DRAG));

	ed.select(&[body]);
	let recorded = record(&ed);
	assert_eq!(ed.run_command(TLB_MOVE, CommandOptions::new()), Ok(Some(Value::Null)));
	assert_eq!(events_named(&recorded, "log:warning")[0][0], json!("A drag is already in progress"));
	assert_eq!(status(&ed, body), Some(ComponentStatus::Selected));
	assert!(ed.is_view_open(UiView::SelectMode));

	let dropped = ed.drag_drop(false).expect("drop").expect("data");
	assert_eq!(dropped["targets"], json!([header]));
	assert!(!ed.is_active(COMPONENT_DRAG));
}

#[test]
fn undraggable_component_is_reported() {
	let mut ed = editor();
	let footer = id(&ed, "footer");
	ed.select(&[footer]);
	let recorded = record(&ed);

	assert_eq!(ed.run_command(TLB_MOVE, CommandOptions::new()), Ok(Some(Value::Null)));
	assert!(!ed.is_dragging());
	assert!(ed.is_view_open(UiView::SelectMode));
	assert_eq!(events_named(&recorded, "log:warning")[0][0], json!("The element is not draggable"));
}

#[test]
fn drop_without_session_is_a_no_op() {
	let mut ed = editor();
	assert!(ed.drag_move(Point::default()).is_none());
	assert_eq!(ed.drag_drop(false), Ok(Some(Value::Null)));
}

#[test]
fn unknown_drag_mode_is_rejected() {
	let mut ed = editor();
	let header = id(&ed, "header");
	assert_eq!(
		ed.run_command(COMPONENT_DRAG, CommandOptions::new().with("target", header.get()).with("mode", "sideways")),
		Err(CommandError::InvalidArgument("unknown drag mode 'sideways'".into()))
	);
	assert!(!ed.is_dragging());
	assert!(!ed.is_active(COMPONENT_DRAG));
}
