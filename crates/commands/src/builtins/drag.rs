//! Drag sessions.
//!
//! A session is started either by `core:component-drag` (absolute and
//! translate modes) or by the `init-sorter` behavior of
//! `core:component-move` (sorter mode). The editor stores the session and
//! reports pointer moves and drops through [`update_drag`] and
//! [`drop_drag`]; the handlers attached by whoever started the session are
//! invoked from here.

use serde_json::{Value, json};
use tracing::debug;
use vellum_primitives::{DragData, DragMode, Point, UiView};

use super::{COMPONENT_DRAG, targets_from};
use crate::{CommandConfig, CommandDef, CommandEditor, CommandError, CommandOptions, CommandResult, DragHandlers, DragSession};

pub const DRAG_START_EVENT: &str = "component:drag:start";
pub const DRAG_EVENT: &str = "component:drag";
pub const DRAG_END_EVENT: &str = "component:drag:end";

/// Extra behavior of `core:component-move` that starts a sorter session.
pub const INIT_SORTER: &str = "init-sorter";

fn parse_mode(name: &str) -> Result<DragMode, CommandError> {
	serde_json::from_value(json!(name)).map_err(|_| CommandError::InvalidArgument(format!("unknown drag mode '{name}'")))
}

fn start_session(ed: &mut dyn CommandEditor, session: DragSession) -> CommandResult {
	let data = session.data.clone();
	let on_start = session.handlers.on_start.clone();
	ed.require_drag()?.begin_drag(session);
	debug!(targets = data.targets.len(), mode = data.mode.as_str(), "drag started");

	if let Some(on_start) = on_start {
		on_start(ed, &data);
	}
	Ok(serde_json::to_value(&data).unwrap_or_default())
}

/// Free-positioning drag. Options: `mode` (`absolute` or `translate`,
/// defaulting to the editor mode), `target`, and [`DragHandlers`] as payload.
/// Stopping the command ends the session; `cancelled` marks the drop.
pub(super) fn component_drag(_: &CommandConfig) -> CommandDef {
	CommandDef::new()
		.with_run(|ed, _, options| {
			let handlers = options.take_payload::<DragHandlers>().unwrap_or_default();
			let targets = targets_from(ed, options, "target");
			let mode = match options.get_str("mode") {
				Some(name) => parse_mode(name)?,
				None => ed.require_drag()?.drag_mode(),
			};
			let data = DragData {
				targets,
				mode,
				..DragData::default()
			};
			start_session(ed, DragSession { data, handlers })
		})
		.with_stop(|ed, _, options| finish_drag(ed, options.get_flag("cancelled")))
}

/// Move mode, plus the `init-sorter` extension point.
pub(super) fn component_move(_: &CommandConfig) -> CommandDef {
	CommandDef::new()
		.with_run(|ed, _, _| {
			ed.require_views()?.set_view_open(UiView::MoveMode, true);
			Ok(Value::Null)
		})
		.with_stop(|ed, _, _| {
			ed.require_views()?.set_view_open(UiView::MoveMode, false);
			Ok(Value::Null)
		})
		.with_behavior(INIT_SORTER, |ed, _, options| {
			let handlers = options.take_payload::<DragHandlers>().unwrap_or_default();
			let data = DragData {
				targets: targets_from(ed, options, "target"),
				mode: DragMode::Default,
				..DragData::default()
			};
			start_session(ed, DragSession { data, handlers })
		})
}

/// Records a pointer move on the current session and notifies its drag handler.
pub fn update_drag(ed: &mut dyn CommandEditor, position: Point) -> Option<DragData> {
	let session = ed.drag()?.drag_session_mut()?;
	session.data.position = Some(position);
	let data = session.data.clone();
	let on_drag = session.handlers.on_drag.clone();

	if let Some(on_drag) = on_drag {
		on_drag(ed, &data);
	}
	Some(data)
}

/// Ends the current session and notifies its end handler.
pub fn finish_drag(ed: &mut dyn CommandEditor, cancelled: bool) -> CommandResult {
	let Some(mut session) = ed.drag().and_then(|drag| drag.take_drag_session()) else {
		return Ok(Value::Null);
	};
	session.data.cancelled = cancelled;
	debug!(targets = session.data.targets.len(), cancelled, "drag ended");

	if let Some(on_end) = session.handlers.on_end.clone() {
		on_end(ed, &session.data);
	}
	Ok(serde_json::to_value(&session.data).unwrap_or_default())
}

/// Drops the current session. Free-mode sessions end by stopping
/// `core:component-drag`; sorter sessions end directly.
pub fn drop_drag(ed: &mut dyn CommandEditor, cancelled: bool) -> Result<Option<Value>, CommandError> {
	let free = ed
		.drag()
		.and_then(|drag| drag.drag_session().map(|session| session.data.mode.is_free()))
		.unwrap_or(false);
	if free && ed.commands().is_active(COMPONENT_DRAG) {
		return ed.stop_command(COMPONENT_DRAG, CommandOptions::new().with("cancelled", cancelled));
	}
	finish_drag(ed, cancelled).map(Some)
}
