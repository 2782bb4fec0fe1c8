//! Composite commands bound to the component toolbar.

use serde_json::{Value, json};
use tracing::{debug, warn};
use vellum_primitives::{ComponentId, ComponentStatus};

use super::drag::{DRAG_END_EVENT, DRAG_EVENT, DRAG_START_EVENT, INIT_SORTER};
use super::{COMPONENT_DELETE, COMPONENT_DRAG, COMPONENT_MOVE, COPY, PASTE, targets_from};
use crate::{
	CommandEditor, CommandError, CommandOptions, CommandResult, DragHandlers, LogAccess, SelectionAccess, Sender, run_default, stop_default,
};

fn nested(id: &str) -> CommandOptions {
	CommandOptions::new().with_sender(Sender::Command(id.to_string()))
}

/// Options for hiding and restoring the toolbar without losing the selection.
fn keep_selection() -> CommandOptions {
	CommandOptions::new().with("preserve_selected", true)
}

pub(super) fn delete(ed: &mut dyn CommandEditor, _: &Sender, _: &mut CommandOptions) -> CommandResult {
	Ok(ed.run_command(COMPONENT_DELETE, nested(super::TLB_DELETE))?.unwrap_or(Value::Null))
}

pub(super) fn clone(ed: &mut dyn CommandEditor, _: &Sender, _: &mut CommandOptions) -> CommandResult {
	ed.run_command(COPY, nested(super::TLB_CLONE))?;
	Ok(ed
		.run_command(PASTE, nested(super::TLB_CLONE).with("action", "clone-component"))?
		.unwrap_or(Value::Null))
}

/// Handlers that publish drag events and, on drop, restore the toolbar and
/// reselect the moved components on the next tick.
fn move_handlers(targets: Vec<ComponentId>) -> DragHandlers {
	DragHandlers::default()
		.on_start(|ed, data| {
			ed.events().trigger(DRAG_START_EVENT, &[json!(data)]);
		})
		.on_drag(|ed, data| {
			ed.events().trigger(DRAG_EVENT, &[json!(data)]);
		})
		.on_end(move |ed, data| {
			ed.events().trigger(DRAG_END_EVENT, &[json!(data)]);
			if let Err(err) = run_default(ed, keep_selection()) {
				warn!(%err, "failed to restore default command after drag");
			}
			if let Some(components) = ed.components() {
				for &id in &targets {
					components.set_component_status(id, ComponentStatus::Selected);
				}
			}

			let targets = targets.clone();
			ed.defer_or_run(Box::new(move |ed: &mut dyn CommandEditor| ed.select(&targets)));
		})
}

/// Starts moving the targets (the `target` option or the selection).
///
/// Free modes run `core:component-drag`; the default mode starts a sorter
/// session through `core:component-move`.
pub(super) fn move_components(ed: &mut dyn CommandEditor, _: &Sender, options: &mut CommandOptions) -> CommandResult {
	let targets = targets_from(ed, options, "target");
	let components = ed.require_components()?;
	let Some(last) = targets.last().and_then(|&id| components.component(id)).filter(|info| info.draggable) else {
		ed.log_warning("The element is not draggable");
		return Ok(Value::Null);
	};

	let mode = match last.drag_mode {
		Some(mode) => mode,
		None => ed.drag().map(|drag| drag.drag_mode()).unwrap_or_default(),
	};

	let components = ed.require_components()?;
	for &id in &targets {
		components.set_component_status(id, ComponentStatus::Disabled);
	}

	if options.get_flag("native_drag") {
		ed.defer_or_run(Box::new(|ed: &mut dyn CommandEditor| {
			if let Err(err) = stop_default(ed, keep_selection()) {
				warn!(%err, "failed to hide toolbar for drag");
			}
		}));
	} else {
		stop_default(ed, keep_selection())?;
	}

	debug!(targets = targets.len(), mode = mode.as_str(), "moving components");
	let drag_options = nested(super::TLB_MOVE).with("target", json!(targets)).with_payload(move_handlers(targets.clone()));
	if mode.is_free() {
		if ed.run_command(COMPONENT_DRAG, drag_options.with("mode", mode.as_str()))?.is_none() {
			ed.log_warning("A drag is already in progress");
			let components = ed.require_components()?;
			for &id in &targets {
				components.set_component_status(id, ComponentStatus::Selected);
			}
			run_default(ed, keep_selection())?;
			return Ok(Value::Null);
		}
	} else {
		let command = ed
			.commands_mut()
			.get(COMPONENT_MOVE)
			.ok_or_else(|| CommandError::NotFound(COMPONENT_MOVE.to_string()))?;
		let mut drag_options = drag_options;
		command.call(INIT_SORTER, ed, &mut drag_options).transpose()?;

		let components = ed.require_components()?;
		for &id in &targets {
			components.set_component_status(id, ComponentStatus::FreezedSelected);
		}
	}

	Ok(json!({ "targets": targets, "mode": mode }))
}
