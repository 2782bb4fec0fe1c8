use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::trace;
use vellum_primitives::UiView;

use super::COMPONENT_OUTLINE;
use crate::{CommandConfig, CommandDef, CommandOptions, SelectionAccess, run_default, stop_default};

const LEGACY_OUTLINE: &str = "sw-visibility";

/// A command that opens `view` on run and closes it on stop.
pub(super) fn toggle(view: UiView) -> CommandDef {
	CommandDef::new()
		.with_run(move |ed, _, _| {
			ed.require_views()?.set_view_open(view, true);
			Ok(Value::Null)
		})
		.with_stop(move |ed, _, _| {
			ed.require_views()?.set_view_open(view, false);
			Ok(Value::Null)
		})
}

/// Hover-select mode. Stopping it clears the selection unless the caller
/// passes `preserve_selected`.
pub(super) fn select_mode(_: &CommandConfig) -> CommandDef {
	CommandDef::new()
		.with_run(|ed, _, _| {
			ed.require_views()?.set_view_open(UiView::SelectMode, true);
			Ok(Value::Null)
		})
		.with_stop(|ed, _, options| {
			ed.require_views()?.set_view_open(UiView::SelectMode, false);
			if !options.get_flag("preserve_selected") {
				ed.select(&[]);
			}
			Ok(Value::Null)
		})
}

/// Preview hides outlines and the default command while open and restores
/// both on stop.
pub(super) fn preview(_: &CommandConfig) -> CommandDef {
	let restore_outline = Arc::new(AtomicBool::new(false));
	let remember = Arc::clone(&restore_outline);

	CommandDef::new()
		.with_run(move |ed, _, _| {
			let outline = [COMPONENT_OUTLINE, LEGACY_OUTLINE].into_iter().find(|id| ed.commands().is_active(id));
			remember.store(outline.is_some(), Ordering::Relaxed);
			if let Some(id) = outline {
				trace!(id, "hiding outlines for preview");
				ed.stop_command(id, CommandOptions::new())?;
			}
			stop_default(ed, CommandOptions::new())?;
			ed.require_views()?.set_view_open(UiView::Preview, true);
			Ok(Value::Null)
		})
		.with_stop(move |ed, _, _| {
			if restore_outline.swap(false, Ordering::Relaxed) {
				ed.run_command(COMPONENT_OUTLINE, CommandOptions::new())?;
			}
			run_default(ed, CommandOptions::new())?;
			ed.require_views()?.set_view_open(UiView::Preview, false);
			Ok(Value::Null)
		})
}
