use serde_json::{Value, json};
use tracing::debug;

use crate::{CommandConfig, CommandDef, SelectionAccess};

const PASTE_ACTION: &str = "paste-component";

/// Copies the copyable part of the selection. An empty result leaves the
/// clipboard untouched.
pub(super) fn copy(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, _| {
		let selected = ed.selected_all();
		let components = ed.require_components()?;
		let copied: Vec<_> = selected
			.into_iter()
			.filter(|id| components.component(*id).is_some_and(|info| info.copyable))
			.collect();
		if copied.is_empty() {
			return Ok(Value::Null);
		}

		ed.require_clipboard()?.set_clipboard(copied.clone());
		Ok(json!(copied))
	})
}

/// Inserts a clone of every clipboard entry after each selected component,
/// then selects the clones.
pub(super) fn paste(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, options| {
		let action = options.get_str("action").unwrap_or(PASTE_ACTION).to_string();
		let clip = ed.require_clipboard()?.clipboard_contents();
		let selected = ed.selected_all();
		if clip.is_empty() || selected.is_empty() {
			return Ok(Value::Null);
		}

		let components = ed.require_components()?;
		let mut added = Vec::new();
		for target in selected {
			let mut anchor = target;
			for &source in &clip {
				if components.component(source).is_none() {
					continue;
				}
				if let Some(clone) = components.clone_component_after(source, anchor) {
					anchor = clone;
					added.push(clone);
				}
			}
		}

		debug!(action = %action, added = added.len(), "components pasted");
		ed.select(&added);
		Ok(json!(added))
	})
}
