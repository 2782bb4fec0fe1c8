use serde_json::{Value, json};
use tracing::debug;
use vellum_primitives::ComponentId;

use super::targets_from;
use crate::{CommandConfig, CommandDef, CommandEditor, CommandResult, ComponentAccess, LogAccess, SelectionAccess};

type Pick = fn(&dyn ComponentAccess, ComponentId) -> Option<ComponentId>;

/// Moves each selected component to a related one, keeping it where there
/// is none, and selects the results.
fn navigate(ed: &mut dyn CommandEditor, pick: Pick) -> CommandResult {
	let selected = ed.selected_all();
	if selected.is_empty() {
		return Ok(Value::Null);
	}

	let components = ed.require_components()?;
	let mut targets: Vec<ComponentId> = Vec::with_capacity(selected.len());
	for id in selected {
		let target = pick(&*components, id).unwrap_or(id);
		if !targets.contains(&target) {
			targets.push(target);
		}
	}
	ed.select(&targets);
	Ok(json!(targets))
}

fn sibling_offset(components: &dyn ComponentAccess, id: ComponentId, forward: bool) -> Option<ComponentId> {
	let siblings = components.siblings_of(id);
	let index = siblings.iter().position(|sibling| *sibling == id)?;
	let index = if forward { index.checked_add(1)? } else { index.checked_sub(1)? };
	siblings.get(index).copied()
}

pub(super) fn select_next(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, _| navigate(ed, |components, id| sibling_offset(components, id, true)))
}

pub(super) fn select_prev(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, _| navigate(ed, |components, id| sibling_offset(components, id, false)))
}

pub(super) fn select_first_child(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, _| navigate(ed, |components, id| components.children_of(id).first().copied()))
}

pub(super) fn select_parent(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, _| navigate(ed, |components, id| components.parent_of(id)))
}

/// Removes the removable targets. Components that cannot be removed are
/// reported and stay selected.
pub(super) fn delete(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, options| {
		let targets = targets_from(ed, options, "component");
		let components = ed.require_components()?;
		let mut removed = Vec::new();
		let mut kept = Vec::new();
		for id in targets {
			match components.component(id) {
				Some(info) if !info.removable => kept.push(id),
				Some(_) => {
					if components.remove_component(id) {
						removed.push(id);
					}
				}
				None => {}
			}
		}

		for _ in &kept {
			ed.log_warning("The element is not removable");
		}
		debug!(removed = removed.len(), kept = kept.len(), "components deleted");
		ed.select(&kept);
		Ok(json!(removed))
	})
}

/// Clears the inline style of every selected component.
pub(super) fn style_clear(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, _| {
		let selected = ed.selected_all();
		let components = ed.require_components()?;
		let cleared = selected.into_iter().filter(|id| components.clear_component_style(*id)).count();
		Ok(json!(cleared))
	})
}

pub(super) fn canvas_clear(_: &CommandConfig) -> CommandDef {
	CommandDef::from_fn(|ed, _, _| {
		let removed = ed.require_components()?.clear_components();
		ed.select(&[]);
		debug!(removed, "canvas cleared");
		Ok(json!(removed))
	})
}
