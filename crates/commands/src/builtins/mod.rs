//! Built-in command catalog.
//!
//! Canonical ids live under `core:`. A subset also answers to a legacy alias:
//! the alias gets its own instance of the same factory, and its `run:` /
//! `stop:` events are re-emitted under the canonical id so listeners only
//! need to subscribe once.

mod clipboard;
mod components;
mod drag;
mod history;
mod toolbar;
mod views;

use std::sync::Arc;

pub use drag::{DRAG_END_EVENT, DRAG_EVENT, DRAG_START_EVENT, INIT_SORTER, drop_drag, finish_drag, update_drag};
use serde_json::Value;
use tracing::debug;
use vellum_events::EventBus;
use vellum_primitives::{ComponentId, UiView};

use crate::{CommandConfig, CommandDef, CommandEditor, CommandFactory, CommandInput, CommandOptions, Commands};

pub const PREVIEW: &str = "core:preview";
pub const FULLSCREEN: &str = "core:fullscreen";
pub const COPY: &str = "core:copy";
pub const PASTE: &str = "core:paste";
pub const CANVAS_CLEAR: &str = "core:canvas-clear";
pub const OPEN_CODE: &str = "core:open-code";
pub const OPEN_LAYERS: &str = "core:open-layers";
pub const OPEN_STYLES: &str = "core:open-styles";
pub const OPEN_TRAITS: &str = "core:open-traits";
pub const OPEN_BLOCKS: &str = "core:open-blocks";
pub const OPEN_ASSETS: &str = "core:open-assets";
pub const COMPONENT_SELECT: &str = "core:component-select";
pub const COMPONENT_OUTLINE: &str = "core:component-outline";
pub const COMPONENT_OFFSET: &str = "core:component-offset";
pub const COMPONENT_MOVE: &str = "core:component-move";
pub const COMPONENT_NEXT: &str = "core:component-next";
pub const COMPONENT_PREV: &str = "core:component-prev";
pub const COMPONENT_ENTER: &str = "core:component-enter";
pub const COMPONENT_EXIT: &str = "core:component-exit";
pub const COMPONENT_DELETE: &str = "core:component-delete";
pub const COMPONENT_STYLE_CLEAR: &str = "core:component-style-clear";
pub const COMPONENT_DRAG: &str = "core:component-drag";
pub const UNDO: &str = "core:undo";
pub const REDO: &str = "core:redo";
pub const TLB_DELETE: &str = "tlb-delete";
pub const TLB_CLONE: &str = "tlb-clone";
pub const TLB_MOVE: &str = "tlb-move";

struct Builtin {
	id: &'static str,
	legacy: Option<&'static str>,
	factory: CommandFactory,
}

fn builtin<F>(id: &'static str, legacy: Option<&'static str>, factory: F) -> Builtin
where
	F: Fn(&CommandConfig) -> CommandDef + Send + Sync + 'static,
{
	Builtin {
		id,
		legacy,
		factory: Arc::new(factory),
	}
}

fn catalog() -> Vec<Builtin> {
	vec![
		builtin(PREVIEW, Some("preview"), views::preview),
		builtin(FULLSCREEN, Some("fullscreen"), |_| views::toggle(UiView::Fullscreen)),
		builtin(COPY, None, clipboard::copy),
		builtin(PASTE, None, clipboard::paste),
		builtin(CANVAS_CLEAR, None, components::canvas_clear),
		builtin(OPEN_CODE, Some("export-template"), |_| views::toggle(UiView::CodeViewer)),
		builtin(OPEN_LAYERS, Some("open-layers"), |_| views::toggle(UiView::LayerManager)),
		builtin(OPEN_STYLES, Some("open-sm"), |_| views::toggle(UiView::StyleManager)),
		builtin(OPEN_TRAITS, Some("open-tm"), |_| views::toggle(UiView::TraitManager)),
		builtin(OPEN_BLOCKS, Some("open-blocks"), |_| views::toggle(UiView::Blocks)),
		builtin(OPEN_ASSETS, Some("open-assets"), |_| views::toggle(UiView::AssetManager)),
		builtin(COMPONENT_SELECT, Some("select-comp"), views::select_mode),
		builtin(COMPONENT_OUTLINE, Some("sw-visibility"), |_| views::toggle(UiView::Outlines)),
		builtin(COMPONENT_OFFSET, Some("show-offset"), |_| views::toggle(UiView::Offsets)),
		builtin(COMPONENT_MOVE, Some("move-comp"), drag::component_move),
		builtin(COMPONENT_NEXT, None, components::select_next),
		builtin(COMPONENT_PREV, None, components::select_prev),
		builtin(COMPONENT_ENTER, None, components::select_first_child),
		builtin(COMPONENT_EXIT, Some("select-parent"), components::select_parent),
		builtin(COMPONENT_DELETE, None, components::delete),
		builtin(COMPONENT_STYLE_CLEAR, None, components::style_clear),
		builtin(COMPONENT_DRAG, None, drag::component_drag),
	]
}

/// Registers the built-in catalog, legacy aliases and toolbar composites.
pub fn register_builtins(commands: &mut Commands) {
	let bus = commands.events().clone();
	let catalog = catalog();
	debug!(count = catalog.len(), "registering built-in commands");

	for Builtin { id, legacy, factory } in catalog {
		if let Some(legacy) = legacy {
			let legacy_factory = Arc::clone(&factory);
			commands.add_factory(legacy, move |config| legacy_factory(config));
			commands.register_alias(id, legacy);
			forward_legacy_events(&bus, legacy, id);
		}
		commands.add_factory(id, move |config| factory(config));
	}

	commands.add(UNDO, CommandInput::func(history::undo));
	commands.add(REDO, CommandInput::func(history::redo));
	commands.add(TLB_DELETE, CommandInput::func(toolbar::delete));
	commands.add(TLB_CLONE, CommandInput::func(toolbar::clone));
	commands.add(TLB_MOVE, CommandInput::func(toolbar::move_components));
}

/// Re-emits `run:{legacy}` / `stop:{legacy}` as the canonical events.
fn forward_legacy_events(bus: &EventBus, legacy: &str, canonical: &str) {
	for kind in ["run", "stop"] {
		let target = format!("{kind}:{canonical}");
		bus.on(format!("{kind}:{legacy}"), move |bus, event| bus.forward(event, &target));
	}
}

/// Components named by the `key` option (an id or an array of ids), or the
/// current selection when the option is absent.
pub(crate) fn targets_from(ed: &dyn CommandEditor, options: &CommandOptions, key: &str) -> Vec<ComponentId> {
	match options.get(key) {
		None | Some(Value::Null) => ed.selected_all(),
		Some(Value::Array(items)) => items.iter().filter_map(Value::as_u64).map(ComponentId).collect(),
		Some(value) => value.as_u64().map(ComponentId).into_iter().collect(),
	}
}
