//! Common utilities for editor integration tests.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use vellum_editor::{ComponentSpec, Editor, EditorConfig};
use vellum_primitives::{ComponentId, DragMode};

pub type Recorded = Arc<Mutex<Vec<(String, Vec<Value>)>>>;

/// Page used by most tests:
///
/// ```text
/// header
/// section
///   title
///   body
/// footer      (not removable, not draggable, not copyable)
/// floating    (absolute drag mode)
/// ```
pub fn page() -> Vec<ComponentSpec> {
	vec![
		ComponentSpec::named("header"),
		ComponentSpec::named("section").with_children([ComponentSpec::named("title"), ComponentSpec::named("body")]),
		ComponentSpec {
			removable: false,
			draggable: false,
			copyable: false,
			..ComponentSpec::named("footer")
		},
		ComponentSpec {
			drag_mode: Some(DragMode::Absolute),
			..ComponentSpec::named("floating")
		},
	]
}

pub fn editor() -> Editor {
	editor_with(EditorConfig::default())
}

pub fn editor_with(mut config: EditorConfig) -> Editor {
	let _ = tracing_subscriber::fmt::try_init();
	if config.components.is_empty() {
		config.components = page();
	}
	Editor::new(config)
}

pub fn id(editor: &Editor, name: &str) -> ComponentId {
	editor.find_component(name).unwrap_or_else(|| panic!("no component named {name}"))
}

pub fn names(editor: &Editor, ids: &[ComponentId]) -> Vec<String> {
	ids.iter()
		.filter_map(|id| editor.component_tree().get(*id))
		.map(|node| node.name.clone())
		.collect()
}

/// Records every event as `(name, args)`.
pub fn record(editor: &Editor) -> Recorded {
	let recorded: Recorded = Arc::default();
	let sink = recorded.clone();
	editor.bus().on_any(move |_, event| sink.lock().push((event.name().to_string(), event.args().to_vec())));
	recorded
}

pub fn event_names(recorded: &Recorded) -> Vec<String> {
	recorded.lock().iter().map(|(name, _)| name.clone()).collect()
}

pub fn events_named(recorded: &Recorded, name: &str) -> Vec<Vec<Value>> {
	recorded.lock().iter().filter(|(n, _)| n == name).map(|(_, args)| args.clone()).collect()
}
