//! Minimal [`CommandEditor`] host for unit tests.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use serde_json::Value;
use vellum_events::{EventBus, LogEntry, Logger};
use vellum_primitives::{ComponentId, UiView};

use crate::{CommandEditor, CommandError, CommandOptions, Commands, CommandsConfig, LogAccess, SelectionAccess, ViewAccess};

pub(crate) type Recorded = Arc<Mutex<Vec<(String, Vec<Value>)>>>;

pub(crate) struct TestEditor {
	pub commands: Commands,
	pub selection: Vec<ComponentId>,
	pub views: HashMap<UiView, bool>,
}

impl TestEditor {
	pub fn new() -> Self {
		Self::with_config(CommandsConfig::default())
	}

	/// Editor with an empty registry.
	pub fn bare() -> Self {
		Self::with_config(CommandsConfig {
			builtins: false,
			..CommandsConfig::default()
		})
	}

	pub fn with_config(config: CommandsConfig) -> Self {
		Self {
			commands: Commands::new(config, "gjs-", Logger::new(EventBus::new())),
			selection: Vec::new(),
			views: HashMap::default(),
		}
	}

	/// Records every event as `(name, args)`.
	pub fn record(&self) -> Recorded {
		let recorded: Recorded = Arc::default();
		let sink = recorded.clone();
		self.commands.events().on_any(move |_, event| sink.lock().push((event.name().to_string(), event.args().to_vec())));
		recorded
	}

	pub fn run(&mut self, id: &str, options: CommandOptions) -> Result<Option<Value>, CommandError> {
		crate::run(self, id, options)
	}

	pub fn stop(&mut self, id: &str, options: CommandOptions) -> Result<Option<Value>, CommandError> {
		crate::stop(self, id, options)
	}

	pub fn is_open(&self, view: UiView) -> bool {
		self.views.get(&view).copied().unwrap_or(false)
	}
}

/// Names of the recorded events, in order.
pub(crate) fn names(recorded: &Recorded) -> Vec<String> {
	recorded.lock().iter().map(|(name, _)| name.clone()).collect()
}

impl SelectionAccess for TestEditor {
	fn selected_all(&self) -> Vec<ComponentId> {
		self.selection.clone()
	}

	fn select(&mut self, ids: &[ComponentId]) {
		self.selection = ids.to_vec();
	}

	fn select_add(&mut self, ids: &[ComponentId]) {
		self.selection.extend(ids.iter().filter(|id| !self.selection.contains(id)).copied().collect::<Vec<_>>());
	}

	fn select_remove(&mut self, ids: &[ComponentId]) {
		self.selection.retain(|id| !ids.contains(id));
	}
}

impl LogAccess for TestEditor {
	fn log(&self, entry: LogEntry) {
		self.commands.logger().log(entry);
	}
}

impl ViewAccess for TestEditor {
	fn is_view_open(&self, view: UiView) -> bool {
		self.is_open(view)
	}

	fn set_view_open(&mut self, view: UiView, open: bool) {
		self.views.insert(view, open);
	}
}

impl CommandEditor for TestEditor {
	fn commands(&self) -> &Commands {
		&self.commands
	}

	fn commands_mut(&mut self) -> &mut Commands {
		&mut self.commands
	}

	fn views(&mut self) -> Option<&mut dyn ViewAccess> {
		Some(self)
	}
}
