//! The editor facade.
//!
//! [`Editor`] owns every subsystem (command registry, component tree,
//! selection, views, devices, clipboard, drag session, deferred work) and
//! delegates to them. Commands reach it as `&mut dyn CommandEditor`; the
//! capability implementations live in [`capabilities`].

mod capabilities;

use rustc_hash::FxHashSet as HashSet;
use serde_json::{Value, json};
use tracing::{debug, trace, warn};
use vellum_commands::builtins::{drop_drag, update_drag};
use vellum_commands::{CommandEditor, CommandError, CommandOptions, Commands, DragSession, UndoAccess};
use vellum_events::{Event, EventBus, ListenerId, LogEntry, LogLevel};
use vellum_primitives::{ComponentId, ComponentStatus, DragData, DragMode, Point, UiView};

use crate::components::{Component, ComponentSpec, ComponentTree};
use crate::config::EditorConfig;
use crate::deferred::DeferredQueue;
use crate::devices::{Device, Devices};

/// Visual page editor.
///
/// ```ignore
/// let mut editor = Editor::new(EditorConfig::from_toml_str(source)?);
/// editor.on("run:core:preview", |_, event| println!("{:?}", event.args()));
/// editor.run_command("preview", CommandOptions::new())?;
/// ```
pub struct Editor {
	config: EditorConfig,
	bus: EventBus,
	commands: Commands,
	components: ComponentTree,
	selection: Vec<ComponentId>,
	open_views: HashSet<UiView>,
	devices: Devices,
	clipboard: Vec<ComponentId>,
	drag_mode: DragMode,
	drag: Option<DragSession>,
	deferred: DeferredQueue,
	undo_manager: Option<Box<dyn UndoAccess + Send>>,
	changes: u64,
}

impl Editor {
	pub fn new(mut config: EditorConfig) -> Self {
		let bus = EventBus::new();
		let logger = vellum_events::Logger::new(bus.clone());
		let commands = Commands::new(config.commands.clone(), &config.style_prefix, logger);
		let components = ComponentTree::from_specs(&std::mem::take(&mut config.components));
		let presets = if config.devices.is_empty() {
			Device::defaults()
		} else {
			config.devices.clone()
		};
		let devices = Devices::new(presets, config.device.as_deref());

		let mut editor = Self {
			drag_mode: config.drag_mode,
			config,
			bus,
			commands,
			components,
			selection: Vec::new(),
			open_views: HashSet::default(),
			devices,
			clipboard: Vec::new(),
			drag: None,
			deferred: DeferredQueue::new(),
			undo_manager: None,
			changes: 0,
		};
		debug!(
			commands = editor.commands.get_all().len(),
			components = editor.components.len(),
			"editor created"
		);

		if editor.config.run_default_command
			&& let Err(err) = editor.run_default(CommandOptions::new())
		{
			warn!(%err, "failed to start default command");
		}
		editor
	}

	/// Installs the undo manager `core:undo` / `core:redo` delegate to.
	pub fn with_undo_manager(mut self, manager: impl UndoAccess + Send + 'static) -> Self {
		self.undo_manager = Some(Box::new(manager));
		self
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn bus(&self) -> &EventBus {
		&self.bus
	}

	pub fn on<F>(&self, name: &str, handler: F) -> ListenerId
	where
		F: Fn(&EventBus, &mut Event<'_>) + Send + Sync + 'static,
	{
		self.bus.on(name, handler)
	}

	pub fn once<F>(&self, name: &str, handler: F) -> ListenerId
	where
		F: Fn(&EventBus, &mut Event<'_>) + Send + Sync + 'static,
	{
		self.bus.once(name, handler)
	}

	pub fn off(&self, id: ListenerId) -> bool {
		self.bus.off(id)
	}

	pub fn trigger(&self, name: &str, args: &[Value]) {
		self.bus.trigger(name, args);
	}

	pub fn run_command(&mut self, id: &str, options: CommandOptions) -> Result<Option<Value>, CommandError> {
		vellum_commands::run(self, id, options)
	}

	pub fn stop_command(&mut self, id: &str, options: CommandOptions) -> Result<Option<Value>, CommandError> {
		vellum_commands::stop(self, id, options)
	}

	pub fn run_default(&mut self, options: CommandOptions) -> Result<(), CommandError> {
		vellum_commands::run_default(self, options)
	}

	pub fn stop_default(&mut self, options: CommandOptions) -> Result<(), CommandError> {
		vellum_commands::stop_default(self, options)
	}

	pub fn is_active(&self, id: &str) -> bool {
		self.commands.is_active(id)
	}

	pub fn component_tree(&self) -> &ComponentTree {
		&self.components
	}

	pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
		self.components.get_mut(id)
	}

	/// Adds a component under `parent` (top level when `None`).
	pub fn add_component(&mut self, spec: &ComponentSpec, parent: Option<ComponentId>) -> Option<ComponentId> {
		let id = self.components.append(spec, parent)?;
		self.changes += 1;
		Some(id)
	}

	pub fn find_component(&self, name: &str) -> Option<ComponentId> {
		self.components.find(name)
	}

	/// Toggles each component in or out of the selection.
	pub fn select_toggle(&mut self, ids: &[ComponentId]) {
		let mut next = self.selection.clone();
		for id in ids {
			match next.iter().position(|selected| selected == id) {
				Some(index) => {
					next.remove(index);
				}
				None => next.push(*id),
			}
		}
		self.apply_selection(next);
	}

	/// Replaces the selection, keeping only known components, and publishes
	/// `component:deselected` / `component:selected` for the difference.
	fn apply_selection(&mut self, ids: Vec<ComponentId>) {
		let mut next: Vec<ComponentId> = Vec::with_capacity(ids.len());
		for id in ids {
			if self.components.contains(id) && !next.contains(&id) {
				next.push(id);
			}
		}

		let removed: Vec<_> = self.selection.iter().filter(|id| !next.contains(id)).copied().collect();
		let added: Vec<_> = next.iter().filter(|id| !self.selection.contains(id)).copied().collect();
		self.selection = next;

		for id in removed {
			if let Some(node) = self.components.get_mut(id) {
				node.status = ComponentStatus::Idle;
			}
			self.bus.trigger("component:deselected", &[json!(id)]);
		}
		for id in added {
			if let Some(node) = self.components.get_mut(id) {
				node.status = ComponentStatus::Selected;
			}
			self.bus.trigger("component:selected", &[json!(id)]);
		}
	}

	/// Drops selected ids whose component no longer exists.
	fn prune_selection(&mut self) {
		let next = self.selection.clone();
		self.apply_selection(next);
	}

	pub fn devices(&self) -> impl Iterator<Item = &Device> {
		self.devices.all()
	}

	pub fn device(&self) -> Option<&Device> {
		self.devices.current()
	}

	/// Selects a device preset and publishes `device:change`. Returns false
	/// for unknown or already selected ids.
	pub fn set_device(&mut self, id: &str) -> bool {
		if !self.devices.select(id) {
			return false;
		}
		debug!(device = id, "device changed");
		self.bus.trigger("device:change", &[json!(id)]);
		true
	}

	pub fn set_drag_mode(&mut self, mode: DragMode) {
		self.drag_mode = mode;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.is_some()
	}

	/// Reports a pointer move to the current drag session.
	pub fn drag_move(&mut self, position: Point) -> Option<DragData> {
		update_drag(self, position)
	}

	/// Ends the current drag session.
	pub fn drag_drop(&mut self, cancelled: bool) -> Result<Option<Value>, CommandError> {
		drop_drag(self, cancelled)
	}

	pub fn pending_tasks(&self) -> usize {
		self.deferred.len()
	}

	/// Runs the continuations queued before this call. Continuations queued
	/// while draining wait for the next tick. Returns how many ran.
	pub fn tick(&mut self) -> usize {
		let pending = self.deferred.len();
		let mut ran = 0;
		for _ in 0..pending {
			let Some(item) = self.deferred.pop_front() else {
				break;
			};
			if item.token.is_cancelled() {
				trace!(seq = item.seq, "skipping cancelled deferred task");
				continue;
			}
			trace!(seq = item.seq, "running deferred task");
			(item.task)(self as &mut dyn CommandEditor);
			ran += 1;
		}
		ran
	}

	/// Number of document changes since the last [`clear_changes`](Self::clear_changes).
	pub fn changes_count(&self) -> u64 {
		self.changes
	}

	pub fn clear_changes(&mut self) {
		self.changes = 0;
	}

	pub fn log_info(&self, message: &str) {
		self.commands.logger().log(LogEntry::new(LogLevel::Info, message));
	}

	pub fn log_error(&self, message: &str) {
		self.commands.logger().log(LogEntry::new(LogLevel::Error, message));
	}

	/// Tears the editor down: publishes `destroy`, cancels deferred work and
	/// clears every subsystem and listener.
	pub fn destroy(&mut self) {
		self.bus.trigger("destroy", &[]);
		let dropped = self.deferred.cancel();
		self.drag = None;
		self.commands.destroy();
		self.selection.clear();
		self.clipboard.clear();
		self.open_views.clear();
		self.components.clear();
		self.bus.clear();
		debug!(dropped, "editor destroyed");
	}
}

impl std::fmt::Debug for Editor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Editor")
			.field("commands", &self.commands)
			.field("components", &self.components.len())
			.field("selection", &self.selection)
			.field("open_views", &self.open_views)
			.field("dragging", &self.drag.is_some())
			.field("pending_tasks", &self.deferred.len())
			.finish()
	}
}
