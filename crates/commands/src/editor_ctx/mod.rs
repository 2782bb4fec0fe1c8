//! The editor as seen by command behaviors.
//!
//! Behaviors receive `&mut dyn CommandEditor`. The trait gives access to the
//! registry, the bus and the required capabilities; optional capabilities
//! come back as `Option<&mut dyn _>` so a behavior can degrade, or use the
//! `require_*` helpers to fail with [`CommandError::MissingCapability`].
//!
//! ```ignore
//! // Optional access
//! if let Some(views) = ed.views() {
//!     views.set_view_open(UiView::Outlines, false);
//! }
//!
//! // Required access
//! let clipboard = ed.require_clipboard()?;
//! clipboard.set_clipboard(ids);
//! ```

mod capabilities;

pub use capabilities::*;
use serde_json::Value;
use vellum_events::EventBus;

use crate::{Capability, CommandError, CommandOptions, Commands};

/// Everything a command behavior can reach.
///
/// # Implementing
///
/// ```ignore
/// impl CommandEditor for MyEditor {
///     fn commands(&self) -> &Commands { &self.commands }
///     fn commands_mut(&mut self) -> &mut Commands { &mut self.commands }
///     fn views(&mut self) -> Option<&mut dyn ViewAccess> { Some(self) }
/// }
/// ```
pub trait CommandEditor: SelectionAccess + LogAccess {
	fn commands(&self) -> &Commands;

	fn commands_mut(&mut self) -> &mut Commands;

	/// The bus lifecycle events are published on.
	fn events(&self) -> &EventBus {
		self.commands().events()
	}

	/// Access to the component tree (optional).
	fn components(&mut self) -> Option<&mut dyn ComponentAccess> {
		None
	}

	/// Access to the component clipboard (optional).
	fn clipboard(&mut self) -> Option<&mut dyn ClipboardAccess> {
		None
	}

	/// Access to toggleable views (optional).
	fn views(&mut self) -> Option<&mut dyn ViewAccess> {
		None
	}

	/// Access to undo/redo history (optional).
	fn history(&mut self) -> Option<&mut dyn UndoAccess> {
		None
	}

	/// Access to next-tick continuations (optional).
	fn deferred(&mut self) -> Option<&mut dyn DeferredAccess> {
		None
	}

	/// Access to drag sessions (optional).
	fn drag(&mut self) -> Option<&mut dyn DragAccess> {
		None
	}
}

impl dyn CommandEditor + '_ {
	/// Runs a command by id. See [`crate::run`].
	pub fn run_command(&mut self, id: &str, options: CommandOptions) -> Result<Option<Value>, CommandError> {
		crate::runner::run(self, id, options)
	}

	/// Stops a command by id. See [`crate::stop`].
	pub fn stop_command(&mut self, id: &str, options: CommandOptions) -> Result<Option<Value>, CommandError> {
		crate::runner::stop(self, id, options)
	}

	pub fn require_components(&mut self) -> Result<&mut dyn ComponentAccess, CommandError> {
		self.components().ok_or(CommandError::MissingCapability(Capability::Components))
	}

	pub fn require_clipboard(&mut self) -> Result<&mut dyn ClipboardAccess, CommandError> {
		self.clipboard().ok_or(CommandError::MissingCapability(Capability::Clipboard))
	}

	pub fn require_views(&mut self) -> Result<&mut dyn ViewAccess, CommandError> {
		self.views().ok_or(CommandError::MissingCapability(Capability::Views))
	}

	pub fn require_history(&mut self) -> Result<&mut dyn UndoAccess, CommandError> {
		self.history().ok_or(CommandError::MissingCapability(Capability::Undo))
	}

	pub fn require_drag(&mut self) -> Result<&mut dyn DragAccess, CommandError> {
		self.drag().ok_or(CommandError::MissingCapability(Capability::Drag))
	}

	/// Runs `task` on the next tick, or immediately when the editor cannot defer.
	pub fn defer_or_run(&mut self, task: DeferredTask) {
		match self.deferred() {
			Some(deferred) => deferred.defer(task),
			None => task(self),
		}
	}
}
