//! Fine-grained capability traits for command behaviors.
//!
//! # Required Traits
//!
//! Every [`CommandEditor`] implements these:
//!
//! - [`SelectionAccess`] - Read and change the selected components
//! - [`LogAccess`] - User-facing log entries
//!
//! # Optional Traits
//!
//! Exposed through `Option<&mut dyn _>` accessors on [`CommandEditor`]; a
//! built-in that needs one fails with [`CommandError::MissingCapability`]
//! when the editor does not provide it.
//!
//! - [`ComponentAccess`] - Component tree reads and mutations
//! - [`ClipboardAccess`] - Component clipboard
//! - [`ViewAccess`] - Toggleable editor views
//! - [`UndoAccess`] - Undo/redo history
//! - [`DeferredAccess`] - Next-tick continuations
//! - [`DragAccess`] - Drag sessions
//!
//! [`CommandEditor`]: super::CommandEditor
//! [`CommandError::MissingCapability`]: crate::CommandError::MissingCapability

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use vellum_events::{LogEntry, LogLevel};
use vellum_primitives::{ComponentId, ComponentStatus, DragData, DragMode, UiView};

use super::CommandEditor;

/// Selection access (required).
///
/// Selection order is significant: the last entry is the primary selection.
pub trait SelectionAccess {
	/// Returns every selected component, oldest first.
	fn selected_all(&self) -> Vec<ComponentId>;

	/// Returns the primary (last) selected component.
	fn selected(&self) -> Option<ComponentId> {
		self.selected_all().last().copied()
	}

	/// Replaces the selection.
	fn select(&mut self, ids: &[ComponentId]);

	/// Adds components to the selection.
	fn select_add(&mut self, ids: &[ComponentId]);

	/// Removes components from the selection.
	fn select_remove(&mut self, ids: &[ComponentId]);
}

/// User-facing logging (required).
pub trait LogAccess {
	fn log(&self, entry: LogEntry);

	fn log_warning(&self, message: &str) {
		self.log(LogEntry::new(LogLevel::Warning, message));
	}
}

/// Snapshot of a component's command-relevant flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInfo {
	pub id: ComponentId,
	pub name: String,
	pub draggable: bool,
	pub removable: bool,
	pub copyable: bool,
	/// Per-component drag mode override.
	pub drag_mode: Option<DragMode>,
	pub status: ComponentStatus,
}

/// Component tree access (optional).
pub trait ComponentAccess {
	fn component(&self, id: ComponentId) -> Option<ComponentInfo>;
	fn parent_of(&self, id: ComponentId) -> Option<ComponentId>;
	fn children_of(&self, id: ComponentId) -> Vec<ComponentId>;
	/// Returns the ordered sibling list `id` belongs to, including `id`.
	fn siblings_of(&self, id: ComponentId) -> Vec<ComponentId>;
	/// Removes a component and its subtree. Returns false if it did not exist.
	fn remove_component(&mut self, id: ComponentId) -> bool;
	/// Deep-clones `source` and inserts the clone right after `anchor`.
	fn clone_component_after(&mut self, source: ComponentId, anchor: ComponentId) -> Option<ComponentId>;
	/// Clears inline styles. Returns false if the component did not exist.
	fn clear_component_style(&mut self, id: ComponentId) -> bool;
	fn set_component_status(&mut self, id: ComponentId, status: ComponentStatus);
	/// Removes every component. Returns how many top-level components were removed.
	fn clear_components(&mut self) -> usize;
}

/// Component clipboard (optional).
pub trait ClipboardAccess {
	fn clipboard_contents(&self) -> Vec<ComponentId>;
	fn set_clipboard(&mut self, ids: Vec<ComponentId>);
}

/// Toggleable editor views (optional).
pub trait ViewAccess {
	fn is_view_open(&self, view: UiView) -> bool;
	fn set_view_open(&mut self, view: UiView, open: bool);
}

/// Undo/redo history (optional).
pub trait UndoAccess {
	/// Undoes the last change. Returns false when there was nothing to undo.
	fn undo(&mut self) -> bool;
	/// Redoes the last undone change. Returns false when there was nothing to redo.
	fn redo(&mut self) -> bool;
	fn has_undo(&self) -> bool;
	fn has_redo(&self) -> bool;
}

/// Continuation run on the next editor tick.
pub type DeferredTask = Box<dyn FnOnce(&mut dyn CommandEditor) + Send>;

/// Next-tick continuations (optional).
pub trait DeferredAccess {
	/// Queues `task` to run on the next tick, after the current call stack unwinds.
	fn defer(&mut self, task: DeferredTask);
}

/// Drag lifecycle callback.
pub type DragCallback = Arc<dyn Fn(&mut dyn CommandEditor, &DragData) + Send + Sync>;

/// Callbacks a drag orchestrator attaches to a session.
#[derive(Clone, Default)]
pub struct DragHandlers {
	pub on_start: Option<DragCallback>,
	pub on_drag: Option<DragCallback>,
	pub on_end: Option<DragCallback>,
}

impl DragHandlers {
	pub fn on_start<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &DragData) + Send + Sync + 'static,
	{
		self.on_start = Some(Arc::new(f));
		self
	}

	pub fn on_drag<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &DragData) + Send + Sync + 'static,
	{
		self.on_drag = Some(Arc::new(f));
		self
	}

	pub fn on_end<F>(mut self, f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &DragData) + Send + Sync + 'static,
	{
		self.on_end = Some(Arc::new(f));
		self
	}
}

impl fmt::Debug for DragHandlers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DragHandlers")
			.field("on_start", &self.on_start.is_some())
			.field("on_drag", &self.on_drag.is_some())
			.field("on_end", &self.on_end.is_some())
			.finish()
	}
}

/// An in-progress drag: what is moving, and who to tell.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
	pub data: DragData,
	pub handlers: DragHandlers,
}

/// Drag session storage (optional).
///
/// The editor only stores the session; starting, updating and finishing it
/// (and invoking the handlers) is done by the drag commands.
pub trait DragAccess {
	/// Editor-wide drag mode used when a component has no override.
	fn drag_mode(&self) -> DragMode;
	fn begin_drag(&mut self, session: DragSession);
	fn drag_session(&self) -> Option<&DragSession>;
	fn drag_session_mut(&mut self) -> Option<&mut DragSession>;
	fn take_drag_session(&mut self) -> Option<DragSession>;
}
