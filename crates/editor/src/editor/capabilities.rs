//! Capability implementations that expose the editor to commands.

use tracing::trace;
use vellum_commands::{
	ClipboardAccess, CommandEditor, Commands, ComponentAccess, ComponentInfo, DeferredAccess, DeferredTask, DragAccess, DragSession, LogAccess,
	SelectionAccess, UndoAccess, ViewAccess,
};
use vellum_events::LogEntry;
use vellum_primitives::{ComponentId, ComponentStatus, DragMode, UiView};

use super::Editor;

impl SelectionAccess for Editor {
	fn selected_all(&self) -> Vec<ComponentId> {
		self.selection.clone()
	}

	fn select(&mut self, ids: &[ComponentId]) {
		self.apply_selection(ids.to_vec());
	}

	fn select_add(&mut self, ids: &[ComponentId]) {
		let mut next = self.selection.clone();
		next.extend_from_slice(ids);
		self.apply_selection(next);
	}

	fn select_remove(&mut self, ids: &[ComponentId]) {
		let next = self.selection.iter().filter(|id| !ids.contains(id)).copied().collect();
		self.apply_selection(next);
	}
}

impl LogAccess for Editor {
	fn log(&self, entry: LogEntry) {
		self.commands.logger().log(entry);
	}
}

impl ComponentAccess for Editor {
	fn component(&self, id: ComponentId) -> Option<ComponentInfo> {
		self.components.info(id)
	}

	fn parent_of(&self, id: ComponentId) -> Option<ComponentId> {
		self.components.parent(id)
	}

	fn children_of(&self, id: ComponentId) -> Vec<ComponentId> {
		self.components.children(id).to_vec()
	}

	fn siblings_of(&self, id: ComponentId) -> Vec<ComponentId> {
		self.components.siblings(id).to_vec()
	}

	fn remove_component(&mut self, id: ComponentId) -> bool {
		if self.components.remove(id).is_empty() {
			return false;
		}
		self.changes += 1;
		self.prune_selection();
		true
	}

	fn clone_component_after(&mut self, source: ComponentId, anchor: ComponentId) -> Option<ComponentId> {
		let clone = self.components.clone_after(source, anchor)?;
		self.changes += 1;
		Some(clone)
	}

	fn clear_component_style(&mut self, id: ComponentId) -> bool {
		let Some(node) = self.components.get_mut(id) else {
			return false;
		};
		node.style.clear();
		self.changes += 1;
		true
	}

	fn set_component_status(&mut self, id: ComponentId, status: ComponentStatus) {
		if let Some(node) = self.components.get_mut(id) {
			node.status = status;
		}
	}

	fn clear_components(&mut self) -> usize {
		let removed = self.components.clear();
		self.changes += 1;
		self.prune_selection();
		removed
	}
}

impl ClipboardAccess for Editor {
	fn clipboard_contents(&self) -> Vec<ComponentId> {
		self.clipboard.clone()
	}

	fn set_clipboard(&mut self, ids: Vec<ComponentId>) {
		self.clipboard = ids;
	}
}

impl ViewAccess for Editor {
	fn is_view_open(&self, view: UiView) -> bool {
		self.open_views.contains(&view)
	}

	fn set_view_open(&mut self, view: UiView, open: bool) {
		trace!(?view, open, "view toggled");
		if open {
			self.open_views.insert(view);
		} else {
			self.open_views.remove(&view);
		}
	}
}

impl UndoAccess for Editor {
	fn undo(&mut self) -> bool {
		self.undo_manager.as_mut().is_some_and(|manager| manager.undo())
	}

	fn redo(&mut self) -> bool {
		self.undo_manager.as_mut().is_some_and(|manager| manager.redo())
	}

	fn has_undo(&self) -> bool {
		self.undo_manager.as_ref().is_some_and(|manager| manager.has_undo())
	}

	fn has_redo(&self) -> bool {
		self.undo_manager.as_ref().is_some_and(|manager| manager.has_redo())
	}
}

impl DeferredAccess for Editor {
	fn defer(&mut self, task: DeferredTask) {
		self.deferred.enqueue(task);
	}
}

impl DragAccess for Editor {
	fn drag_mode(&self) -> DragMode {
		self.drag_mode
	}

	fn begin_drag(&mut self, session: DragSession) {
		self.drag = Some(session);
	}

	fn drag_session(&self) -> Option<&DragSession> {
		self.drag.as_ref()
	}

	fn drag_session_mut(&mut self) -> Option<&mut DragSession> {
		self.drag.as_mut()
	}

	fn take_drag_session(&mut self) -> Option<DragSession> {
		self.drag.take()
	}
}

impl CommandEditor for Editor {
	fn commands(&self) -> &Commands {
		&self.commands
	}

	fn commands_mut(&mut self) -> &mut Commands {
		&mut self.commands
	}

	fn components(&mut self) -> Option<&mut dyn ComponentAccess> {
		Some(self)
	}

	fn clipboard(&mut self) -> Option<&mut dyn ClipboardAccess> {
		Some(self)
	}

	fn views(&mut self) -> Option<&mut dyn ViewAccess> {
		Some(self)
	}

	fn history(&mut self) -> Option<&mut dyn UndoAccess> {
		if self.undo_manager.is_some() { Some(self) } else { None }
	}

	fn deferred(&mut self) -> Option<&mut dyn DeferredAccess> {
		Some(self)
	}

	fn drag(&mut self) -> Option<&mut dyn DragAccess> {
		Some(self)
	}
}
