//! In-memory component tree.
//!
//! Components are plain nodes keyed by [`ComponentId`] with the flags the
//! commands care about. Top-level components have no parent and are ordered
//! in [`ComponentTree::roots`].

use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;
use vellum_commands::ComponentInfo;
use vellum_primitives::{ComponentId, ComponentStatus, DragMode};

/// Declarative component description, as found in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSpec {
	pub name: String,
	pub draggable: bool,
	pub removable: bool,
	pub copyable: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub drag_mode: Option<DragMode>,
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	pub style: IndexMap<String, String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub components: Vec<ComponentSpec>,
}

impl Default for ComponentSpec {
	fn default() -> Self {
		Self {
			name: String::new(),
			draggable: true,
			removable: true,
			copyable: true,
			drag_mode: None,
			style: IndexMap::new(),
			components: Vec::new(),
		}
	}
}

impl ComponentSpec {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_children(mut self, children: impl IntoIterator<Item = ComponentSpec>) -> Self {
		self.components.extend(children);
		self
	}
}

/// A component node.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
	pub name: String,
	pub parent: Option<ComponentId>,
	pub children: Vec<ComponentId>,
	pub draggable: bool,
	pub removable: bool,
	pub copyable: bool,
	pub drag_mode: Option<DragMode>,
	pub status: ComponentStatus,
	pub style: IndexMap<String, String>,
}

impl Component {
	fn from_spec(spec: &ComponentSpec, parent: Option<ComponentId>) -> Self {
		Self {
			name: spec.name.clone(),
			parent,
			children: Vec::new(),
			draggable: spec.draggable,
			removable: spec.removable,
			copyable: spec.copyable,
			drag_mode: spec.drag_mode,
			status: ComponentStatus::Idle,
			style: spec.style.clone(),
		}
	}
}

#[derive(Debug, Default)]
pub struct ComponentTree {
	next_id: u64,
	nodes: HashMap<ComponentId, Component>,
	roots: Vec<ComponentId>,
}

impl ComponentTree {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_specs(specs: &[ComponentSpec]) -> Self {
		let mut tree = Self::new();
		for spec in specs {
			tree.append(spec, None);
		}
		tree
	}

	fn alloc_id(&mut self) -> ComponentId {
		self.next_id += 1;
		ComponentId(self.next_id)
	}

	/// Appends `spec` (and its children) under `parent`, or at the top level.
	///
	/// Returns `None` if `parent` does not exist.
	pub fn append(&mut self, spec: &ComponentSpec, parent: Option<ComponentId>) -> Option<ComponentId> {
		let id = self.build(spec, parent)?;
		self.siblings_mut(parent)?.push(id);
		Some(id)
	}

	/// Creates the nodes for `spec` without linking the root into a sibling list.
	fn build(&mut self, spec: &ComponentSpec, parent: Option<ComponentId>) -> Option<ComponentId> {
		if parent.is_some_and(|parent| !self.nodes.contains_key(&parent)) {
			return None;
		}
		let id = self.alloc_id();
		self.nodes.insert(id, Component::from_spec(spec, parent));
		for child in &spec.components {
			if let Some(child_id) = self.build(child, Some(id))
				&& let Some(node) = self.nodes.get_mut(&id)
			{
				node.children.push(child_id);
			}
		}
		Some(id)
	}

	fn siblings_mut(&mut self, parent: Option<ComponentId>) -> Option<&mut Vec<ComponentId>> {
		match parent {
			Some(parent) => self.nodes.get_mut(&parent).map(|node| &mut node.children),
			None => Some(&mut self.roots),
		}
	}

	pub fn get(&self, id: ComponentId) -> Option<&Component> {
		self.nodes.get(&id)
	}

	pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
		self.nodes.get_mut(&id)
	}

	pub fn contains(&self, id: ComponentId) -> bool {
		self.nodes.contains_key(&id)
	}

	pub fn info(&self, id: ComponentId) -> Option<ComponentInfo> {
		self.nodes.get(&id).map(|node| ComponentInfo {
			id,
			name: node.name.clone(),
			draggable: node.draggable,
			removable: node.removable,
			copyable: node.copyable,
			drag_mode: node.drag_mode,
			status: node.status,
		})
	}

	pub fn roots(&self) -> &[ComponentId] {
		&self.roots
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// First component with `name`, in document order.
	pub fn find(&self, name: &str) -> Option<ComponentId> {
		self.iter_depth_first().find(|id| self.nodes.get(id).is_some_and(|node| node.name == name))
	}

	/// Every component id in document order.
	pub fn iter_depth_first(&self) -> impl Iterator<Item = ComponentId> + '_ {
		let mut stack: Vec<ComponentId> = self.roots.iter().rev().copied().collect();
		std::iter::from_fn(move || {
			let id = stack.pop()?;
			if let Some(node) = self.nodes.get(&id) {
				stack.extend(node.children.iter().rev().copied());
			}
			Some(id)
		})
	}

	pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
		self.nodes.get(&id)?.parent
	}

	pub fn children(&self, id: ComponentId) -> &[ComponentId] {
		self.nodes.get(&id).map(|node| node.children.as_slice()).unwrap_or_default()
	}

	/// The sibling list `id` belongs to, including `id`. Empty for unknown ids.
	pub fn siblings(&self, id: ComponentId) -> &[ComponentId] {
		match self.nodes.get(&id) {
			Some(node) => match node.parent {
				Some(parent) => self.children(parent),
				None => self.roots.as_slice(),
			},
			None => &[],
		}
	}

	/// Removes `id` and its subtree. Returns the removed ids, `id` first.
	pub fn remove(&mut self, id: ComponentId) -> Vec<ComponentId> {
		let Some(node) = self.nodes.get(&id) else {
			return Vec::new();
		};
		let parent = node.parent;
		if let Some(siblings) = self.siblings_mut(parent) {
			siblings.retain(|sibling| *sibling != id);
		}

		let mut removed = Vec::new();
		let mut stack = vec![id];
		while let Some(next) = stack.pop() {
			if let Some(node) = self.nodes.remove(&next) {
				stack.extend(node.children);
				removed.push(next);
			}
		}
		trace!(%id, removed = removed.len(), "component removed");
		removed
	}

	/// Deep-clones `source` and inserts the clone right after `anchor` in
	/// the anchor's sibling list.
	pub fn clone_after(&mut self, source: ComponentId, anchor: ComponentId) -> Option<ComponentId> {
		let spec = self.to_spec(source)?;
		let parent = self.nodes.get(&anchor)?.parent;
		let index = self.siblings(anchor).iter().position(|sibling| *sibling == anchor)?;

		let id = self.build(&spec, parent)?;
		self.siblings_mut(parent)?.insert(index + 1, id);
		trace!(%source, %anchor, clone = %id, "component cloned");
		Some(id)
	}

	/// Rebuilds the declarative form of `id` and its subtree.
	pub fn to_spec(&self, id: ComponentId) -> Option<ComponentSpec> {
		let node = self.nodes.get(&id)?;
		Some(ComponentSpec {
			name: node.name.clone(),
			draggable: node.draggable,
			removable: node.removable,
			copyable: node.copyable,
			drag_mode: node.drag_mode,
			style: node.style.clone(),
			components: node.children.iter().filter_map(|child| self.to_spec(*child)).collect(),
		})
	}

	pub fn clear(&mut self) -> usize {
		let roots = self.roots.len();
		self.nodes.clear();
		self.roots.clear();
		roots
	}
}
