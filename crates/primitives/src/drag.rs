use serde::{Deserialize, Serialize};

use crate::ComponentId;

/// How a component is dragged around the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragMode {
	/// Sorter-based reordering inside the document flow.
	#[default]
	Default,
	/// Free positioning with absolute coordinates.
	Absolute,
	/// Free positioning through CSS translation.
	Translate,
}

impl DragMode {
	/// Returns true for the free-positioning modes that bypass the sorter.
	pub const fn is_free(self) -> bool {
		matches!(self, Self::Absolute | Self::Translate)
	}

	/// Returns the configuration name of the mode.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Default => "default",
			Self::Absolute => "absolute",
			Self::Translate => "translate",
		}
	}
}

/// Pointer position reported by the drag engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// Payload carried by drag lifecycle events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DragData {
	/// Components being dragged.
	pub targets: Vec<ComponentId>,
	/// Active drag mode.
	pub mode: DragMode,
	/// Last pointer position, if the engine reported one.
	pub position: Option<Point>,
	/// Set on the end event when the drop was cancelled.
	pub cancelled: bool,
}
