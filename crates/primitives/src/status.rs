use serde::{Deserialize, Serialize};

/// Visual status of a component on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentStatus {
	/// Not selected.
	#[default]
	Idle,
	/// Part of the current selection.
	Selected,
	/// Selected and frozen while a sorter drag is in flight.
	FreezedSelected,
	/// Temporarily disabled (e.g. while being dragged).
	Disabled,
}

/// Toggleable editor views and modes driven by built-in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiView {
	Preview,
	Fullscreen,
	CodeViewer,
	LayerManager,
	StyleManager,
	TraitManager,
	Blocks,
	AssetManager,
	/// Hover-to-select mode.
	SelectMode,
	/// Dashed outlines around every component.
	Outlines,
	/// Margin/padding overlays.
	Offsets,
	/// Component move mode.
	MoveMode,
}

impl UiView {
	/// Every view, in declaration order.
	pub const ALL: [UiView; 12] = [
		Self::Preview,
		Self::Fullscreen,
		Self::CodeViewer,
		Self::LayerManager,
		Self::StyleManager,
		Self::TraitManager,
		Self::Blocks,
		Self::AssetManager,
		Self::SelectMode,
		Self::Outlines,
		Self::Offsets,
		Self::MoveMode,
	];
}
