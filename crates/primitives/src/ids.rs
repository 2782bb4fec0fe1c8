use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a component in the page tree.
///
/// Ids are allocated by the component store and never reused within one
/// editor, so a stale id simply resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u64);

impl ComponentId {
	/// Returns the raw numeric id.
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "c{}", self.0)
	}
}

impl From<u64> for ComponentId {
	fn from(value: u64) -> Self {
		Self(value)
	}
}
