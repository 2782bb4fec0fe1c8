use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A canvas device preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
	pub id: String,
	#[serde(default)]
	pub name: String,
	/// Canvas width, e.g. `768px`. `None` means full width.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<String>,
	/// Width used for generated media queries.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width_media: Option<String>,
}

impl Device {
	pub fn new(id: &str, name: &str, width: Option<&str>, width_media: Option<&str>) -> Self {
		Self {
			id: id.to_string(),
			name: name.to_string(),
			width: width.map(str::to_string),
			width_media: width_media.map(str::to_string),
		}
	}

	/// Presets used when the configuration lists none.
	pub fn defaults() -> Vec<Device> {
		vec![
			Self::new("desktop", "Desktop", None, None),
			Self::new("tablet", "Tablet", Some("770px"), Some("992px")),
			Self::new("mobileLandscape", "Mobile landscape", Some("568px"), Some("768px")),
			Self::new("mobilePortrait", "Mobile portrait", Some("320px"), Some("480px")),
		]
	}
}

/// Known devices and the selected one.
#[derive(Debug, Clone)]
pub struct Devices {
	devices: IndexMap<String, Device>,
	current: Option<String>,
}

impl Devices {
	/// Builds the device list; the first device starts selected unless
	/// `initial` names another known device.
	pub fn new(devices: Vec<Device>, initial: Option<&str>) -> Self {
		let devices: IndexMap<String, Device> = devices.into_iter().map(|device| (device.id.clone(), device)).collect();
		let current = initial
			.filter(|id| devices.contains_key(*id))
			.map(str::to_string)
			.or_else(|| devices.keys().next().cloned());
		Self { devices, current }
	}

	pub fn get(&self, id: &str) -> Option<&Device> {
		self.devices.get(id)
	}

	pub fn all(&self) -> impl Iterator<Item = &Device> {
		self.devices.values()
	}

	pub fn current(&self) -> Option<&Device> {
		self.current.as_deref().and_then(|id| self.devices.get(id))
	}

	/// Selects `id`. Returns false if it is unknown or already selected.
	pub fn select(&mut self, id: &str) -> bool {
		if !self.devices.contains_key(id) || self.current.as_deref() == Some(id) {
			return false;
		}
		self.current = Some(id.to_string());
		true
	}
}
