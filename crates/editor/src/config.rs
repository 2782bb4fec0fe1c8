//! Editor configuration.
//!
//! ```toml
//! style_prefix = "gjs-"
//! drag_mode = "absolute"
//! device = "tablet"
//!
//! [commands]
//! strict = false
//! default_command = "core:component-select"
//!
//! [[components]]
//! name = "header"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vellum_commands::CommandsConfig;
use vellum_primitives::DragMode;

use crate::components::ComponentSpec;
use crate::devices::Device;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("failed to serialize config: {0}")]
	Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// CSS class prefix shared by every subsystem.
	pub style_prefix: String,
	/// Drag mode for components without their own.
	pub drag_mode: DragMode,
	/// Initially selected device id.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub device: Option<String>,
	/// Start the default command once the editor is built.
	pub run_default_command: bool,
	/// Device presets; the built-in presets when empty.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub devices: Vec<Device>,
	/// Initial page content.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub components: Vec<ComponentSpec>,
	pub commands: CommandsConfig,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			style_prefix: "gjs-".to_string(),
			drag_mode: DragMode::Default,
			device: None,
			run_default_command: true,
			devices: Vec::new(),
			components: Vec::new(),
			commands: CommandsConfig::default(),
		}
	}
}

impl EditorConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	pub fn to_toml_string(&self) -> Result<String, ConfigError> {
		Ok(toml::to_string(self)?)
	}
}
