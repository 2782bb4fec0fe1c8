use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::EventBus;

/// Severity of a user-facing log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Debug,
	Info,
	Warning,
	Error,
}

impl LogLevel {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Debug => "debug",
			Self::Info => "info",
			Self::Warning => "warning",
			Self::Error => "error",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A log entry as published on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
	pub level: LogLevel,
	pub message: String,
	/// Emitting subsystem, e.g. `commands`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ns: Option<String>,
}

impl LogEntry {
	pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
			ns: None,
		}
	}

	pub fn with_ns(mut self, ns: impl Into<String>) -> Self {
		self.ns = Some(ns.into());
		self
	}
}

/// Logging sink shared by the editor and its subsystems.
///
/// Each entry is written to `tracing` and published as `log` followed by
/// `log:{level}`, both carrying `[message, {level, ns}]`.
#[derive(Debug, Clone)]
pub struct Logger {
	bus: EventBus,
}

impl Logger {
	pub fn new(bus: EventBus) -> Self {
		Self { bus }
	}

	pub fn log(&self, entry: LogEntry) {
		let ns = entry.ns.as_deref().unwrap_or("editor");
		match entry.level {
			LogLevel::Debug => debug!(ns, "{}", entry.message),
			LogLevel::Info => info!(ns, "{}", entry.message),
			LogLevel::Warning => warn!(ns, "{}", entry.message),
			LogLevel::Error => error!(ns, "{}", entry.message),
		}

		let args = [json!(entry.message), json!({ "level": entry.level, "ns": entry.ns })];
		self.bus.trigger("log", &args);
		self.bus.trigger(&format!("log:{}", entry.level), &args);
	}

	pub fn warning(&self, message: impl Into<String>) {
		self.log(LogEntry::new(LogLevel::Warning, message));
	}

	pub fn info(&self, message: impl Into<String>) {
		self.log(LogEntry::new(LogLevel::Info, message));
	}

	pub fn error(&self, message: impl Into<String>) {
		self.log(LogEntry::new(LogLevel::Error, message));
	}

	/// Returns the bus entries are published on.
	pub fn bus(&self) -> &EventBus {
		&self.bus
	}
}
