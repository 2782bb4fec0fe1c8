use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who triggered a command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "kebab-case")]
pub enum Sender {
	/// The editor itself (default when no sender is given).
	#[default]
	Editor,
	/// A toolbar button or panel control.
	Ui(String),
	/// A keymap binding.
	Keymap(String),
	/// Another command, by id.
	Command(String),
}

/// Options passed through a run/stop invocation.
///
/// `force` and `abort` drive the runner's guards. Free-form keyed data lives
/// in `extra` and is what lifecycle events serialize. Typed data that has no
/// JSON form (callbacks, handles) travels in the payload slot and is taken
/// by the command that understands it.
#[derive(Default, Serialize)]
pub struct CommandOptions {
	/// Bypass the strict-mode guards.
	pub force: bool,
	/// Suppress activation; set by `*:before` listeners or the command itself.
	pub abort: bool,
	/// Invocation origin; the editor when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<Sender>,
	/// Free-form options.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
	#[serde(skip)]
	payload: Option<Box<dyn Any + Send>>,
}

impl CommandOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Options with `force` set.
	pub fn forced() -> Self {
		Self {
			force: true,
			..Self::default()
		}
	}

	pub fn with_force(mut self, force: bool) -> Self {
		self.force = force;
		self
	}

	pub fn with_sender(mut self, sender: Sender) -> Self {
		self.sender = Some(sender);
		self
	}

	/// Sets a free-form option.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Attaches typed data for the receiving command.
	pub fn with_payload<T: Any + Send>(mut self, payload: T) -> Self {
		self.payload = Some(Box::new(payload));
		self
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.extra.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.extra.get(key)
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.extra.get(key).and_then(Value::as_str)
	}

	/// Reads a flag, accepting `true` or a non-zero number.
	pub fn get_flag(&self, key: &str) -> bool {
		match self.extra.get(key) {
			Some(Value::Bool(b)) => *b,
			Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
			_ => false,
		}
	}

	/// Takes the payload if it has type `T`; a payload of another type is kept.
	pub fn take_payload<T: Any + Send>(&mut self) -> Option<T> {
		match self.payload.take()?.downcast::<T>() {
			Ok(payload) => Some(*payload),
			Err(other) => {
				self.payload = Some(other);
				None
			}
		}
	}

	pub fn has_payload(&self) -> bool {
		self.payload.is_some()
	}

	/// JSON view of the options as carried by lifecycle events.
	pub fn to_value(&self) -> Value {
		serde_json::to_value(self).unwrap_or_default()
	}
}

impl fmt::Debug for CommandOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandOptions")
			.field("force", &self.force)
			.field("abort", &self.abort)
			.field("sender", &self.sender)
			.field("extra", &self.extra)
			.field("payload", &self.payload.is_some())
			.finish()
	}
}
