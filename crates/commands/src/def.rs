use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::{CommandEditor, CommandError, CommandOptions, Sender};

/// Result of a single behavior invocation.
pub type CommandResult = Result<Value, CommandError>;

/// A named command behavior (`run`, `stop`, or an extension point).
pub type Behavior = Arc<dyn Fn(&mut dyn CommandEditor, &Sender, &mut CommandOptions) -> CommandResult + Send + Sync>;

/// Behavior name invoked on run.
pub const RUN: &str = "run";
/// Behavior name invoked on stop.
pub const STOP: &str = "stop";
/// Constructor hook stripped at registration.
pub const INITIALIZE: &str = "initialize";

/// A command definition in object form: a set of named behaviors.
///
/// ```ignore
/// let def = CommandDef::new()
///     .with_run(|ed, _sender, _opts| { /* ... */ Ok(Value::Null) })
///     .with_stop(|ed, _sender, _opts| Ok(Value::Null));
/// ```
#[derive(Clone, Default)]
pub struct CommandDef {
	behaviors: IndexMap<String, Behavior>,
	no_stop: bool,
}

impl CommandDef {
	pub fn new() -> Self {
		Self::default()
	}

	/// Function form: `f` becomes the run behavior and there is no stop.
	pub fn from_fn<F>(f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &Sender, &mut CommandOptions) -> CommandResult + Send + Sync + 'static,
	{
		Self::new().with_run(f)
	}

	pub fn with_run<F>(self, f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &Sender, &mut CommandOptions) -> CommandResult + Send + Sync + 'static,
	{
		self.with_behavior(RUN, f)
	}

	pub fn with_stop<F>(self, f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &Sender, &mut CommandOptions) -> CommandResult + Send + Sync + 'static,
	{
		self.with_behavior(STOP, f)
	}

	/// Adds or replaces a named behavior.
	pub fn with_behavior<F>(mut self, name: impl Into<String>, f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &Sender, &mut CommandOptions) -> CommandResult + Send + Sync + 'static,
	{
		self.behaviors.insert(name.into(), Arc::new(f));
		self
	}

	/// Marks the command as never-activating even if it has a stop behavior.
	pub fn with_no_stop(mut self) -> Self {
		self.no_stop = true;
		self
	}

	pub fn behavior(&self, name: &str) -> Option<&Behavior> {
		self.behaviors.get(name)
	}

	pub fn behavior_names(&self) -> impl Iterator<Item = &str> {
		self.behaviors.keys().map(String::as_str)
	}

	pub fn has_run(&self) -> bool {
		self.behaviors.contains_key(RUN)
	}

	pub fn has_stop(&self) -> bool {
		self.behaviors.contains_key(STOP)
	}

	/// True when the command can never enter the active set.
	pub fn no_stop(&self) -> bool {
		self.no_stop
	}

	/// Strips `initialize` and marks stop-less definitions `no_stop`.
	pub(crate) fn normalized(mut self) -> Self {
		self.behaviors.shift_remove(INITIALIZE);
		self.no_stop |= !self.has_stop();
		self
	}

	/// Overlays `partial` on this definition. Behaviors in `partial` win;
	/// `no_stop` stays set once either side sets it.
	pub(crate) fn overlay(mut self, partial: CommandDef) -> Self {
		self.behaviors.extend(partial.behaviors);
		self.no_stop |= partial.no_stop;
		self
	}
}

impl fmt::Debug for CommandDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandDef")
			.field("behaviors", &self.behaviors.keys().collect::<Vec<_>>())
			.field("no_stop", &self.no_stop)
			.finish()
	}
}

/// The two shapes a command can be registered in.
#[derive(Clone)]
pub enum CommandInput {
	/// A single callable run on `run`; no stop.
	Func(Behavior),
	/// Named behaviors.
	Definition(CommandDef),
}

impl CommandInput {
	pub fn func<F>(f: F) -> Self
	where
		F: Fn(&mut dyn CommandEditor, &Sender, &mut CommandOptions) -> CommandResult + Send + Sync + 'static,
	{
		Self::Func(Arc::new(f))
	}
}

impl From<CommandDef> for CommandInput {
	fn from(def: CommandDef) -> Self {
		Self::Definition(def)
	}
}

impl From<CommandInput> for CommandDef {
	fn from(input: CommandInput) -> Self {
		match input {
			CommandInput::Func(run) => {
				let mut def = CommandDef::new();
				def.behaviors.insert(RUN.to_string(), run);
				def
			}
			CommandInput::Definition(def) => def,
		}
	}
}
