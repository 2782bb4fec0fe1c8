use std::sync::Arc;

use serde_json::{Value, json};
use tracing::trace;
use vellum_events::BeforeContext;

use crate::def::{RUN, STOP};
use crate::{Behavior, CommandDef, CommandEditor, CommandOptions, CommandResult};

/// Configuration shared by every command instance of one registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandConfig {
	/// Editor-wide CSS class prefix, e.g. `gjs-`.
	pub ppfx: String,
	/// Command CSS class prefix, `ppfx` followed by the registry's style prefix.
	pub pfx: String,
}

/// An instantiated command.
///
/// Instances are created once per id by [`Commands::get`] and shared as
/// `Arc<Command>`; per-instance state lives in closures captured by the
/// template factory.
///
/// [`Commands::get`]: crate::Commands::get
#[derive(Debug)]
pub struct Command {
	id: String,
	def: CommandDef,
	config: Arc<CommandConfig>,
}

impl Command {
	pub(crate) fn new(id: &str, def: CommandDef, config: Arc<CommandConfig>) -> Self {
		Self {
			id: id.to_string(),
			def,
			config,
		}
	}

	/// Registry key this instance was created for.
	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn config(&self) -> &CommandConfig {
		&self.config
	}

	/// The definition this instance was created from.
	pub fn definition(&self) -> &CommandDef {
		&self.def
	}

	pub fn has_run(&self) -> bool {
		self.def.has_run()
	}

	pub fn has_stop(&self) -> bool {
		self.def.has_stop()
	}

	pub fn no_stop(&self) -> bool {
		self.def.no_stop()
	}

	pub fn behavior(&self, name: &str) -> Option<&Behavior> {
		self.def.behavior(name)
	}

	/// Invokes a named behavior directly, without guards, events or activation.
	///
	/// Returns `None` when the command has no behavior called `name`.
	pub fn call(&self, name: &str, ed: &mut dyn CommandEditor, options: &mut CommandOptions) -> Option<CommandResult> {
		let behavior = self.def.behavior(name)?.clone();
		let sender = options.sender.clone().unwrap_or_default();
		Some(behavior(ed, &sender, options))
	}

	/// Run with lifecycle events. An abort requested before the run still
	/// executes the behavior but emits `abort:{id}` instead of run events.
	pub(crate) fn call_run(&self, ed: &mut dyn CommandEditor, options: &mut CommandOptions) -> CommandResult {
		let events = ed.events().clone();
		let mut ctx = BeforeContext::new();
		events.trigger_before(&format!("run:{}:before", self.id), &[options.to_value()], &mut ctx);
		if ctx.is_aborted() {
			options.abort = true;
		}

		if options.abort {
			trace!(id = %self.id, "run aborted");
			events.trigger(&format!("abort:{}", self.id), &[options.to_value()]);
			return self.call(RUN, ed, options).unwrap_or(Ok(Value::Null));
		}

		let result = self.call(RUN, ed, options).unwrap_or(Ok(Value::Null))?;
		let opts = options.to_value();
		events.trigger(&format!("run:{}", self.id), &[result.clone(), opts.clone()]);
		events.trigger("run", &[json!(self.id), result.clone(), opts]);
		Ok(result)
	}

	/// Stop with lifecycle events. A missing stop behavior yields `Null`.
	pub(crate) fn call_stop(&self, ed: &mut dyn CommandEditor, options: &mut CommandOptions) -> CommandResult {
		let events = ed.events().clone();
		let mut ctx = BeforeContext::new();
		events.trigger_before(&format!("stop:{}:before", self.id), &[options.to_value()], &mut ctx);

		let result = self.call(STOP, ed, options).unwrap_or(Ok(Value::Null))?;
		let opts = options.to_value();
		events.trigger(&format!("stop:{}", self.id), &[result.clone(), opts.clone()]);
		events.trigger("stop", &[json!(self.id), result.clone(), opts]);
		Ok(result)
	}
}
