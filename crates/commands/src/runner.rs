//! Run/stop state machine.
//!
//! Each id is either inactive or active; membership in
//! [`Commands::active`](crate::Commands::active) is the only state. In strict
//! mode a run of an active id and a stop of an inactive id are silently
//! suppressed unless forced.

use serde_json::Value;
use tracing::{trace, trace_span};

use crate::def::{RUN, STOP};
use crate::{CommandEditor, CommandError, CommandOptions};

/// Runs the command registered as `id`.
///
/// Returns `Ok(None)` when the id is unknown, the command has no run
/// behavior, or the strict guard suppressed the call. Behavior errors
/// propagate unchanged.
pub fn run(ed: &mut dyn CommandEditor, id: &str, mut options: CommandOptions) -> Result<Option<Value>, CommandError> {
	let Some(command) = ed.commands_mut().get(id) else {
		return Ok(None);
	};
	if !command.has_run() {
		trace!(id, "command has no run behavior");
		return Ok(None);
	}

	let commands = ed.commands();
	if !(options.force || !commands.config().strict || !commands.is_active(id)) {
		trace!(id, "run suppressed, command already active");
		return Ok(None);
	}

	let span = trace_span!("command.run", id, force = options.force);
	let _guard = span.enter();

	let result = command.call_run(ed, &mut options)?;
	if !id.is_empty() && command.has_stop() && !command.no_stop() && !options.abort {
		ed.commands_mut().activate(id, result.clone());
		trace!(id, "command activated");
	}
	Ok(Some(result))
}

/// Stops the command registered as `id`.
///
/// The id leaves the active set before the stop behavior runs, so the
/// behavior (and anything it triggers) already sees it inactive.
pub fn stop(ed: &mut dyn CommandEditor, id: &str, mut options: CommandOptions) -> Result<Option<Value>, CommandError> {
	let Some(command) = ed.commands_mut().get(id) else {
		return Ok(None);
	};
	if !command.has_run() {
		trace!(id, "command has no run behavior");
		return Ok(None);
	}

	let commands = ed.commands();
	if !(options.force || !commands.config().strict || commands.is_active(id)) {
		trace!(id, "stop suppressed, command not active");
		return Ok(None);
	}

	let span = trace_span!("command.stop", id, force = options.force);
	let _guard = span.enter();

	if !id.is_empty() {
		ed.commands_mut().deactivate(id);
	}
	let result = command.call_stop(ed, &mut options)?;
	Ok(Some(result))
}

/// Starts the default command by calling its behaviors directly.
///
/// The command is stopped first and then run; neither call goes through the
/// guards or touches the active set. No-op while it is already running.
pub fn run_default(ed: &mut dyn CommandEditor, mut options: CommandOptions) -> Result<(), CommandError> {
	if ed.commands().default_running() {
		return Ok(());
	}
	let id = ed.commands().config().default_command.clone();
	let Some(command) = ed.commands_mut().get(&id) else {
		return Ok(());
	};

	trace!(id, "running default command");
	command.call(STOP, ed, &mut options).transpose()?;
	command.call(RUN, ed, &mut options).transpose()?;
	ed.commands_mut().set_default_running(true);
	Ok(())
}

/// Stops the default command. No-op unless it is running.
pub fn stop_default(ed: &mut dyn CommandEditor, mut options: CommandOptions) -> Result<(), CommandError> {
	if !ed.commands().default_running() {
		return Ok(());
	}
	let id = ed.commands().config().default_command.clone();
	if let Some(command) = ed.commands_mut().get(&id) {
		trace!(id, "stopping default command");
		command.call(STOP, ed, &mut options).transpose()?;
	}
	ed.commands_mut().set_default_running(false);
	Ok(())
}
