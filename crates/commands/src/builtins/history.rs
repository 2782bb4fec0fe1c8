use serde_json::Value;

use crate::{CommandEditor, CommandOptions, CommandResult, Sender};

pub(super) fn undo(ed: &mut dyn CommandEditor, _: &Sender, _: &mut CommandOptions) -> CommandResult {
	Ok(Value::Bool(ed.require_history()?.undo()))
}

pub(super) fn redo(ed: &mut dyn CommandEditor, _: &Sender, _: &mut CommandOptions) -> CommandResult {
	Ok(Value::Bool(ed.require_history()?.redo()))
}
