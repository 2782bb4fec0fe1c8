use thiserror::Error;

/// Editor capability a command may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
	/// Component tree reads and mutations.
	Components,
	/// Component clipboard.
	Clipboard,
	/// Toggleable editor views.
	Views,
	/// Undo/redo history.
	Undo,
	/// Drag sessions.
	Drag,
}

/// Errors raised by command behaviors.
///
/// Unknown commands and guard suppression are not errors; the runner reports
/// those as "no result". This type covers failures inside a behavior, which
/// propagate unchanged to the original caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
	/// General command failure with message.
	#[error("{0}")]
	Failed(String),
	/// An option was provided but invalid.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// A command invoked by name was not found.
	#[error("command not found: {0}")]
	NotFound(String),
	/// The editor does not provide a capability the command needs.
	#[error("missing capability: {0:?}")]
	MissingCapability(Capability),
}
