use serde_json::Value;

/// Cancellation channel handed to pre-notification listeners.
///
/// The emitter creates one context per operation, passes it through every
/// `*:before` listener, and reads [`is_aborted`](Self::is_aborted) afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeforeContext {
	abort: bool,
}

impl BeforeContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Requests cancellation of the pending operation.
	pub fn abort(&mut self) {
		self.abort = true;
	}

	pub fn is_aborted(&self) -> bool {
		self.abort
	}
}

/// A single dispatched event as seen by a listener.
pub struct Event<'a> {
	name: &'a str,
	args: &'a [Value],
	before: Option<&'a mut BeforeContext>,
}

impl<'a> Event<'a> {
	pub(crate) fn new(name: &'a str, args: &'a [Value], before: Option<&'a mut BeforeContext>) -> Self {
		Self { name, args, before }
	}

	/// Event name, e.g. `run:core:preview`.
	pub fn name(&self) -> &str {
		self.name
	}

	/// Positional event arguments.
	pub fn args(&self) -> &[Value] {
		self.args
	}

	/// Returns the argument at `index`, if present.
	pub fn arg(&self, index: usize) -> Option<&Value> {
		self.args.get(index)
	}

	/// Returns true when this event is a cancellable pre-notification.
	pub fn is_cancellable(&self) -> bool {
		self.before.is_some()
	}

	/// Cancels the pending operation.
	///
	/// Returns false (and does nothing) when the event carries no
	/// [`BeforeContext`].
	pub fn abort(&mut self) -> bool {
		match self.before.as_deref_mut() {
			Some(ctx) => {
				ctx.abort();
				true
			}
			None => false,
		}
	}

	/// Returns true once any listener has cancelled the operation.
	pub fn is_aborted(&self) -> bool {
		self.before.as_deref().is_some_and(BeforeContext::is_aborted)
	}

	pub(crate) fn before_mut(&mut self) -> Option<&mut BeforeContext> {
		self.before.as_deref_mut()
	}
}
