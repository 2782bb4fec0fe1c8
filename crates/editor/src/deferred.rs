//! Next-tick continuation queue.
//!
//! Commands defer work that must run after the current call stack unwinds
//! (reselecting components after a drop, hiding the toolbar after a native
//! drag starts). The editor drains the queue on [`Editor::tick`]. Every item
//! carries a child of the queue's liveness token; once the queue is
//! cancelled (on editor destroy) pending and future items are dropped
//! without running.
//!
//! [`Editor::tick`]: crate::Editor::tick

use std::collections::VecDeque;
use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::trace;
use vellum_commands::DeferredTask;

/// Queue entry carrying sequence and liveness metadata.
pub struct DeferredItem {
	pub task: DeferredTask,
	pub token: CancellationToken,
	pub seq: u64,
}

impl fmt::Debug for DeferredItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeferredItem")
			.field("seq", &self.seq)
			.field("cancelled", &self.token.is_cancelled())
			.finish()
	}
}

/// FIFO queue for deferred continuations.
#[derive(Debug, Default)]
pub struct DeferredQueue {
	seq_next: u64,
	queue: VecDeque<DeferredItem>,
	token: CancellationToken,
}

impl DeferredQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Enqueues `task` and returns its sequence number, or `None` once the
	/// queue has been cancelled.
	pub fn enqueue(&mut self, task: DeferredTask) -> Option<u64> {
		if self.token.is_cancelled() {
			trace!("dropping deferred task, queue cancelled");
			return None;
		}
		let seq = self.seq_next;
		self.seq_next = self.seq_next.wrapping_add(1);
		self.queue.push_back(DeferredItem {
			task,
			token: self.token.child_token(),
			seq,
		});
		Some(seq)
	}

	/// Pops the next item in FIFO order.
	pub fn pop_front(&mut self) -> Option<DeferredItem> {
		self.queue.pop_front()
	}

	pub fn len(&self) -> usize {
		self.queue.len()
	}

	pub fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}

	/// Cancels every pending and future item. Returns how many were pending.
	pub fn cancel(&mut self) -> usize {
		self.token.cancel();
		let pending = self.queue.len();
		self.queue.clear();
		pending
	}

	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}
}
