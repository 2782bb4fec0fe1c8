use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use serde_json::Value;
use tracing::trace;

use crate::event::{BeforeContext, Event};

/// Handle returned by subscriptions, used to unsubscribe.
pub type ListenerId = u64;

/// Listener callback.
///
/// Receives the bus itself so that a listener can re-emit without holding a
/// strong reference to the bus (which would form a cycle).
pub type EventHandler = Arc<dyn Fn(&EventBus, &mut Event<'_>) + Send + Sync>;

struct Listener {
	id: ListenerId,
	once: bool,
	handler: EventHandler,
}

#[derive(Default)]
struct Listeners {
	next_id: ListenerId,
	by_name: HashMap<Box<str>, Vec<Listener>>,
	any: Vec<Listener>,
}

impl Listeners {
	fn alloc_id(&mut self) -> ListenerId {
		self.next_id = self.next_id.wrapping_add(1);
		self.next_id
	}

	/// Snapshots the handlers for `name`, dropping `once` listeners as they fire.
	fn take_handlers(&mut self, name: &str) -> Vec<EventHandler> {
		let mut out = Vec::new();
		if let Some(list) = self.by_name.get_mut(name) {
			out.extend(list.iter().map(|l| l.handler.clone()));
			list.retain(|l| !l.once);
			if list.is_empty() {
				self.by_name.remove(name);
			}
		}
		out.extend(self.any.iter().map(|l| l.handler.clone()));
		out
	}
}

/// Named, synchronous event bus.
///
/// Cloning yields another handle to the same listener table. Dispatch runs
/// listeners in registration order, named listeners before catch-all ones.
/// Listeners are snapshotted before dispatch, so listeners may subscribe,
/// unsubscribe, or trigger further events re-entrantly.
#[derive(Clone, Default)]
pub struct EventBus {
	inner: Arc<Mutex<Listeners>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Subscribes `handler` to events named `name`.
	pub fn on<F>(&self, name: impl Into<Box<str>>, handler: F) -> ListenerId
	where
		F: Fn(&EventBus, &mut Event<'_>) + Send + Sync + 'static,
	{
		self.subscribe(name.into(), Arc::new(handler), false)
	}

	/// Subscribes `handler` for a single dispatch of `name`.
	pub fn once<F>(&self, name: impl Into<Box<str>>, handler: F) -> ListenerId
	where
		F: Fn(&EventBus, &mut Event<'_>) + Send + Sync + 'static,
	{
		self.subscribe(name.into(), Arc::new(handler), true)
	}

	/// Subscribes `handler` to every event regardless of name.
	pub fn on_any<F>(&self, handler: F) -> ListenerId
	where
		F: Fn(&EventBus, &mut Event<'_>) + Send + Sync + 'static,
	{
		let mut inner = self.inner.lock();
		let id = inner.alloc_id();
		inner.any.push(Listener {
			id,
			once: false,
			handler: Arc::new(handler),
		});
		id
	}

	fn subscribe(&self, name: Box<str>, handler: EventHandler, once: bool) -> ListenerId {
		let mut inner = self.inner.lock();
		let id = inner.alloc_id();
		inner.by_name.entry(name).or_default().push(Listener { id, once, handler });
		id
	}

	/// Removes the listener with `id`. Returns false if it was already gone.
	pub fn off(&self, id: ListenerId) -> bool {
		let mut inner = self.inner.lock();
		let before = inner.any.len();
		inner.any.retain(|l| l.id != id);
		if inner.any.len() != before {
			return true;
		}

		let mut removed = false;
		inner.by_name.retain(|_, list| {
			let len = list.len();
			list.retain(|l| l.id != id);
			removed |= list.len() != len;
			!list.is_empty()
		});
		removed
	}

	/// Drops every listener, including catch-all ones.
	pub fn clear(&self) {
		let mut inner = self.inner.lock();
		inner.by_name.clear();
		inner.any.clear();
	}

	/// Number of listeners subscribed to `name` (catch-all listeners excluded).
	pub fn listener_count(&self, name: &str) -> usize {
		self.inner.lock().by_name.get(name).map_or(0, Vec::len)
	}

	/// Emits `name` with positional `args`.
	pub fn trigger(&self, name: &str, args: &[Value]) {
		self.dispatch(name, args, None);
	}

	/// Emits a cancellable pre-notification.
	///
	/// Listeners may call [`Event::abort`]; the caller reads the outcome from
	/// `ctx` after this returns.
	pub fn trigger_before(&self, name: &str, args: &[Value], ctx: &mut BeforeContext) {
		self.dispatch(name, args, Some(ctx));
	}

	/// Re-emits `event` under `name`, sharing its arguments and cancellation
	/// context.
	pub fn forward(&self, event: &mut Event<'_>, name: &str) {
		let args = event.args().to_vec();
		self.dispatch(name, &args, event.before_mut());
	}

	fn dispatch(&self, name: &str, args: &[Value], mut before: Option<&mut BeforeContext>) {
		let handlers = self.inner.lock().take_handlers(name);
		trace!(event = name, listeners = handlers.len(), "dispatch");
		for handler in handlers {
			let mut event = Event::new(name, args, before.as_deref_mut());
			handler(self, &mut event);
		}
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.lock();
		f.debug_struct("EventBus")
			.field("events", &inner.by_name.len())
			.field("catch_all", &inner.any.len())
			.finish()
	}
}
