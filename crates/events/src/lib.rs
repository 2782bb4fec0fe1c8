//! Event bus shared by the editor facade and the command registry.
//!
//! Every editor owns one [`EventBus`]. Subsystems publish lifecycle
//! notifications on it (`run:{id}`, `stop:{id}`, `component:drag`, ...) and
//! collaborators subscribe by name. Pre-notifications carry a
//! [`BeforeContext`] through which a listener can cancel the pending
//! operation.
//!
//! User-facing diagnostics go through [`Logger`], which mirrors each entry
//! into `tracing` and onto the bus as `log` / `log:{level}`.

mod bus;
mod event;
mod log;

pub use bus::{EventBus, EventHandler, ListenerId};
pub use event::{BeforeContext, Event};
pub use log::{LogEntry, LogLevel, Logger};
pub use serde_json::Value;
