//! Named editor commands with a run/stop lifecycle.
//!
//! [`Commands`] is the registry: commands are added as templates, instantiated
//! lazily on first lookup, and tracked in an ordered active set. [`run`] and
//! [`stop`] drive the per-id state machine and publish lifecycle events on the
//! editor's bus:
//!
//! | event | args |
//! |---|---|
//! | `run:{id}:before` | `[options]` (cancellable) |
//! | `abort:{id}` | `[options]` |
//! | `run:{id}`, `stop:{id}` | `[result, options]` |
//! | `run`, `stop` | `[id, result, options]` |
//! | `stop:{id}:before` | `[options]` |
//!
//! Behaviors see the editor through [`CommandEditor`] and its capability
//! traits. The built-in catalog lives in [`builtins`].

pub mod builtins;
mod command;
mod def;
mod editor_ctx;
mod error;
mod options;
mod registry;
mod runner;

pub use command::{Command, CommandConfig};
pub use def::{Behavior, CommandDef, CommandInput, CommandResult, INITIALIZE, RUN, STOP};
pub use editor_ctx::*;
pub use error::{Capability, CommandError};
pub use options::{CommandOptions, Sender};
pub use registry::{CommandFactory, CommandSlot, CommandTemplate, Commands, CommandsConfig};
pub use runner::{run, run_default, stop, stop_default};

#[cfg(test)]
mod test_support;
