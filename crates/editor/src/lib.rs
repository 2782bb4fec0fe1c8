//! Editor facade for the page builder.
//!
//! [`Editor`] wires the command registry from `vellum-commands` to in-memory
//! subsystems: a component tree, the selection, toggleable views, device
//! presets, a clipboard, the current drag session, an optional undo
//! manager, and a next-tick continuation queue. Everything is synchronous;
//! deferred work runs when the host calls [`Editor::tick`].

pub mod components;
pub mod config;
mod deferred;
pub mod devices;
mod editor;

pub use components::{Component, ComponentSpec, ComponentTree};
pub use config::{ConfigError, EditorConfig};
pub use devices::Device;
pub use editor::Editor;
pub use vellum_commands::{CommandEditor, CommandError, CommandOptions, Sender};
