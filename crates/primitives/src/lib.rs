//! Core value types shared by the command registry and the editor facade.

/// Drag mode and drag session payloads.
pub mod drag;
/// Identifier types for editor entities.
pub mod ids;
/// Component status and editor view flags.
pub mod status;

pub use drag::{DragData, DragMode, Point};
pub use ids::ComponentId;
pub use status::{ComponentStatus, UiView};
