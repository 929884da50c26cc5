//! Common types shared across multiple modules.

use bevy::window::{CursorIcon, SystemCursorIcon};

/// Pointer feedback requested by the editor for the current frame.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum HoverCursor {
    #[default]
    Default,
    /// A gizmo handle is under the pointer or being dragged.
    Pointer,
    /// Drawing a new quad.
    Crosshair,
    /// The view is being panned.
    Grab,
}

impl HoverCursor {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HoverCursor::Default => CursorIcon::System(SystemCursorIcon::Default),
            HoverCursor::Pointer => CursorIcon::System(SystemCursorIcon::Pointer),
            HoverCursor::Crosshair => CursorIcon::System(SystemCursorIcon::Crosshair),
            HoverCursor::Grab => CursorIcon::System(SystemCursorIcon::Grabbing),
        }
    }
}
