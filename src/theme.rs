//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor canvas and UI.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Canvas
// ============================================================================

/// Light grey behind everything
pub const CANVAS_CLEAR: Color = Color::srgb(0.788, 0.788, 0.788);

/// Outline around the background image and the pivot marker
pub const OUTLINE_BLACK: Color = Color::BLACK;

/// Red world X axis
pub const AXIS_X: Color = Color::srgb(1.0, 0.0, 0.0);

/// Green world Y axis
pub const AXIS_Y: Color = Color::srgb(0.0, 1.0, 0.0);

/// Pink highlight for the snapped pixel under the pointer
pub const CURSOR: Color = Color::srgba(0.957, 0.259, 0.549, 0.7);

// ============================================================================
// Quads
// ============================================================================

/// Pale green hatch inside every quad
pub const QUAD_FILL: Color = Color::srgba(0.729, 0.910, 0.663, 0.35);

/// Dark outline for unselected quads
pub const QUAD_OUTLINE: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);

/// Cyan outline for the active quad
pub const QUAD_SELECTED: Color = Color::srgb(0.208, 0.871, 0.988);

// ============================================================================
// Gizmo Handles
// ============================================================================

/// Faint purple for the four scale edges
pub const HANDLE_EDGE: Color = Color::srgba(0.631, 0.259, 0.957, 0.4);

/// Sand color for the free-move square
pub const HANDLE_PLANE: Color = Color::srgb(0.867, 0.745, 0.502);

pub const HANDLE_X: Color = Color::srgb(1.0, 0.0, 0.0);

pub const HANDLE_Y: Color = Color::srgb(0.0, 1.0, 0.0);

/// Handle under the pointer or being dragged
pub const HANDLE_ACTIVE: Color = Color::WHITE;

/// Yellow pivot marker
pub const PIVOT: Color = Color::srgb(0.957, 0.886, 0.259);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Quad name labels drawn over the canvas
    pub const QUAD_LABEL: egui::Color32 = egui::Color32::BLACK;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;
}

/// Convert a Bevy Color to egui Color32 (preserving alpha)
pub fn bevy_to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (srgba.alpha * 255.0) as u8,
    )
}
