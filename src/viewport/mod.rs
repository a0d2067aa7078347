// src/viewport/mod.rs
//! Bevy-Anbindung: Einstellungen, Bedienfenster und das Gitter-Overlay.

pub mod overlay;
pub mod settings;
pub mod ui;

pub use overlay::{
    GridOverlay, GridOverlayNode, OVERLAY_DEPTH_NOTE, render_grid_overlay_system,
    setup_grid_overlay, sync_overlay_visibility_system,
};
pub use settings::{GridSettings, SETTINGS_PATH, load_grid_settings_system};
pub use ui::grid_control_ui_system;
