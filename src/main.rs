// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use bevy_window::{Window as PrimaryWindowConfig, WindowPlugin};

// Eigene Module deklarieren
pub mod grid;
pub mod math;
pub mod render;
pub mod setup; // Kamera und Referenzszene
pub mod viewport;

use setup::setup_scene;
use viewport::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(PrimaryWindowConfig {
                title: "Pristine Grid".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .init_resource::<GridSettings>()
        .add_systems(
            Startup,
            (setup_scene, setup_grid_overlay, load_grid_settings_system),
        )
        .add_systems(
            Update,
            (
                // UI zuerst, damit Änderungen noch im selben Frame gerendert werden
                grid_control_ui_system,
                sync_overlay_visibility_system,
                render_grid_overlay_system,
            )
                .chain(),
        )
        .run();
}
