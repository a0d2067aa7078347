// src/viewport/overlay.rs
//! Zeichnet das Gitter jedes Frame per Software-Rasterizer in ein Bild, das
//! als Vollbild-UI-Knoten über der 3D-Szene liegt.

use super::settings::GridSettings;
use crate::render::{DepthRange, GridCamera, GridImage, GridMesh, GridRenderer};
use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, TaskPool};
use bevy_asset::{Assets, Handle};
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_render::{
    render_asset::RenderAssetUsages,
    render_resource::{Extent3d, TextureDimension, TextureFormat},
    texture::Image,
};
use std::time::Instant;

/// Hinweis für Log und Bedienfenster: das Overlay hat keinen Tiefentest
pub const OVERLAY_DEPTH_NOTE: &str =
    "Grid is drawn as a screen overlay without depth test and covers scene objects";

/// Markiert den UI-Knoten mit dem Gitterbild
#[derive(Component)]
pub struct GridOverlayNode;

/// Ziel-Textur und Float-Puffer des Gitters
#[derive(Resource)]
pub struct GridOverlay {
    pub image: Handle<Image>,
    buffer: Option<GridImage>,
    last_error: Option<String>,
}

impl GridOverlay {
    /// Meldet einen Fehler nur, wenn er sich geändert hat
    fn report(&mut self, message: String) {
        if self.last_error.as_deref() != Some(message.as_str()) {
            warn!("Grid overlay disabled: {message}");
            self.last_error = Some(message);
        }
    }
}

fn texture_size(size: UVec2) -> Extent3d {
    Extent3d {
        width: size.x,
        height: size.y,
        depth_or_array_layers: 1,
    }
}

pub fn setup_grid_overlay(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let image = Image::new_fill(
        texture_size(UVec2::ONE),
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    let handle = images.add(image);

    commands.spawn((
        ImageBundle {
            style: Style {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            image: UiImage::new(handle.clone()),
            ..default()
        },
        GridOverlayNode,
    ));

    commands.insert_resource(GridOverlay {
        image: handle,
        buffer: None,
        last_error: None,
    });
    info!("{OVERLAY_DEPTH_NOTE}");
}

/// Blendet den Gitterknoten je nach Einstellung ein oder aus
pub fn sync_overlay_visibility_system(
    settings: Res<GridSettings>,
    mut nodes: Query<&mut Visibility, With<GridOverlayNode>>,
) {
    if !settings.is_changed() {
        return;
    }
    let visibility = if settings.enabled {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut node in &mut nodes {
        *node = visibility;
    }
}

pub fn render_grid_overlay_system(
    settings: Res<GridSettings>,
    mut overlay: ResMut<GridOverlay>,
    mut images: ResMut<Assets<Image>>,
    cameras: Query<(&Camera, &GlobalTransform), With<PanOrbitCamera>>,
) {
    if !settings.enabled {
        return;
    }
    let Ok((camera, transform)) = cameras.get_single() else {
        return;
    };
    let Some(size) = camera
        .logical_viewport_size()
        .and_then(|viewport| settings.render_size(viewport))
    else {
        return;
    };

    if let Err(err) = settings.validate() {
        overlay.report(err.to_string());
        return;
    }

    let grid_camera = match GridCamera::from_camera_transform(
        transform.compute_matrix(),
        camera.projection_matrix(),
        size,
    ) {
        Ok(grid_camera) => grid_camera.with_depth_range(DepthRange::Reversed),
        Err(err) => {
            overlay.report(err.to_string());
            return;
        }
    };

    let mut mesh = GridMesh::new(settings.plane, settings.half_extent);
    if settings.follow_camera {
        mesh = mesh.follow_camera(grid_camera.position(), settings.params.period());
    }
    let renderer = GridRenderer::new(grid_camera, mesh, settings.params, settings.derivative_mode);

    // Puffer nur bei Größenänderung neu anlegen
    let mut buffer = match overlay.buffer.take() {
        Some(buffer) if buffer.size() == size => buffer,
        _ => match GridImage::new(size.x, size.y) {
            Ok(buffer) => {
                debug!("Grid overlay buffer resized to {}x{}", size.x, size.y);
                buffer
            }
            Err(err) => {
                overlay.report(err.to_string());
                return;
            }
        },
    };

    let started = Instant::now();
    renderer.render_parallel(&mut buffer, ComputeTaskPool::get_or_init(TaskPool::default));
    trace!("Grid rendered in {:?}", started.elapsed());

    if let Some(image) = images.get_mut(&overlay.image) {
        if image.texture_descriptor.size != texture_size(size) {
            image.resize(texture_size(size));
        }
        buffer.write_rgba8(&mut image.data);
    }

    overlay.buffer = Some(buffer);
    overlay.last_error = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_note_mentions_missing_depth_test() {
        assert!(OVERLAY_DEPTH_NOTE.contains("without depth test"));
    }

    #[test]
    fn test_report_keeps_latest_error() {
        let mut overlay = GridOverlay {
            image: Handle::default(),
            buffer: None,
            last_error: None,
        };
        overlay.report("first".to_string());
        overlay.report("first".to_string());
        assert_eq!(overlay.last_error.as_deref(), Some("first"));
        overlay.report("second".to_string());
        assert_eq!(overlay.last_error.as_deref(), Some("second"));
    }
}
