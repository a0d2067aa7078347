// ./src/setup.rs
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

const CUBE_SIZE: f32 = 1.0;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Würfel als Größenreferenz, steht auf der XZ-Ebene
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)),
        material: materials.add(StandardMaterial {
            base_color: Color::rgb(0.8, 0.55, 0.3),
            metallic: 0.1,
            perceptual_roughness: 0.6,
            ..default()
        }),
        transform: Transform::from_xyz(0.0, CUBE_SIZE * 0.5, 0.0),
        ..default()
    });

    // Licht
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    // Kamera; das Gitter liegt als Overlay darüber, daher dunkler Hintergrund
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::rgb(0.08, 0.08, 0.1)),
                ..default()
            },
            transform: Transform::from_xyz(-6.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            radius: Some(12.0), // Start Entfernung
            ..default()
        },
    ));
}
