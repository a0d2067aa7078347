// src/grid/coordinate.rs
//! Vertex-Stufe: berechnet pro Vertex die Gitterkoordinate und reicht die
//! Clip-Position unverändert an den Rasterizer weiter.

use super::plane::GridPlane;
use crate::math::types::*;
use std::ops::{Add, Mul};

/// Gitterkoordinate eines Vertex bzw. Pixels.
///
/// `centered` liegt nahe 0 (um die Kamera zentriert, periodisch),
/// `world` ist die unveränderte Ebenenposition. Beide in der Komponenten-
/// reihenfolge von [`GridPlane::project`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridCoord {
    pub centered: Vec2,
    pub world: Vec2,
}

impl GridCoord {
    pub fn new(centered: Vec2, world: Vec2) -> Self {
        Self { centered, world }
    }

    /// Die vier Komponenten in Shader-Reihenfolge (xy zentriert, zw Welt)
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.centered.x, self.centered.y, self.world.x, self.world.y)
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self {
            centered: Vec2::new(v.x, v.y),
            world: Vec2::new(v.z, v.w),
        }
    }
}

// Für die Interpolation zwischen Vertices
impl Add for GridCoord {
    type Output = GridCoord;

    fn add(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.centered + rhs.centered, self.world + rhs.world)
    }
}

impl Mul<f32> for GridCoord {
    type Output = GridCoord;

    fn mul(self, rhs: f32) -> GridCoord {
        GridCoord::new(self.centered * rhs, self.world * rhs)
    }
}

/// Transformationskette und Kameraposition, vom Aufrufer geliefert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Point3D,
    pub plane: GridPlane,
    pub scale: f32,
    pub major_grid_factor: f32,
}

impl VertexUniforms {
    pub fn period(&self) -> f32 {
        self.scale * self.major_grid_factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridVertexOutput {
    pub clip_position: Vec4,
    pub grid_coord: GridCoord,
}

/// Periodischer Versatz, der die Koordinaten in Kameranähe klein hält.
/// `period` muss positiv sein; hier wird nicht geklemmt.
pub fn camera_centering_offset(camera_on_plane: Vec2, period: f32) -> Vec2 {
    (camera_on_plane / period).floor() * period
}

/// Gitterkoordinate für eine bereits bekannte Weltposition
pub fn grid_coord_at(
    world_position: Point3D,
    camera_position: Point3D,
    plane: GridPlane,
    period: f32,
) -> GridCoord {
    let world = plane.project(world_position);
    let offset = camera_centering_offset(plane.project(camera_position), period);
    GridCoord::new(world - offset, world)
}

/// Die Vertex-Stufe
pub fn grid_vertex(local_position: Point3D, uniforms: &VertexUniforms) -> GridVertexOutput {
    let local = local_position.extend(1.0);
    let clip_position = uniforms.projection * uniforms.view * uniforms.model * local;

    let world_position = (uniforms.model * local).truncate();
    let grid_coord = grid_coord_at(
        world_position,
        uniforms.camera_position,
        uniforms.plane,
        uniforms.period(),
    );

    GridVertexOutput {
        clip_position,
        grid_coord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniforms(camera_position: Vec3, plane: GridPlane) -> VertexUniforms {
        VertexUniforms {
            model: Mat4::IDENTITY,
            view: Mat4::look_at_rh(camera_position, Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0),
            camera_position,
            plane,
            scale: 1.0,
            major_grid_factor: 10.0,
        }
    }

    #[test]
    fn test_centering_offset_snaps_to_period() {
        let offset = camera_centering_offset(Vec2::new(25.0, -3.0), 10.0);
        assert_eq!(offset, Vec2::new(20.0, -10.0));
    }

    #[test]
    fn test_clip_position_is_passed_through() {
        let u = uniforms(Vec3::new(3.0, 5.0, 8.0), GridPlane::Xz);
        let local = Vec3::new(1.0, 0.0, -2.0);
        let out = grid_vertex(local, &u);
        let expected = u.projection * u.view * local.extend(1.0);
        assert_relative_eq!(out.clip_position.x, expected.x);
        assert_relative_eq!(out.clip_position.w, expected.w);
    }

    #[test]
    fn test_world_components_are_unmodified() {
        let u = uniforms(Vec3::new(123.0, 5.0, -47.0), GridPlane::Xz);
        let out = grid_vertex(Vec3::new(130.5, 0.0, -41.0), &u);
        // Xz: (z, x)
        assert_eq!(out.grid_coord.world, Vec2::new(-41.0, 130.5));
        // Versatz: floor(-47/10)*10 = -50, floor(123/10)*10 = 120
        assert_eq!(out.grid_coord.centered, Vec2::new(9.0, 10.5));
    }

    #[test]
    fn test_model_matrix_moves_world_position() {
        let mut u = uniforms(Vec3::new(0.0, 0.0, 5.0), GridPlane::Xy);
        u.model = Mat4::from_translation(Vec3::new(2.0, 3.0, 0.0));
        let out = grid_vertex(Vec3::ZERO, &u);
        assert_eq!(out.grid_coord.world, Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_centered_and_world_agree_modulo_period() {
        let camera = Vec3::new(1.0e5 + 3.0, 2.0, -7.5e4);
        let u = uniforms(camera, GridPlane::Xz);
        let out = grid_vertex(Vec3::new(1.0e5 + 4.0, 0.0, -7.5e4 + 1.0), &u);
        let diff = out.grid_coord.world - out.grid_coord.centered;
        let period = u.period();
        assert_relative_eq!((diff.x / period).round() * period, diff.x);
        assert_relative_eq!((diff.y / period).round() * period, diff.y);
        // Die zentrierten Werte bleiben klein
        assert!(out.grid_coord.centered.abs().max_element() < 2.0 * period);
    }

    #[test]
    fn test_vec4_roundtrip_keeps_shader_order() {
        let coord = GridCoord::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(coord.to_vec4(), Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(GridCoord::from_vec4(coord.to_vec4()), coord);
    }
}
