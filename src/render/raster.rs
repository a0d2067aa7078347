// src/render/raster.rs
//! Software-Rasterizer für das Gitter.
//!
//! Die Vertex-Stufe läuft auf den vier Ecken eines Gitter-Quads. Pro Pixel
//! wird der Sichtstrahl mit der Ebene des Quads geschnitten und die
//! Vertex-Ausgaben werden an diesem Punkt interpoliert; das entspricht der
//! perspektivisch korrekten Interpolation einer GPU. Ableitungen entstehen
//! aus demselben Interpolanten an den Nachbarpixeln.

use super::{camera::GridCamera, image::GridImage};
use crate::grid::{
    coordinate::{GridCoord, GridVertexOutput, VertexUniforms, grid_vertex},
    derivatives::{self, DerivativeMode},
    params::GridParameters,
    plane::GridPlane,
    shading,
};
use crate::math::types::*;
use bevy::tasks::TaskPool;

/// Das Quad, auf dem das Gitter gezeichnet wird
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMesh {
    pub plane: GridPlane,
    /// Halbe Kantenlänge in Welteinheiten
    pub half_extent: f32,
    /// Mittelpunkt in Ebenenkoordinaten
    pub center: Vec2,
    /// Versatz entlang der Ebenennormalen
    pub height: f32,
}

impl GridMesh {
    pub fn new(plane: GridPlane, half_extent: f32) -> Self {
        Self {
            plane,
            half_extent,
            center: Vec2::ZERO,
            height: 0.0,
        }
    }

    /// Zentriert das Quad unter der Kamera, auf die Periode eingerastet
    pub fn follow_camera(mut self, camera_position: Point3D, period: f32) -> Self {
        let on_plane = self.plane.project(camera_position);
        self.center = if period > 0.0 {
            (on_plane / period).round() * period
        } else {
            on_plane
        };
        self
    }

    /// Ursprung des lokalen Raums in Weltkoordinaten
    pub fn origin(&self) -> Point3D {
        self.plane.unproject(self.center, self.height)
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.origin())
    }

    /// Eckpunkte im lokalen Raum, Reihenfolge wie die bilinearen Gewichte
    pub fn corners(&self) -> [Point3D; 4] {
        let e = self.half_extent;
        [
            Vec2::new(-e, -e),
            Vec2::new(e, -e),
            Vec2::new(e, e),
            Vec2::new(-e, e),
        ]
        .map(|c| self.plane.unproject(c, 0.0))
    }

    /// Bilineare Gewichte eines lokalen Ebenenpunkts; `None` außerhalb des Quads
    fn weights(&self, local: Vec2, clip_to_quad: bool) -> Option<[f32; 4]> {
        let size = 2.0 * self.half_extent;
        let s = (local.x + self.half_extent) / size;
        let t = (local.y + self.half_extent) / size;
        if clip_to_quad && !((0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)) {
            return None;
        }
        Some([(1.0 - s) * (1.0 - t), s * (1.0 - t), s * t, (1.0 - s) * t])
    }
}

/// Alles, was pro Bild konstant ist
#[derive(Debug, Clone)]
pub struct GridRenderer {
    camera: GridCamera,
    mesh: GridMesh,
    params: GridParameters,
    derivative_mode: DerivativeMode,
    vertices: [GridVertexOutput; 4],
}

impl GridRenderer {
    pub fn new(
        camera: GridCamera,
        mesh: GridMesh,
        params: GridParameters,
        derivative_mode: DerivativeMode,
    ) -> Self {
        let model = mesh.model();
        let uniforms = VertexUniforms {
            model,
            view: camera.view,
            projection: camera.projection,
            camera_position: camera.position(),
            plane: mesh.plane,
            scale: params.scale,
            major_grid_factor: params.major_grid_factor,
        };
        let vertices = mesh.corners().map(|corner| grid_vertex(corner, &uniforms));

        Self {
            camera,
            mesh,
            params,
            derivative_mode,
            vertices,
        }
    }

    pub fn vertices(&self) -> &[GridVertexOutput; 4] {
        &self.vertices
    }

    /// Interpolierte Gitterkoordinate an einer Bildschirmposition
    fn interpolate(&self, screen: Vec2, clip_to_quad: bool) -> Option<GridCoord> {
        // Das Modell ist eine reine Verschiebung: Strahl direkt im lokalen Raum
        let ray = self.camera.ray_from(screen, self.mesh.origin());
        let hit = ray.intersect_plane(self.mesh.plane.normal())?;
        let weights = self.mesh.weights(self.mesh.plane.project(hit), clip_to_quad)?;
        Some(
            self.vertices
                .iter()
                .zip(weights)
                .fold(GridCoord::default(), |acc, (vertex, w)| {
                    acc + vertex.grid_coord * w
                }),
        )
    }

    /// Gitterkoordinate am Pixelzentrum, falls das Quad getroffen wird
    pub fn grid_coord_at_pixel(&self, x: u32, y: u32) -> Option<GridCoord> {
        self.interpolate(pixel_center(x, y), true)
    }

    /// Farbe eines Pixels; transparent, wenn das Quad verfehlt wird
    pub fn shade_pixel(&self, x: u32, y: u32) -> Rgba {
        let pixel = pixel_center(x, y);
        let Some(coord) = self.interpolate(pixel, true) else {
            return Vec4::ZERO;
        };
        // Nachbarn wie Hilfspixel auf der GPU: auch außerhalb des Quads
        let derivatives = derivatives::estimate(self.derivative_mode, pixel, coord.centered, |p| {
            self.interpolate(p, false).map(|c| c.centered)
        });
        match derivatives {
            Some(derivatives) => {
                shading::shade(coord, &derivatives, self.mesh.plane, &self.params)
            }
            None => Vec4::ZERO,
        }
    }

    fn shade_row(&self, y: u32, row: &mut [Rgba]) {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = self.shade_pixel(x as u32, y);
        }
    }

    /// Rendert seriell, Zeile für Zeile
    pub fn render(&self, image: &mut GridImage) {
        let width = image.width() as usize;
        for (y, row) in image.pixels_mut().chunks_mut(width).enumerate() {
            self.shade_row(y as u32, row);
        }
    }

    /// Rendert die Pixel in einer beliebigen Reihenfolge
    pub fn render_in_order(
        &self,
        image: &mut GridImage,
        order: impl IntoIterator<Item = (u32, u32)>,
    ) {
        for (x, y) in order {
            image.set(x, y, self.shade_pixel(x, y));
        }
    }

    /// Rendert zeilenweise parallel auf einem Task-Pool
    pub fn render_parallel(&self, image: &mut GridImage, pool: &TaskPool) {
        let width = image.width() as usize;
        pool.scope(|scope| {
            for (y, row) in image.pixels_mut().chunks_mut(width).enumerate() {
                scope.spawn(async move {
                    self.shade_row(y as u32, row);
                });
            }
        });
    }
}

fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SIZE: UVec2 = UVec2::new(48, 32);

    fn renderer(eye: Vec3, target: Vec3, mode: DerivativeMode) -> GridRenderer {
        let camera = GridCamera::look_at(eye, target, Vec3::Y, 1.0, SIZE).unwrap();
        let params = GridParameters::default();
        let mesh = GridMesh::new(GridPlane::Xz, 200.0).follow_camera(eye, params.period());
        GridRenderer::new(camera, mesh, params, mode)
    }

    fn oblique() -> GridRenderer {
        renderer(
            Vec3::new(3.0, 4.0, 9.0),
            Vec3::new(0.0, 0.0, 0.0),
            DerivativeMode::Central,
        )
    }

    fn bits(image: &GridImage) -> Vec<[u32; 4]> {
        image
            .pixels()
            .iter()
            .map(|p| p.to_array().map(f32::to_bits))
            .collect()
    }

    #[test]
    fn test_follow_camera_snaps_to_period() {
        let mesh = GridMesh::new(GridPlane::Xz, 50.0).follow_camera(Vec3::new(26.0, 3.0, -14.0), 10.0);
        assert_eq!(mesh.center, Vec2::new(-10.0, 30.0));
        assert_eq!(mesh.model().w_axis.truncate(), Vec3::new(30.0, 0.0, -10.0));
    }

    #[test]
    fn test_vertex_stage_runs_on_corners() {
        let r = oblique();
        let center = r.mesh.center;
        let world: Vec<Vec2> = r.vertices().iter().map(|v| v.grid_coord.world).collect();
        assert!(world.contains(&(center + Vec2::new(-200.0, -200.0))));
        assert!(world.contains(&(center + Vec2::new(200.0, 200.0))));
    }

    #[test]
    fn test_interpolated_coordinate_matches_ray_hit() {
        let r = oblique();
        let coord = r.grid_coord_at_pixel(24, 16).unwrap();
        let hit = r
            .camera
            .ray(pixel_center(24, 16))
            .intersect_plane(Vec3::Y)
            .unwrap();
        let expected = GridPlane::Xz.project(hit);
        assert_relative_eq!(coord.world.x, expected.x, epsilon = 1e-3);
        assert_relative_eq!(coord.world.y, expected.y, epsilon = 1e-3);
    }

    #[test]
    fn test_sky_pixels_are_transparent() {
        // Blick über den Horizont: obere Zeile trifft die Ebene nicht
        let r = renderer(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.2, -10.0),
            DerivativeMode::Central,
        );
        assert_eq!(r.shade_pixel(24, 0), Vec4::ZERO);
        assert!(r.grid_coord_at_pixel(24, 0).is_none());
    }

    #[test]
    fn test_render_draws_something() {
        let r = oblique();
        let mut image = GridImage::new(SIZE.x, SIZE.y).unwrap();
        r.render(&mut image);
        assert!(image.pixels().iter().any(|p| p.w > 0.1));
        assert!(image.pixels().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_evaluation_order_does_not_matter() {
        let r = oblique();
        let mut serial = GridImage::new(SIZE.x, SIZE.y).unwrap();
        r.render(&mut serial);

        let mut reversed = GridImage::new(SIZE.x, SIZE.y).unwrap();
        let order: Vec<(u32, u32)> = (0..SIZE.y)
            .flat_map(|y| (0..SIZE.x).map(move |x| (x, y)))
            .collect();
        r.render_in_order(&mut reversed, order.into_iter().rev());

        let mut parallel = GridImage::new(SIZE.x, SIZE.y).unwrap();
        r.render_parallel(&mut parallel, &TaskPool::new());

        assert_eq!(bits(&serial), bits(&reversed));
        assert_eq!(bits(&serial), bits(&parallel));
    }

    #[test]
    fn test_derivative_modes_agree_on_flat_view() {
        // Draufsicht: der Interpolant ist nahezu affin, beide Verfahren stimmen überein
        let eye = Vec3::new(0.5, 20.0, 0.5);
        let target = Vec3::new(0.5, 0.0, 0.4);
        let central = renderer(eye, target, DerivativeMode::Central);
        let forward = renderer(eye, target, DerivativeMode::Forward);
        for (x, y) in [(10, 10), (24, 16), (40, 5)] {
            let a = central.shade_pixel(x, y);
            let b = forward.shade_pixel(x, y);
            assert!((a - b).abs().max_element() < 0.05);
        }
    }

    #[test]
    fn test_camera_period_translation_keeps_image() {
        // Weit weg von den Achsen, die an Welt-Null hängen
        let params = GridParameters::default();
        let period = params.period();
        let render_from = |offset: Vec3| {
            let eye = Vec3::new(3.0, 4.0, 9.0) + offset;
            let camera = GridCamera::look_at(eye, offset, Vec3::Y, 1.0, SIZE).unwrap();
            let mesh = GridMesh::new(GridPlane::Xz, 200.0).follow_camera(eye, period);
            let mut image = GridImage::new(SIZE.x, SIZE.y).unwrap();
            GridRenderer::new(camera, mesh, params, DerivativeMode::Central).render(&mut image);
            image
        };

        let base_offset = Vec3::new(50.0 * period, 0.0, 50.0 * period);
        let base = render_from(base_offset);
        assert!(base.pixels().iter().any(|p| p.w > 0.0));

        // bis 1e6 Welteinheiten vom Ursprung
        for periods in [2.0, 1.0e3, 1.0e4, 1.0e5] {
            let shift = Vec3::new(periods * period, 0.0, -periods * period);
            let moved = render_from(base_offset + shift);
            for (a, b) in base.pixels().iter().zip(moved.pixels()) {
                assert!(
                    (*a - *b).abs().max_element() < 1e-4,
                    "image changed after moving {periods} periods"
                );
            }
        }
    }

    fn origin_view(plane: GridPlane) -> GridRenderer {
        // Blick entlang der Ebenennormalen auf den Ursprung, Pixelzentrum genau in der Mitte
        let size = UVec2::new(33, 33);
        let eye = plane.normal() * 2.0;
        let up = if plane.normal() == Vec3::Y { Vec3::Z } else { Vec3::Y };
        let camera = GridCamera::look_at(eye, Vec3::ZERO, up, 0.2, size).unwrap();
        let params = GridParameters::default();
        let mesh = GridMesh::new(plane, 200.0).follow_camera(eye, params.period());
        GridRenderer::new(camera, mesh, params, DerivativeMode::Central)
    }

    fn assert_origin_is_center(plane: GridPlane) {
        let r = origin_view(plane);
        let coord = r.grid_coord_at_pixel(16, 16).unwrap();
        assert_relative_eq!(coord.world.length(), 0.0, epsilon = 1e-3);
        assert_relative_eq!(coord.centered.length(), 0.0, epsilon = 1e-3);

        let color = r.shade_pixel(16, 16);
        let center = GridParameters::default().center_color;
        assert_relative_eq!(color.x, center.x, epsilon = 1e-3);
        assert_relative_eq!(color.y, center.y, epsilon = 1e-3);
        assert_relative_eq!(color.z, center.z, epsilon = 1e-3);
        assert_relative_eq!(color.w, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_xy_plane_origin_renders_center_color() {
        assert_origin_is_center(GridPlane::Xy);
    }

    #[test]
    fn test_zy_plane_origin_renders_center_color() {
        assert_origin_is_center(GridPlane::Zy);
    }
}
