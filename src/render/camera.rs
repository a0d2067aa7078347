// src/render/camera.rs
use crate::math::{error::*, types::*, utils::constants::EPSILON};

/// Tiefenkonvention der Projektionsmatrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthRange {
    /// Nah = 0, fern = 1 (`Mat4::perspective_rh`)
    #[default]
    ZeroToOne,
    /// Nah = 1, fern = 0, fern ggf. unendlich (Bevy)
    Reversed,
}

impl DepthRange {
    /// Zwei NDC-Tiefen (nah, weiter), die sich endlich und gut konditioniert entprojizieren lassen
    fn ndc_depths(self) -> (f32, f32) {
        match self {
            DepthRange::ZeroToOne => (0.0, 0.5),
            DepthRange::Reversed => (1.0, 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3D,
    pub direction: Vec3,
}

impl Ray {
    /// Schnittpunkt mit der Ebene `normal · p = 0` vor dem Strahlursprung
    pub fn intersect_plane(&self, normal: Vec3) -> Option<Point3D> {
        let denom = normal.dot(self.direction);
        if denom.abs() < EPSILON {
            return None; // parallel
        }
        let t = -normal.dot(self.origin) / denom;
        (t >= 0.0).then(|| self.origin + self.direction * t)
    }
}

/// Kameradaten, die der Rasterizer von außen bekommt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCamera {
    pub view: Mat4,
    pub projection: Mat4,
    viewport: UVec2,
    depth_range: DepthRange,
    /// Weltposition, getrennt von `inverse_view` gehalten (f32-Genauigkeit weit vom Ursprung)
    position: Point3D,
    inverse_view: Mat4,
    inverse_projection: Mat4,
}

impl GridCamera {
    pub fn new(view: Mat4, projection: Mat4, viewport: UVec2) -> GridResult<Self> {
        let position = view.as_dmat4().inverse().w_axis.truncate().as_vec3();
        Self::with_position(view, projection, viewport, position)
    }

    /// Aus der Kamera-zu-Welt-Transformation (z.B. Bevys `GlobalTransform`).
    /// Die Position wird exakt übernommen statt aus der Inversen rekonstruiert.
    pub fn from_camera_transform(
        camera_to_world: Mat4,
        projection: Mat4,
        viewport: UVec2,
    ) -> GridResult<Self> {
        let view = camera_to_world.as_dmat4().inverse().as_mat4();
        Self::with_position(view, projection, viewport, camera_to_world.w_axis.truncate())
    }

    fn with_position(
        view: Mat4,
        projection: Mat4,
        viewport: UVec2,
        position: Point3D,
    ) -> GridResult<Self> {
        if viewport.x == 0 || viewport.y == 0 {
            return Err(GridError::InvalidConfiguration {
                message: format!("Viewport must not be empty, got {}x{}", viewport.x, viewport.y),
            });
        }

        for (name, matrix) in [("View", view), ("Projection", projection)] {
            if matrix.determinant().abs() < f32::MIN_POSITIVE {
                return Err(GridError::InvalidConfiguration {
                    message: format!("{name} matrix is not invertible"),
                });
            }
        }

        Ok(Self {
            view,
            projection,
            viewport,
            depth_range: DepthRange::default(),
            position,
            inverse_view: view.as_dmat4().inverse().as_mat4(),
            inverse_projection: projection.inverse(),
        })
    }

    /// Perspektivische Kamera mit `[0, 1]`-Tiefe
    pub fn look_at(
        eye: Point3D,
        target: Point3D,
        up: Vec3,
        fov_y_rad: f32,
        viewport: UVec2,
    ) -> GridResult<Self> {
        let aspect = viewport.x.max(1) as f32 / viewport.y.max(1) as f32;
        let view =
            DMat4::look_at_rh(eye.as_dvec3(), target.as_dvec3(), up.as_dvec3()).as_mat4();
        let projection = Mat4::perspective_rh(fov_y_rad, aspect, 0.1, 10_000.0);
        Self::with_position(view, projection, viewport, eye)
    }

    pub fn with_depth_range(mut self, depth_range: DepthRange) -> Self {
        self.depth_range = depth_range;
        self
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Weltposition der Kamera
    pub fn position(&self) -> Point3D {
        self.position
    }

    /// Bildschirmposition (Pixelzentrum bei +0.5, y nach unten) → NDC
    pub fn pixel_to_ndc(&self, pixel: Vec2) -> Vec2 {
        let size = self.viewport.as_vec2();
        Vec2::new(pixel.x / size.x * 2.0 - 1.0, 1.0 - pixel.y / size.y * 2.0)
    }

    /// Sichtstrahl durch eine Bildschirmposition, beginnend auf der Nahebene
    pub fn ray(&self, pixel: Vec2) -> Ray {
        self.ray_from(pixel, Vec3::ZERO)
    }

    /// Wie [`GridCamera::ray`], aber in einem um `origin` verschobenen Raum.
    /// Entprojiziert wird im Kameraraum, verschoben wird nur die exakte
    /// Kameraposition; große Weltkoordinaten tauchen dabei nie auf.
    pub fn ray_from(&self, pixel: Vec2, origin: Point3D) -> Ray {
        let ndc = self.pixel_to_ndc(pixel);
        let (near_depth, far_depth) = self.depth_range.ndc_depths();
        let near = self.inverse_projection.project_point3(ndc.extend(near_depth));
        let far = self.inverse_projection.project_point3(ndc.extend(far_depth));
        Ray {
            origin: (self.position - origin) + self.inverse_view.transform_vector3(near),
            direction: self
                .inverse_view
                .transform_vector3(far - near)
                .normalize_or_zero(),
        }
    }
}
