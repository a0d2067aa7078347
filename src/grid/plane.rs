// src/grid/plane.rs
use crate::math::types::*;
use serde::{Deserialize, Serialize};

/// Weltachse, deren Farbe eine Achslinie trägt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorldAxis {
    X,
    Y,
    Z,
}

impl WorldAxis {
    fn component(self, v: Vec3) -> f32 {
        match self {
            WorldAxis::X => v.x,
            WorldAxis::Y => v.y,
            WorldAxis::Z => v.z,
        }
    }
}

/// Die drei achsparallelen Ebenen, auf denen das Gitter liegen kann
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GridPlane {
    /// Bodenebene (Y oben)
    #[default]
    Xz,
    Xy,
    Zy,
}

impl GridPlane {
    pub const ALL: [GridPlane; 3] = [GridPlane::Xz, GridPlane::Xy, GridPlane::Zy];

    /// (Primärachse, Sekundärachse) der Ebene
    pub fn axes(self) -> (WorldAxis, WorldAxis) {
        match self {
            GridPlane::Xz => (WorldAxis::X, WorldAxis::Z),
            GridPlane::Xy => (WorldAxis::X, WorldAxis::Y),
            GridPlane::Zy => (WorldAxis::Z, WorldAxis::Y),
        }
    }

    /// Achse senkrecht zur Ebene
    pub fn normal_axis(self) -> WorldAxis {
        match self {
            GridPlane::Xz => WorldAxis::Y,
            GridPlane::Xy => WorldAxis::Z,
            GridPlane::Zy => WorldAxis::X,
        }
    }

    pub fn normal(self) -> Vec3 {
        match self.normal_axis() {
            WorldAxis::X => Vec3::X,
            WorldAxis::Y => Vec3::Y,
            WorldAxis::Z => Vec3::Z,
        }
    }

    /// Projiziert einen 3D-Punkt in Ebenenkoordinaten.
    ///
    /// `x` ist die Sekundär-, `y` die Primärkoordinate. Damit misst `x` den
    /// Abstand zur Linie der Primärachse (dort ist die Sekundärkoordinate 0),
    /// und der erste Kanal jeder Achsabdeckung gehört zur Primärachse.
    pub fn project(self, point: Point3D) -> Vec2 {
        let (primary, secondary) = self.axes();
        Vec2::new(secondary.component(point), primary.component(point))
    }

    /// Umkehrung von [`GridPlane::project`] mit gegebener Höhe entlang der Normalen
    pub fn unproject(self, coords: Vec2, height: f32) -> Point3D {
        let (primary, secondary) = self.axes();
        let mut point = Vec3::ZERO;
        for (axis, value) in [
            (secondary, coords.x),
            (primary, coords.y),
            (self.normal_axis(), height),
        ] {
            match axis {
                WorldAxis::X => point.x = value,
                WorldAxis::Y => point.y = value,
                WorldAxis::Z => point.z = value,
            }
        }
        point
    }

    pub fn label(self) -> &'static str {
        match self {
            GridPlane::Xz => "XZ",
            GridPlane::Xy => "XY",
            GridPlane::Zy => "ZY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_pairing_table() {
        assert_eq!(GridPlane::Xz.axes(), (WorldAxis::X, WorldAxis::Z));
        assert_eq!(GridPlane::Xy.axes(), (WorldAxis::X, WorldAxis::Y));
        assert_eq!(GridPlane::Zy.axes(), (WorldAxis::Z, WorldAxis::Y));
    }

    #[test]
    fn test_project_orders_secondary_first() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(GridPlane::Xz.project(p), Vec2::new(3.0, 1.0));
        assert_eq!(GridPlane::Xy.project(p), Vec2::new(2.0, 1.0));
        assert_eq!(GridPlane::Zy.project(p), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let p = Vec3::new(-4.0, 0.5, 7.25);
        for plane in GridPlane::ALL {
            let height = plane.normal().dot(p);
            assert_eq!(plane.unproject(plane.project(p), height), p);
        }
    }
}
