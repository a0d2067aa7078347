// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    /// Untergrenze für Bildschirmableitungen, damit ein konstanter Interpolant nicht durch 0 teilt
    pub const MIN_DERIVATIVE: f32 = 1e-7;
    /// Untergrenze für Zellgrößen (Nenner in der Gitterberechnung)
    pub const MIN_CELL_SIZE: f32 = 0.1;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f32) -> bool {
        a.abs() < EPSILON
    }
}

/// Shader-Bausteine (GLSL-Semantik auf der CPU)
pub mod shading {
    /// Begrenzt auf [0, 1]
    pub fn saturate(value: f32) -> f32 {
        value.clamp(0.0, 1.0)
    }

    /// GLSL-`fract`: `x - floor(x)`, also auch für negative Werte in [0, 1).
    /// `f32::fract` schneidet dagegen Richtung 0 ab.
    pub fn fract(value: f32) -> f32 {
        value - value.floor()
    }

    /// Lineare Interpolation (GLSL `mix`)
    pub fn mix(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Smoothstep interpolation (hermite interpolation).
    /// Vertauschte Kanten (`edge0 > edge1`) ergeben eine fallende Flanke.
    pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
        let t = saturate((x - edge0) / (edge1 - edge0));
        t * t * (3.0 - 2.0 * t)
    }

    /// GLSL `clamp(x, lo, hi)` mit der Reihenfolge `min(max(x, lo), hi)`.
    /// Überschreitet `lo` die Obergrenze, gewinnt `hi` (kein Panic wie bei `f32::clamp`).
    pub fn clamp_loose(x: f32, lo: f32, hi: f32) -> f32 {
        x.max(lo).min(hi)
    }
}
