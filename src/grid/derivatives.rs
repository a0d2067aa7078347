// src/grid/derivatives.rs
//! Bildschirmableitungen der zentrierten Gitterkoordinate.
//!
//! Auf der GPU liefern `dFdx`/`dFdy` diese Werte implizit. Hier sind sie
//! ein expliziter Eingang der Pixelstufe und werden per finiter Differenz aus
//! demselben Interpolanten geschätzt, der auch die Koordinate liefert.

use crate::math::{types::*, utils::constants::MIN_DERIVATIVE};
use serde::{Deserialize, Serialize};

/// Differenzenverfahren für die Ableitungsschätzung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DerivativeMode {
    /// `(f(p + 1) - f(p - 1)) / 2`
    #[default]
    Central,
    /// `f(p + 1) - f(p)`, wie eine 2x2-Quad-Ableitung auf der GPU
    Forward,
}

impl DerivativeMode {
    pub fn label(self) -> &'static str {
        match self {
            DerivativeMode::Central => "Central difference",
            DerivativeMode::Forward => "Forward difference",
        }
    }
}

/// Partielle Ableitungen der zentrierten Koordinate nach Bildschirm-x und -y
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvDerivatives {
    pub ddx: Vec2,
    pub ddy: Vec2,
}

impl UvDerivatives {
    pub fn new(ddx: Vec2, ddy: Vec2) -> Self {
        Self { ddx, ddy }
    }

    /// Gleichmäßige Pixelgröße in Gittereinheiten (Draufsicht ohne Verzerrung)
    pub fn uniform(units_per_pixel: f32) -> Self {
        Self {
            ddx: Vec2::new(units_per_pixel, 0.0),
            ddy: Vec2::new(0.0, units_per_pixel),
        }
    }

    /// Gittereinheiten pro Pixel je Gitterrichtung:
    /// `(|(ddx.x, ddy.x)|, |(ddx.y, ddy.y)|)`, nach unten begrenzt.
    pub fn uv_deriv(&self) -> Vec2 {
        let deriv = Vec2::new(
            Vec2::new(self.ddx.x, self.ddy.x).length(),
            Vec2::new(self.ddx.y, self.ddy.y).length(),
        );
        deriv.max(Vec2::splat(MIN_DERIVATIVE))
    }
}

/// Schätzt eine Ableitung entlang einer Bildschirmachse.
///
/// `sample(offset)` liefert den Interpolanten am Nachbarpixel (`offset` in
/// Pixeln) oder `None`, wenn dort keine Ebene getroffen wird. Fehlt ein
/// Nachbar, wird auf die einseitige Differenz der anderen Seite
/// ausgewichen. `None`, wenn beide Seiten fehlen.
pub fn axis_derivative(
    mode: DerivativeMode,
    center: Vec2,
    sample: impl Fn(f32) -> Option<Vec2>,
) -> Option<Vec2> {
    let ahead = sample(1.0);
    match mode {
        DerivativeMode::Forward => match ahead {
            Some(next) => Some(next - center),
            None => sample(-1.0).map(|prev| center - prev),
        },
        DerivativeMode::Central => match (ahead, sample(-1.0)) {
            (Some(next), Some(prev)) => Some((next - prev) * 0.5),
            (Some(next), None) => Some(next - center),
            (None, Some(prev)) => Some(center - prev),
            (None, None) => None,
        },
    }
}

/// Schätzt beide Ableitungen am Pixel `pixel` aus einem Interpolanten über
/// Bildschirmpositionen.
pub fn estimate(
    mode: DerivativeMode,
    pixel: Vec2,
    center: Vec2,
    interpolant: impl Fn(Vec2) -> Option<Vec2>,
) -> Option<UvDerivatives> {
    let ddx = axis_derivative(mode, center, |d| interpolant(pixel + Vec2::new(d, 0.0)))?;
    let ddy = axis_derivative(mode, center, |d| interpolant(pixel + Vec2::new(0.0, d)))?;
    Some(UvDerivatives::new(ddx, ddy))
}
