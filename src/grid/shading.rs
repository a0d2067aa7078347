// src/grid/shading.rs
//! Pixel-Stufe ("Pristine Grid"): prozedurale, kantengeglättete Neben-,
//! Haupt- und Achslinien, deren Breite in Pixeln statt in Welteinheiten
//! gemessen wird.

use super::{
    coordinate::GridCoord,
    derivatives::UvDerivatives,
    params::GridParameters,
    plane::{GridPlane, WorldAxis},
};
use crate::math::{
    types::*,
    utils::{constants::MIN_CELL_SIZE, shading::*},
};

/// Breite des Glättungsbands in Vielfachen der Pixelgröße
const LINE_AA: f32 = 1.5;
/// Zusätzlicher Abstand zur Achse, in dem Nebenlinien ausgeblendet werden (in `scale`)
const AXIS_FALLOFF_MARGIN: f32 = 0.01;

/// Abdeckung je Gitterrichtung, vor der Farbmischung
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridCoverage {
    pub axis: Vec2,
    pub major: Vec2,
    pub minor: Vec2,
}

impl GridCoverage {
    /// Hauptlinien beider Richtungen zusammengefasst
    pub fn major_combined(&self) -> f32 {
        combine(self.major)
    }

    pub fn minor_combined(&self) -> f32 {
        combine(self.minor)
    }
}

/// Eine Linie entlang einer Richtung deckt das Pixel voll ab, an
/// Kreuzungen wird linear gemischt.
fn combine(coverage: Vec2) -> f32 {
    mix(coverage.x, 1.0, coverage.y)
}

/// Abdeckung einer Linie für eine Gitterrichtung.
///
/// `distance` ist der Abstand zur Linienmitte in derselben Einheit wie
/// `width` und `deriv`; die Linie wird nie dünner als ein Pixel gezeichnet,
/// statt dessen verblasst sie.
fn line_coverage(distance: f32, width: f32, draw_width: f32, deriv: f32) -> f32 {
    let aa = deriv * LINE_AA;
    let coverage = smoothstep(draw_width + aa, draw_width - aa, distance);
    coverage * saturate(width / draw_width)
}

/// Achslinien, zentriert auf Welt-Null
fn axis_line(world: f32, axis_width: f32, deriv: f32) -> f32 {
    let draw_width = axis_width.max(deriv);
    line_coverage((world * 2.0).abs(), axis_width, draw_width, deriv)
}

/// Haupt- bzw. Nebengitter entlang einer Richtung.
///
/// `width` ist die Linienbreite in Welteinheiten, `cell` die bereits
/// begrenzte Zellgröße. Wird das Gitter feiner als ein Pixel, blendet die
/// Abdeckung auf eine flache Füllung der Linienbreite über, statt zu
/// flimmern.
fn grid_line(centered: f32, axis: f32, width: f32, cell: f32, deriv: f32) -> f32 {
    let cell_deriv = deriv / cell;
    let cell_width = width / cell;
    let draw_width = clamp_loose(cell_width, cell_deriv, 0.5);
    let cell_uv = 1.0 - (fract(centered / cell) * 2.0 - 1.0).abs();

    let coverage = line_coverage(cell_uv, cell_width, draw_width, cell_deriv);
    // Achsen haben Vorrang vor deckungsgleichen Gitterlinien
    let coverage = saturate(coverage - axis);
    mix(coverage, cell_width, saturate(cell_deriv * 2.0 - 1.0))
}

/// Berechnet die Abdeckung von Achsen, Haupt- und Nebenlinien für ein Pixel
pub fn grid_coverage(
    coord: GridCoord,
    derivatives: &UvDerivatives,
    params: &GridParameters,
) -> GridCoverage {
    let deriv = derivatives.uv_deriv();
    let scale = params.scale;

    let axis_width = params.major_line_width.max(params.axis_line_width) * scale;
    let axis = Vec2::new(
        axis_line(coord.world.x, axis_width, deriv.x),
        axis_line(coord.world.y, axis_width, deriv.y),
    );

    let major_cell = params.period().max(MIN_CELL_SIZE);
    let major_width = params.major_line_width * scale;
    let major = Vec2::new(
        grid_line(coord.centered.x, axis.x, major_width, major_cell, deriv.x),
        grid_line(coord.centered.y, axis.y, major_width, major_cell, deriv.y),
    );

    let minor_cell = scale.max(MIN_CELL_SIZE);
    let minor_width = params.minor_line_width * scale;
    let mut minor = Vec2::new(
        grid_line(coord.centered.x, axis.x, minor_width, minor_cell, deriv.x),
        grid_line(coord.centered.y, axis.y, minor_width, minor_cell, deriv.y),
    );

    // Nebenlinien nur außerhalb des Bands um beide Achsen
    let limit = axis_width + AXIS_FALLOFF_MARGIN * scale;
    if !(coord.world.x.abs() > limit && coord.world.y.abs() > limit) {
        minor = Vec2::ZERO;
    }

    GridCoverage { axis, major, minor }
}

/// Achsfarben (primär, sekundär) der Ebene, mit Alpha 1
pub fn axis_colors(plane: GridPlane, params: &GridParameters) -> (Rgba, Rgba) {
    let color = |axis: WorldAxis| {
        let rgb = match axis {
            WorldAxis::X => params.x_axis_color,
            WorldAxis::Y => params.y_axis_color,
            WorldAxis::Z => params.z_axis_color,
        };
        rgb.extend(1.0)
    };
    let (primary, secondary) = plane.axes();
    (color(primary), color(secondary))
}

/// Mischt die Abdeckungen zur Pixelfarbe (vor der globalen Deckkraft)
pub fn compose(coverage: &GridCoverage, plane: GridPlane, params: &GridParameters) -> Rgba {
    let minor_color = params.minor_line_color;
    let major_color = params.major_line_color;

    let mut color = minor_color
        .truncate()
        .extend(coverage.minor_combined() * minor_color.w);
    color = color.lerp(major_color, coverage.major_combined() * major_color.w);

    let (primary, secondary) = axis_colors(plane, params);
    // Am Ursprung kreuzen sich beide Achsen: dort gilt die Zentrumsfarbe
    let primary = primary.lerp(params.center_color.extend(1.0), coverage.axis.y);
    let axis_color = (secondary * coverage.axis.y).lerp(primary, coverage.axis.x);

    color * (1.0 - axis_color.w) + axis_color
}

/// Die Pixel-Stufe: Gitterkoordinate und Ableitungen → Farbe
pub fn shade(
    coord: GridCoord,
    derivatives: &UvDerivatives,
    plane: GridPlane,
    params: &GridParameters,
) -> Rgba {
    let coverage = grid_coverage(coord, derivatives, params);
    let color = compose(&coverage, plane, params);
    color * Vec4::new(1.0, 1.0, 1.0, params.opacity)
}
