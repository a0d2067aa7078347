// src/grid/params.rs
use crate::math::{error::*, types::*};
use serde::{Deserialize, Serialize};

/// Parameter des Gitters, wie sie Vertex- und Pixelstufe erwarten.
///
/// Linienbreiten sind Bruchteile von `scale`. Die Farben der Achsen und des
/// Zentrums sind RGB mit implizitem Alpha 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParameters {
    /// Größe einer Nebenzelle in Welteinheiten
    pub scale: f32,
    /// Nebenzellen pro Hauptlinie
    pub major_grid_factor: f32,

    pub minor_line_width: f32,
    pub major_line_width: f32,
    pub axis_line_width: f32,

    pub minor_line_color: Rgba,
    pub major_line_color: Rgba,

    pub x_axis_color: Vec3,
    pub y_axis_color: Vec3,
    pub z_axis_color: Vec3,
    pub center_color: Vec3,

    /// Globaler Alpha-Multiplikator
    pub opacity: f32,
}

impl GridParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abstand der Hauptlinien in Welteinheiten
    pub fn period(&self) -> f32 {
        self.scale * self.major_grid_factor
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_major_grid_factor(mut self, factor: f32) -> Self {
        self.major_grid_factor = factor;
        self
    }

    pub fn with_line_widths(mut self, minor: f32, major: f32, axis: f32) -> Self {
        self.minor_line_width = minor;
        self.major_line_width = major;
        self.axis_line_width = axis;
        self
    }

    pub fn with_line_colors(mut self, minor: Rgba, major: Rgba) -> Self {
        self.minor_line_color = minor;
        self.major_line_color = major;
        self
    }

    pub fn with_axis_colors(mut self, x: Vec3, y: Vec3, z: Vec3, center: Vec3) -> Self {
        self.x_axis_color = x;
        self.y_axis_color = y;
        self.z_axis_color = z;
        self.center_color = center;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Prüft die Wertebereiche. Die Shader-Stufen selbst validieren nicht.
    pub fn validate(&self) -> GridResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(GridError::invalid("Scale must be a positive number"));
        }

        if !(self.major_grid_factor.is_finite() && self.major_grid_factor > 0.0) {
            return Err(GridError::invalid(
                "Major grid factor must be a positive number",
            ));
        }

        for (name, width) in [
            ("Minor line width", self.minor_line_width),
            ("Major line width", self.major_line_width),
            ("Axis line width", self.axis_line_width),
        ] {
            if !(width.is_finite() && width >= 0.0) {
                return Err(GridError::InvalidConfiguration {
                    message: format!("{name} must not be negative"),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(GridError::invalid("Opacity must be between 0.0 and 1.0"));
        }

        Ok(())
    }
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            scale: 1.0,
            major_grid_factor: 10.0,
            minor_line_width: 0.02,
            major_line_width: 0.05,
            axis_line_width: 0.1,
            minor_line_color: Vec4::new(0.4, 0.4, 0.4, 1.0),
            major_line_color: Vec4::new(0.6, 0.6, 0.6, 1.0),
            x_axis_color: Vec3::new(0.9, 0.2, 0.25),
            y_axis_color: Vec3::new(0.35, 0.8, 0.2),
            z_axis_color: Vec3::new(0.2, 0.45, 0.95),
            center_color: Vec3::new(1.0, 1.0, 1.0),
            opacity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_parameters_are_valid() {
        let params = GridParameters::default();
        assert!(params.validate().is_ok());
        assert_relative_eq!(params.period(), 10.0);
    }

    #[test]
    fn test_builder_sets_fields() {
        let params = GridParameters::new()
            .with_scale(0.5)
            .with_major_grid_factor(4.0)
            .with_line_widths(0.01, 0.03, 0.2)
            .with_opacity(0.5);

        assert_relative_eq!(params.period(), 2.0);
        assert_relative_eq!(params.axis_line_width, 0.2);
        assert_relative_eq!(params.opacity, 0.5);
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        assert!(GridParameters::new().with_scale(0.0).validate().is_err());
        assert!(
            GridParameters::new()
                .with_major_grid_factor(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            GridParameters::new()
                .with_line_widths(-0.1, 0.05, 0.1)
                .validate()
                .is_err()
        );
        assert!(GridParameters::new().with_opacity(1.5).validate().is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = GridParameters::new()
            .with_line_widths(0.02, f32::NAN, 0.1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Major line width"));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let params: GridParameters = serde_json::from_str(r#"{ "scale": 2.0 }"#).unwrap();
        assert_relative_eq!(params.scale, 2.0);
        assert_relative_eq!(params.major_grid_factor, 10.0);
    }
}
