// src/viewport/settings.rs
use crate::grid::{DerivativeMode, GridParameters, GridPlane};
use crate::math::error::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

/// Standardpfad der Einstellungsdatei (relativ zum Arbeitsverzeichnis)
pub const SETTINGS_PATH: &str = "grid_settings.json";

/// Einstellungen des Gitter-Viewports, als JSON speicherbar
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub enabled: bool,
    pub plane: GridPlane,
    pub params: GridParameters,
    pub derivative_mode: DerivativeMode,
    /// Anteil der Fensterauflösung, in dem gerendert wird (0, 1]
    pub resolution_scale: f32,
    /// Halbe Kantenlänge des Gitter-Quads
    pub half_extent: f32,
    /// Quad unter der Kamera mitführen
    pub follow_camera: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            plane: GridPlane::default(),
            params: GridParameters::default(),
            derivative_mode: DerivativeMode::default(),
            resolution_scale: 0.5,
            half_extent: 500.0,
            follow_camera: true,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> GridResult<()> {
        self.params.validate()?;

        if !(self.resolution_scale > 0.0 && self.resolution_scale <= 1.0) {
            return Err(GridError::invalid(
                "Resolution scale must be in the range (0.0, 1.0]",
            ));
        }

        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(GridError::invalid("Half extent must be a positive number"));
        }

        Ok(())
    }

    /// Größe des Renderpuffers für eine logische Viewport-Größe
    pub fn render_size(&self, logical_viewport: Vec2) -> Option<UVec2> {
        let size = (logical_viewport * self.resolution_scale).round().as_uvec2();
        (size.x > 0 && size.y > 0).then_some(size)
    }

    pub fn from_json(json: &str) -> GridResult<Self> {
        let settings: GridSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> GridResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GridResult<()> {
        self.validate()?;
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Lädt die Einstellungen; fehlt die Datei oder ist sie kaputt, gelten die Defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                info!("Grid settings loaded from {}", path.display());
                settings
            }
            Err(GridError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                info!("No grid settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("Ignoring grid settings at {}: {err}", path.display());
                Self::default()
            }
        }
    }
}

/// Startup-System: ersetzt die Default-Einstellungen durch die Datei
pub fn load_grid_settings_system(mut commands: Commands) {
    commands.insert_resource(GridSettings::load_or_default(SETTINGS_PATH));
}
