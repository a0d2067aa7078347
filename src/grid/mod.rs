// src/grid/mod.rs
//! Der Kern: Vertex-Stufe (Gitterkoordinaten) und Pixel-Stufe (Pristine Grid).

pub mod coordinate;
pub mod derivatives;
pub mod params;
pub mod plane;
pub mod shading;

pub use coordinate::{GridCoord, GridVertexOutput, VertexUniforms, grid_coord_at, grid_vertex};
pub use derivatives::{DerivativeMode, UvDerivatives};
pub use params::GridParameters;
pub use plane::{GridPlane, WorldAxis};
pub use shading::{GridCoverage, grid_coverage, shade};
