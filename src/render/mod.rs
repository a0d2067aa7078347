// src/render/mod.rs
//! Software-Host für die beiden Gitterstufen: Kamera, Quad, Rasterisierung
//! und Bildpuffer.

pub mod camera;
pub mod image;
pub mod raster;

pub use camera::{DepthRange, GridCamera, Ray};
pub use image::{GridImage, over};
pub use raster::{GridMesh, GridRenderer};
