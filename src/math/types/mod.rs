// src/math/types/mod.rs

// Re-export der glam-Typen, mit denen das gesamte Modul rechnet
pub use bevy::math::{DMat4, Mat4, UVec2, Vec2, Vec3, Vec4};

// Einheitliche Typen für das gesamte Modul
pub type Point3D = Vec3;
/// Farbe als (r, g, b, a), linear gemischt wie im Shader
pub type Rgba = Vec4;
