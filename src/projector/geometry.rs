//! Sphere basis, rotation and perspective projection.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::Mul;

use crate::axis::AXIS_COUNT;

/// Default perspective field-of-view constant
pub const FOV: f64 = 600.0;

/// Basis for the fixed axis set, computed once per process
pub static AXIS_BASIS: Lazy<Vec<Vec3>> = Lazy::new(|| build_sphere_basis(AXIS_COUNT));

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, k: f64) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }
}

/// A point on screen plus its perspective factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Greater than 1 for points nearer the viewer, used for size and opacity
    pub perspective: f64,
}

/// Spread `n` unit vectors over a sphere along a golden-ratio spiral.
///
/// Even spacing holds for any `n`, unlike a latitude/longitude grid that
/// bunches points at the poles.
pub fn build_sphere_basis(n: usize) -> Vec<Vec3> {
    let golden = (1.0 + 5f64.sqrt()) / 2.0;
    let count = n as f64;

    (0..n)
        .map(|i| {
            let i = i as f64;
            let theta = (1.0 - 2.0 * (i + 0.5) / count).acos();
            let phi = TAU * i / golden;
            Vec3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            )
        })
        .collect()
}

/// Rotate about the Y axis by `yaw`, then about the X axis by `pitch`
pub fn rotate(p: Vec3, yaw: f64, pitch: f64) -> Vec3 {
    let (sin_y, cos_y) = yaw.sin_cos();
    let x1 = p.x * cos_y + p.z * sin_y;
    let z1 = -p.x * sin_y + p.z * cos_y;

    let (sin_x, cos_x) = pitch.sin_cos();
    let y1 = p.y * cos_x - z1 * sin_x;
    let z2 = p.y * sin_x + z1 * cos_x;

    Vec3::new(x1, y1, z2)
}

/// Perspective-project onto the screen plane using the default [`FOV`]
pub fn project(p: Vec3, center: (f64, f64), scale: f64) -> Projected {
    project_with_fov(p, center, scale, FOV)
}

pub fn project_with_fov(p: Vec3, center: (f64, f64), scale: f64, fov: f64) -> Projected {
    let f = fov / (fov + p.z * scale);
    Projected {
        x: center.0 + p.x * scale * f,
        y: center.1 + p.y * scale * f,
        perspective: f,
    }
}

/// Map a score in [-1, 1] to a radius in [0, 1]
pub fn normalize_axis_value(raw: f64) -> f64 {
    (raw + 1.0) / 2.0
}
