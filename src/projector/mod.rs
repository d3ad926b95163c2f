//! Compass Projector
//!
//! Pure transformations of axis scores into renderable coordinates:
//! - Golden-spiral sphere basis, rotation and perspective projection
//! - Per-frame layout of the rotating 3D compass
//! - Classic two-axis political compass reduction

pub mod animation;
pub mod geometry;
pub mod political;
pub mod sphere;

pub use animation::CompassAnimator;
pub use geometry::{
    build_sphere_basis, normalize_axis_value, project, project_with_fov, rotate, Projected, Vec3,
    AXIS_BASIS, FOV,
};
pub use political::{to_political_compass, ChartFrame, PoliticalCompassPoint, Quadrant};
pub use sphere::{AxisSpoke, CanvasFrame, Face, LabelAnchor, SphereLayout, ViewAngle};
