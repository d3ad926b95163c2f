pub mod axis;
pub mod config;
pub mod error;
pub mod projector;
pub mod snapshot;

pub use axis::{
    Axis, AxisScores, CompassReading, ConfidenceLevel, ConfidenceMap, AXIS_COUNT,
    LOW_CONFIDENCE_THRESHOLD,
};
pub use config::{ChartConfig, CompassConfig, ConfidenceConfig, ExportConfig, RenderConfig};
pub use error::{CompassError, Result};
pub use projector::{
    build_sphere_basis, normalize_axis_value, project, rotate, to_political_compass, AxisSpoke,
    CanvasFrame, ChartFrame, CompassAnimator, PoliticalCompassPoint, Projected, Quadrant,
    SphereLayout, Vec3, ViewAngle, AXIS_BASIS,
};
pub use snapshot::{diff, diff_scores, AxisShift, DiffResult, Snapshot, SnapshotHistory};
