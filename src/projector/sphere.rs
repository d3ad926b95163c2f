//! Per-frame layout of the rotating 3D compass.
//!
//! Every axis owns one spoke of the sphere basis. The data polygon joins the
//! spoke tips after scaling each by the normalized axis score; the axis
//! spokes themselves are drawn slightly longer. Depth (rotated z) decides
//! drawing order and opacity.

use serde::{Deserialize, Serialize};

use super::geometry::{normalize_axis_value, project_with_fov, rotate, Projected, AXIS_BASIS};
use crate::axis::{Axis, CompassReading, ConfidenceLevel};
use crate::config::{CompassConfig, ExportConfig, RenderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewAngle {
    pub yaw: f64,
    pub pitch: f64,
}

impl ViewAngle {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Fixed angle used for static exports
    pub fn export(config: &ExportConfig) -> Self {
        Self::new(config.yaw, config.pitch)
    }
}

/// Drawing surface fitted to the available width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasFrame {
    pub width: f64,
    pub height: f64,
    pub center: (f64, f64),
    /// Sphere radius in pixels
    pub scale: f64,
}

impl CanvasFrame {
    /// Square-ish frame sized from the width alone
    pub fn fit(available_width: f64, config: &RenderConfig) -> Self {
        Self::fit_within(available_width, f64::INFINITY, config)
    }

    /// Height never exceeds the width, `max_height` or `available_height`
    pub fn fit_within(available_width: f64, available_height: f64, config: &RenderConfig) -> Self {
        let width = available_width.min(config.max_width).max(1.0);
        let height = width
            .min(config.max_height)
            .min(available_height)
            .max(1.0);
        Self {
            width,
            height,
            center: (width / 2.0, height / 2.0),
            scale: width.min(height) * config.scale_factor,
        }
    }

    pub fn contains(&self, p: &Projected) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpoke {
    pub axis: Axis,
    /// Rotated z of the unit spoke; larger is farther from the viewer
    pub depth: f64,
    pub axis_end: Projected,
    pub data_end: Projected,
    pub node_radius: f64,
    pub node_alpha: f64,
    pub label: LabelAnchor,
}

/// Triangle from the center to two neighbouring data tips
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub from: Axis,
    pub to: Axis,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereLayout {
    pub frame: CanvasFrame,
    pub view: ViewAngle,
    /// Spokes in canonical axis order
    pub spokes: Vec<AxisSpoke>,
    /// One closed polygon per grid ring radius
    pub grid_rings: Vec<Vec<Projected>>,
    pub faces: Vec<Face>,
    /// Axes sorted back to front
    pub draw_order: Vec<Axis>,
}

fn depth_alpha(depth: f64) -> f64 {
    0.5 + (1.0 + depth) * 0.25
}

impl SphereLayout {
    pub fn compute(
        reading: &CompassReading,
        view: ViewAngle,
        frame: CanvasFrame,
        config: &CompassConfig,
    ) -> Self {
        let render = &config.render;
        let fov = render.fov;

        let spokes: Vec<AxisSpoke> = Axis::ALL
            .iter()
            .zip(AXIS_BASIS.iter())
            .map(|(&axis, basis)| {
                let r = rotate(*basis, view.yaw, view.pitch);
                let radius = normalize_axis_value(reading.dimensions.value(axis));

                let axis_end =
                    project_with_fov(r, frame.center, frame.scale * render.axis_overshoot, fov);
                let data_end = project_with_fov(r * radius, frame.center, frame.scale, fov);

                let dx = axis_end.x - frame.center.0;
                let dy = axis_end.y - frame.center.1;
                let len = match (dx * dx + dy * dy).sqrt() {
                    l if l > 0.0 => l,
                    _ => 1.0,
                };

                AxisSpoke {
                    axis,
                    depth: r.z,
                    axis_end,
                    data_end,
                    node_radius: 3.0 + data_end.perspective * 2.0,
                    node_alpha: depth_alpha(r.z),
                    label: LabelAnchor {
                        x: axis_end.x + dx / len * render.label_offset,
                        y: axis_end.y + dy / len * render.label_offset,
                        alpha: depth_alpha(r.z).min(1.0),
                        confidence: reading
                            .confidence
                            .level(axis, config.confidence.low_threshold),
                    },
                }
            })
            .collect();

        let grid_rings = render
            .grid_rings
            .iter()
            .map(|&ring| {
                AXIS_BASIS
                    .iter()
                    .map(|basis| {
                        let r = rotate(*basis * ring, view.yaw, view.pitch);
                        project_with_fov(r, frame.center, frame.scale, fov)
                    })
                    .collect()
            })
            .collect();

        let faces = (0..spokes.len())
            .map(|i| {
                let a = &spokes[i];
                let b = &spokes[(i + 1) % spokes.len()];
                let avg_z = (a.depth + b.depth) / 2.0;
                Face {
                    from: a.axis,
                    to: b.axis,
                    alpha: 0.06 + (1.0 + avg_z) * 0.06,
                }
            })
            .collect();

        let mut ordered: Vec<&AxisSpoke> = spokes.iter().collect();
        ordered.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        let draw_order = ordered.iter().map(|s| s.axis).collect();

        Self {
            frame,
            view,
            spokes,
            grid_rings,
            faces,
            draw_order,
        }
    }

    pub fn spoke(&self, axis: Axis) -> &AxisSpoke {
        &self.spokes[axis.index()]
    }

    /// Whether every spoke tip, data tip and grid vertex lies on the canvas
    pub fn fits_canvas(&self) -> bool {
        self.spokes
            .iter()
            .all(|s| self.frame.contains(&s.axis_end) && self.frame.contains(&s.data_end))
            && self
                .grid_rings
                .iter()
                .flatten()
                .all(|p| self.frame.contains(p))
    }
}
