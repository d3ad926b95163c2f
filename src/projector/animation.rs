//! Rotation state for the animated 3D view.

use std::f64::consts::TAU;
use std::time::Duration;

use super::sphere::{CanvasFrame, SphereLayout, ViewAngle};
use crate::axis::CompassReading;
use crate::config::CompassConfig;

/// Owns the yaw of a spinning compass and renders frames on demand.
///
/// Yaw grows by `rotate_speed` for every frame-rate tick of elapsed time and
/// is kept in `[0, 2π)`.
#[derive(Debug, Clone)]
pub struct CompassAnimator {
    reading: CompassReading,
    config: CompassConfig,
    frame: CanvasFrame,
    yaw: f64,
    running: bool,
}

impl CompassAnimator {
    pub fn new(reading: CompassReading, available_width: f64, config: CompassConfig) -> Self {
        let frame = CanvasFrame::fit(available_width, &config.render);
        Self {
            reading,
            config,
            frame,
            yaw: 0.0,
            running: true,
        }
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn view(&self) -> ViewAngle {
        ViewAngle::new(self.yaw, self.config.render.pitch)
    }

    /// Advance rotation by elapsed wall time. No-op once stopped.
    pub fn advance(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        let render = &self.config.render;
        let ticks = dt.as_secs_f64() * render.frame_rate;
        self.yaw = (self.yaw + render.rotate_speed * ticks).rem_euclid(TAU);
    }

    /// Swap in fresh scores without resetting the rotation
    pub fn set_reading(&mut self, reading: CompassReading) {
        self.reading = reading;
    }

    pub fn resize(&mut self, available_width: f64) {
        self.frame = CanvasFrame::fit(available_width, &self.config.render);
    }

    /// Stop advancing; the view keeps its last angle
    pub fn stop(&mut self) {
        tracing::debug!("Compass animation stopped at yaw {:.3}", self.yaw);
        self.running = false;
    }

    /// Layout at the current angle
    pub fn frame(&self) -> SphereLayout {
        SphereLayout::compute(&self.reading, self.view(), self.frame, &self.config)
    }

    /// Layout at the fixed export angle, independent of the animation
    pub fn export_frame(&self) -> SphereLayout {
        SphereLayout::compute(
            &self.reading,
            ViewAngle::export(&self.config.export),
            self.frame,
            &self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, AxisScores, ConfidenceMap};

    fn animator() -> CompassAnimator {
        CompassAnimator::new(CompassReading::default(), 520.0, CompassConfig::default())
    }

    #[test]
    fn test_one_frame_advances_rotate_speed() {
        let mut anim = animator();
        anim.advance(Duration::from_secs_f64(1.0 / 60.0));
        assert!((anim.yaw() - 0.003).abs() < 1e-9);
    }

    #[test]
    fn test_one_second() {
        let mut anim = animator();
        anim.advance(Duration::from_secs(1));
        assert!((anim.yaw() - 0.18).abs() < 1e-12);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut anim = animator();
        // 40 s * 0.18 rad/s = 7.2 rad, one full turn plus ~0.917
        anim.advance(Duration::from_secs(40));
        assert!(anim.yaw() >= 0.0 && anim.yaw() < TAU);
        assert!((anim.yaw() - (7.2 - TAU)).abs() < 1e-9);
    }

    #[test]
    fn test_stop_freezes_angle() {
        let mut anim = animator();
        anim.advance(Duration::from_secs(1));
        anim.stop();
        let yaw = anim.yaw();
        anim.advance(Duration::from_secs(5));
        assert_eq!(anim.yaw(), yaw);
        assert!(!anim.is_running());
    }

    #[test]
    fn test_set_reading_keeps_rotation() {
        let mut anim = animator();
        anim.advance(Duration::from_secs(1));
        let yaw = anim.yaw();

        let scores = AxisScores::from_pairs(&[(Axis::Economy, -1.0)]).unwrap();
        anim.set_reading(CompassReading::new(scores, ConfidenceMap::new()));
        assert_eq!(anim.yaw(), yaw);

        // economy at -1 has zero radius
        let layout = anim.frame();
        let spoke = layout.spoke(Axis::Economy);
        assert!((spoke.data_end.x - layout.frame.center.0).abs() < 1e-9);
        assert!((spoke.data_end.y - layout.frame.center.1).abs() < 1e-9);
    }

    #[test]
    fn test_resize_refits_canvas() {
        let mut anim = animator();
        assert_eq!(anim.frame().frame.width, 520.0);
        anim.resize(300.0);
        let frame = anim.frame().frame;
        assert_eq!((frame.width, frame.height), (300.0, 300.0));
        assert_eq!(frame.center, (150.0, 150.0));
    }

    #[test]
    fn test_frame_uses_current_view() {
        let mut anim = animator();
        anim.advance(Duration::from_secs(2));
        let layout = anim.frame();
        assert_eq!(layout.view.yaw, anim.yaw());
        assert_eq!(layout.view.pitch, 0.35);

        let export = anim.export_frame();
        assert_eq!(export.view, ViewAngle::new(0.6, 0.35));
    }
}
