//! Classic two-axis political compass reduction.
//!
//! Positive governance, civil liberties, society and justice scores lean
//! libertarian in the questionnaire weighting, while the compass plots
//! authoritarian upward. The social coordinate is therefore the negated mean
//! of those four axes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::axis::{Axis, AxisScores};
use crate::config::ChartConfig;

/// Axes averaged into the social (authority) coordinate
pub const SOCIAL_AXES: [Axis; 4] = [
    Axis::Governance,
    Axis::CivilLiberties,
    Axis::Society,
    Axis::Justice,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoliticalCompassPoint {
    /// -1 left, +1 right
    pub economic: f64,
    /// -1 libertarian, +1 authoritarian
    pub social: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    AuthoritarianLeft,
    AuthoritarianRight,
    LibertarianLeft,
    LibertarianRight,
}

impl Quadrant {
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::AuthoritarianLeft => "Authoritarian Left",
            Quadrant::AuthoritarianRight => "Authoritarian Right",
            Quadrant::LibertarianLeft => "Libertarian Left",
            Quadrant::LibertarianRight => "Libertarian Right",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl PoliticalCompassPoint {
    /// Quadrant the point falls in. The axes themselves count as right and
    /// authoritarian.
    pub fn quadrant(&self) -> Quadrant {
        match (self.economic >= 0.0, self.social >= 0.0) {
            (false, true) => Quadrant::AuthoritarianLeft,
            (true, true) => Quadrant::AuthoritarianRight,
            (false, false) => Quadrant::LibertarianLeft,
            (true, false) => Quadrant::LibertarianRight,
        }
    }
}

/// Reduce eight axes to `(economic, social)`. Missing axes read as 0.
pub fn to_political_compass(scores: &AxisScores) -> PoliticalCompassPoint {
    let economic = scores.value(Axis::Economy);
    let authority: f64 = SOCIAL_AXES.iter().map(|axis| scores.value(*axis)).sum();

    // `+ 0.0` turns -0.0 into 0.0
    PoliticalCompassPoint {
        economic: economic + 0.0,
        social: -authority / SOCIAL_AXES.len() as f64 + 0.0,
    }
}

/// Square chart geometry for plotting compass points in screen space
/// (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub size: f64,
    pub pad: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

impl From<&ChartConfig> for ChartFrame {
    fn from(config: &ChartConfig) -> Self {
        Self {
            size: config.size,
            pad: config.pad,
        }
    }
}

impl ChartFrame {
    /// Side length of the plotting grid
    pub fn grid(&self) -> f64 {
        self.size - self.pad * 2.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.size / 2.0, self.size / 2.0)
    }

    pub fn to_x(&self, economic: f64) -> f64 {
        self.center().0 + economic * self.grid() / 2.0
    }

    /// Authoritarian (+1) maps to the top edge of the grid
    pub fn to_y(&self, social: f64) -> f64 {
        self.center().1 - social * self.grid() / 2.0
    }

    pub fn place(&self, point: &PoliticalCompassPoint) -> (f64, f64) {
        (self.to_x(point.economic), self.to_y(point.social))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(Axis, f64)]) -> AxisScores {
        AxisScores::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_pure_economic() {
        let point = to_political_compass(&scores(&[
            (Axis::Economy, 1.0),
            (Axis::Governance, 0.0),
            (Axis::CivilLiberties, 0.0),
            (Axis::Society, 0.0),
            (Axis::Justice, 0.0),
        ]));
        assert_eq!(point.economic, 1.0);
        assert_eq!(point.social, 0.0);
    }

    #[test]
    fn test_all_libertarian_axes() {
        let point = to_political_compass(&scores(&[
            (Axis::Economy, 0.0),
            (Axis::Governance, 1.0),
            (Axis::CivilLiberties, 1.0),
            (Axis::Society, 1.0),
            (Axis::Justice, 1.0),
        ]));
        assert_eq!(point.economic, 0.0);
        assert_eq!(point.social, -1.0);
        assert_eq!(point.quadrant(), Quadrant::LibertarianRight);
    }

    #[test]
    fn test_ignores_non_social_axes() {
        let point = to_political_compass(&scores(&[
            (Axis::Diplomacy, 1.0),
            (Axis::Environment, -1.0),
            (Axis::Technology, 0.7),
        ]));
        assert_eq!(point.economic, 0.0);
        assert_eq!(point.social, 0.0);
    }

    #[test]
    fn test_empty_scores_are_centered() {
        let point = to_political_compass(&AxisScores::new());
        assert_eq!(point.economic, 0.0);
        assert_eq!(point.social, 0.0);
        assert!(point.social.is_sign_positive());
        assert_eq!(format!("{:+.2}", point.social), "+0.00");
        assert_eq!(serde_json::to_string(&point).unwrap(), r#"{"economic":0.0,"social":0.0}"#);
    }

    #[test]
    fn test_neutral_social_axes_are_positive_zero() {
        let point = to_political_compass(&scores(&[
            (Axis::Economy, -0.0),
            (Axis::Governance, 0.0),
            (Axis::CivilLiberties, 0.0),
            (Axis::Society, 0.0),
            (Axis::Justice, 0.0),
        ]));
        assert!(point.economic.is_sign_positive());
        assert!(point.social.is_sign_positive());
    }

    #[test]
    fn test_quadrants() {
        let q = |economic, social| PoliticalCompassPoint { economic, social }.quadrant();
        assert_eq!(q(-0.5, 0.5), Quadrant::AuthoritarianLeft);
        assert_eq!(q(0.5, 0.5), Quadrant::AuthoritarianRight);
        assert_eq!(q(-0.5, -0.5), Quadrant::LibertarianLeft);
        assert_eq!(q(0.5, -0.5), Quadrant::LibertarianRight);
        assert_eq!(q(0.0, 0.0), Quadrant::AuthoritarianRight);
    }

    #[test]
    fn test_chart_frame_corners() {
        let frame = ChartFrame::default();
        assert_eq!(frame.grid(), 352.0);
        let at = |economic, social| frame.place(&PoliticalCompassPoint { economic, social });
        assert_eq!(at(0.0, 0.0), (240.0, 240.0));
        // authoritarian right sits top-right
        assert_eq!(at(1.0, 1.0), (416.0, 64.0));
        assert_eq!(at(-1.0, -1.0), (64.0, 416.0));
    }
}
