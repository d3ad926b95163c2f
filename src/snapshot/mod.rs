//! Compass snapshots and the diff between two of them.

pub mod history;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::axis::{Axis, AxisScores, CompassReading, ConfidenceMap, AXIS_COUNT};

pub use history::SnapshotHistory;

/// An immutable, named capture of a compass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub name: String,
    pub scores: AxisScores,
    #[serde(default)]
    pub confidence: ConfidenceMap,
    /// Unix seconds
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire_id: Option<String>,
}

impl Snapshot {
    /// Capture `reading` now under a fresh id
    pub fn capture(
        name: impl Into<String>,
        reading: &CompassReading,
        questionnaire_id: Option<String>,
    ) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            scores: reading.dimensions,
            confidence: reading.confidence,
            created_at,
            questionnaire_id,
        }
    }

    pub fn reading(&self) -> CompassReading {
        CompassReading::new(self.scores, self.confidence)
    }
}

/// Change on a single axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisShift {
    pub axis: Axis,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// One entry per axis, canonical order
    pub deltas: Vec<AxisShift>,
    /// Sum of absolute deltas
    pub total_shift: f64,
    /// Axis with the largest absolute delta; earliest axis wins ties
    pub biggest_shift: AxisShift,
    /// Axes missing from either side, compared as neutral
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unscored: Vec<Axis>,
}

impl DiffResult {
    pub fn delta(&self, axis: Axis) -> f64 {
        self.deltas[axis.index()].delta
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shift in &self.deltas {
            writeln!(f, "  {:<16} {:+.2}", shift.axis.label(), shift.delta)?;
        }
        writeln!(f, "Total shift: {:.2}", self.total_shift)?;
        write!(
            f,
            "Biggest shift: {} ({:+.2})",
            self.biggest_shift.axis.label(),
            self.biggest_shift.delta
        )?;
        if !self.unscored.is_empty() {
            let names: Vec<&str> = self.unscored.iter().map(|a| a.as_str()).collect();
            write!(f, "\nUnscored (read as 0): {}", names.join(", "))?;
        }
        Ok(())
    }
}

/// Per-axis change from `from` to `to`
pub fn diff_scores(from: &AxisScores, to: &AxisScores) -> DiffResult {
    let deltas: Vec<AxisShift> = Axis::ALL
        .iter()
        .map(|&axis| AxisShift {
            axis,
            delta: to.value(axis) - from.value(axis),
        })
        .collect();

    let total_shift = deltas.iter().map(|s| s.delta.abs()).sum();

    let mut biggest_shift = deltas[0];
    for shift in &deltas[1..] {
        if shift.delta.abs() > biggest_shift.delta.abs() {
            biggest_shift = *shift;
        }
    }

    let unscored = Axis::ALL
        .iter()
        .copied()
        .filter(|axis| !from.is_scored(*axis) || !to.is_scored(*axis))
        .collect();

    debug_assert_eq!(deltas.len(), AXIS_COUNT);
    DiffResult {
        deltas,
        total_shift,
        biggest_shift,
        unscored,
    }
}

pub fn diff(from: &Snapshot, to: &Snapshot) -> DiffResult {
    diff_scores(&from.scores, &to.scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(Axis, f64)]) -> Snapshot {
        let reading = CompassReading::new(
            AxisScores::from_pairs(pairs).unwrap(),
            ConfidenceMap::new(),
        );
        Snapshot::capture("test", &reading, None)
    }

    #[test]
    fn test_capture_assigns_unique_ids() {
        let a = snapshot(&[]);
        let b = snapshot(&[]);
        assert_ne!(a.id, b.id);
        assert!(a.created_at > 0);
    }

    #[test]
    fn test_self_diff_is_zero() {
        let a = snapshot(&[(Axis::Economy, 0.3), (Axis::Justice, -0.8)]);
        let result = diff(&a, &a);
        assert!(result.deltas.iter().all(|s| s.delta == 0.0));
        assert_eq!(result.total_shift, 0.0);
        // all zero: the first axis wins
        assert_eq!(result.biggest_shift.axis, Axis::Economy);
    }

    #[test]
    fn test_economy_swing() {
        let a = snapshot(&[(Axis::Economy, -0.5)]);
        let b = snapshot(&[(Axis::Economy, 0.5)]);
        let result = diff(&a, &b);
        assert_eq!(result.biggest_shift.axis, Axis::Economy);
        assert_eq!(result.biggest_shift.delta, 1.0);
        assert_eq!(result.total_shift, 1.0);
    }

    #[test]
    fn test_ties_go_to_first_axis() {
        let a = snapshot(&[]);
        let b = snapshot(&[(Axis::Society, -0.4), (Axis::Governance, 0.4)]);
        let result = diff(&a, &b);
        assert_eq!(result.biggest_shift.axis, Axis::Governance);
        assert!((result.total_shift - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_antisymmetry() {
        let a = snapshot(&[(Axis::Economy, 0.2), (Axis::Technology, -0.9)]);
        let b = snapshot(&[(Axis::Economy, -0.1), (Axis::Diplomacy, 0.6)]);
        let ab = diff(&a, &b);
        let ba = diff(&b, &a);
        for axis in Axis::ALL {
            assert_eq!(ab.delta(axis), -ba.delta(axis));
        }
        assert_eq!(ab.total_shift, ba.total_shift);
    }

    #[test]
    fn test_unscored_axes_reported() {
        let a = snapshot(&[(Axis::Economy, 0.1)]);
        let mut b = a.clone();
        b.scores.set(Axis::Justice, 0.2).unwrap();
        let result = diff(&a, &b);
        assert!(result.unscored.contains(&Axis::Justice));
        assert!(!result.unscored.contains(&Axis::Economy));
    }

    #[test]
    fn test_display_two_decimals() {
        let a = snapshot(&[(Axis::Economy, -0.5)]);
        let b = snapshot(&[(Axis::Economy, 0.5)]);
        let text = diff(&a, &b).to_string();
        assert!(text.contains("Total shift: 1.00"));
        assert!(text.contains("Biggest shift: Economy (+1.00)"));
    }
}
