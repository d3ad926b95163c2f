//! Compass axes and per-axis score/confidence maps.
//!
//! The axis set is closed: eight dimensions in a fixed order. That order is
//! significant, it drives the sphere basis assignment and diff tie-breaking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CompassError, Result};

/// Number of compass axes
pub const AXIS_COUNT: usize = 8;

/// Response count below which an axis is flagged in the UI
pub const LOW_CONFIDENCE_THRESHOLD: u32 = 4;

/// One of the eight political dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Economy,
    Governance,
    CivilLiberties,
    Society,
    Diplomacy,
    Environment,
    Justice,
    Technology,
}

impl Axis {
    /// All axes in canonical order
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Economy,
        Axis::Governance,
        Axis::CivilLiberties,
        Axis::Society,
        Axis::Diplomacy,
        Axis::Environment,
        Axis::Justice,
        Axis::Technology,
    ];

    /// Position in canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire key, e.g. `civil_liberties`
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Economy => "economy",
            Axis::Governance => "governance",
            Axis::CivilLiberties => "civil_liberties",
            Axis::Society => "society",
            Axis::Diplomacy => "diplomacy",
            Axis::Environment => "environment",
            Axis::Justice => "justice",
            Axis::Technology => "technology",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Axis::Economy => "Economy",
            Axis::Governance => "Governance",
            Axis::CivilLiberties => "Civil Liberties",
            Axis::Society => "Society",
            Axis::Diplomacy => "Diplomacy",
            Axis::Environment => "Environment",
            Axis::Justice => "Justice",
            Axis::Technology => "Technology",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self> {
        Axis::ALL
            .iter()
            .copied()
            .find(|axis| axis.as_str() == s)
            .ok_or_else(|| CompassError::UnknownAxis(s.to_string()))
    }
}

/// Per-axis scores in [-1, 1].
///
/// An axis with no score is kept as `None` rather than folded into a neutral
/// 0, so callers can tell "unanswered" apart from "centrist". Projection and
/// diff math read missing axes as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<Axis, f64>")]
pub struct AxisScores {
    values: [Option<f64>; AXIS_COUNT],
}

impl AxisScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(axis, score)` pairs, validating every score
    pub fn from_pairs(pairs: &[(Axis, f64)]) -> Result<Self> {
        let mut scores = Self::new();
        for &(axis, value) in pairs {
            scores.set(axis, value)?;
        }
        Ok(scores)
    }

    /// Set one axis. Rejects non-finite values and values outside [-1, 1].
    pub fn set(&mut self, axis: Axis, value: f64) -> Result<()> {
        if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
            return Err(CompassError::ScoreOutOfRange { axis, value });
        }
        self.values[axis.index()] = Some(value);
        Ok(())
    }

    pub fn clear(&mut self, axis: Axis) {
        self.values[axis.index()] = None;
    }

    /// Raw score, `None` if the axis was never scored
    pub fn get(&self, axis: Axis) -> Option<f64> {
        self.values[axis.index()]
    }

    /// Score with missing axes read as neutral
    pub fn value(&self, axis: Axis) -> f64 {
        self.get(axis).unwrap_or(0.0)
    }

    pub fn is_scored(&self, axis: Axis) -> bool {
        self.get(axis).is_some()
    }

    /// Axes with no score, in canonical order
    pub fn unscored(&self) -> Vec<Axis> {
        Axis::ALL
            .iter()
            .copied()
            .filter(|axis| !self.is_scored(*axis))
            .collect()
    }

    /// Dense vector in canonical order, missing axes as 0
    pub fn to_array(&self) -> [f64; AXIS_COUNT] {
        let mut out = [0.0; AXIS_COUNT];
        for axis in Axis::ALL {
            out[axis.index()] = self.value(axis);
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, Option<f64>)> + '_ {
        Axis::ALL.iter().map(move |axis| (*axis, self.get(*axis)))
    }
}

impl TryFrom<BTreeMap<String, f64>> for AxisScores {
    type Error = CompassError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self> {
        let mut scores = AxisScores::new();
        for (key, value) in raw {
            scores.set(key.parse()?, value)?;
        }
        Ok(scores)
    }
}

impl From<AxisScores> for BTreeMap<Axis, f64> {
    fn from(scores: AxisScores) -> Self {
        scores
            .iter()
            .filter_map(|(axis, value)| value.map(|v| (axis, v)))
            .collect()
    }
}

/// How much an axis score can be trusted given its response count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Enough responses
    Sufficient,
    /// Some responses, below the threshold
    Tentative,
    /// Zero or one response
    Unreliable,
}

impl ConfidenceLevel {
    pub fn classify(count: u32, threshold: u32) -> Self {
        if count >= threshold {
            ConfidenceLevel::Sufficient
        } else if count < 2 {
            ConfidenceLevel::Unreliable
        } else {
            ConfidenceLevel::Tentative
        }
    }

    /// Glyph shown next to an axis label
    pub fn marker(self) -> Option<char> {
        match self {
            ConfidenceLevel::Sufficient => None,
            ConfidenceLevel::Tentative => Some('~'),
            ConfidenceLevel::Unreliable => Some('?'),
        }
    }

    pub fn is_low(self) -> bool {
        self != ConfidenceLevel::Sufficient
    }
}

/// Response counts per axis. Missing axes count as zero responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<Axis, u32>")]
pub struct ConfidenceMap {
    counts: [u32; AXIS_COUNT],
}

impl ConfidenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(Axis, u32)]) -> Self {
        let mut map = Self::new();
        for &(axis, count) in pairs {
            map.set(axis, count);
        }
        map
    }

    pub fn set(&mut self, axis: Axis, count: u32) {
        self.counts[axis.index()] = count;
    }

    pub fn get(&self, axis: Axis) -> u32 {
        self.counts[axis.index()]
    }

    pub fn level(&self, axis: Axis, threshold: u32) -> ConfidenceLevel {
        ConfidenceLevel::classify(self.get(axis), threshold)
    }

    /// Axes whose count falls below `threshold`
    pub fn low_confidence_axes(&self, threshold: u32) -> Vec<Axis> {
        Axis::ALL
            .iter()
            .copied()
            .filter(|axis| self.get(*axis) < threshold)
            .collect()
    }
}

impl TryFrom<BTreeMap<String, u32>> for ConfidenceMap {
    type Error = CompassError;

    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self> {
        let mut map = ConfidenceMap::new();
        for (key, count) in raw {
            map.set(key.parse()?, count);
        }
        Ok(map)
    }
}

impl From<ConfidenceMap> for BTreeMap<Axis, u32> {
    fn from(map: ConfidenceMap) -> Self {
        Axis::ALL.iter().map(|axis| (*axis, map.get(*axis))).collect()
    }
}

/// A compass as served by the scoring backend: scores plus response counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompassReading {
    pub dimensions: AxisScores,
    #[serde(default)]
    pub confidence: ConfidenceMap,
}

impl CompassReading {
    pub fn new(dimensions: AxisScores, confidence: ConfidenceMap) -> Self {
        Self {
            dimensions,
            confidence,
        }
    }

    /// Load a reading from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let reading: CompassReading = serde_json::from_str(&content)?;

        let unscored = reading.dimensions.unscored();
        if !unscored.is_empty() {
            tracing::warn!(
                "{}: {} axis(es) unscored, treating as neutral: {:?}",
                path.display(),
                unscored.len(),
                unscored
            );
        }

        Ok(reading)
    }
}
