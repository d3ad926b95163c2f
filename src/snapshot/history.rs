//! Snapshot History
//!
//! Ordered collection of a user's snapshots with JSON-file persistence.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{diff, DiffResult, Snapshot};
use crate::axis::CompassReading;
use crate::error::{CompassError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotHistory {
    /// Oldest first
    snapshots: Vec<Snapshot>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No snapshot store at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let history: SnapshotHistory = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} snapshot(s) from {}",
            history.len(),
            path.display()
        );
        Ok(history)
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number for the next unnamed snapshot: one past the highest `Snapshot N`
    fn next_default_number(&self) -> u64 {
        self.snapshots
            .iter()
            .filter_map(|s| s.name.strip_prefix("Snapshot ")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Capture `reading` as a new snapshot. Unnamed snapshots are numbered.
    pub fn save(
        &mut self,
        name: Option<String>,
        reading: &CompassReading,
        questionnaire_id: Option<String>,
    ) -> &Snapshot {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Snapshot {}", self.next_default_number()));
        let snapshot = Snapshot::capture(name, reading, questionnaire_id);
        tracing::info!("Saved snapshot '{}' ({})", snapshot.name, snapshot.id);

        self.snapshots.push(snapshot);
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Newest first, optionally limited to one questionnaire
    pub fn list(&self, questionnaire_id: Option<&str>) -> Vec<&Snapshot> {
        let mut out: Vec<&Snapshot> = self
            .snapshots
            .iter()
            .filter(|s| match questionnaire_id {
                Some(q) => s.questionnaire_id.as_deref() == Some(q),
                None => true,
            })
            .collect();
        // stable sort keeps insertion order inside the same second
        out.reverse();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn get(&self, id: &str) -> Result<&Snapshot> {
        self.snapshots
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CompassError::SnapshotNotFound(id.to_string()))
    }

    /// Delete a snapshot on explicit request
    pub fn remove(&mut self, id: &str) -> Result<Snapshot> {
        let pos = self
            .snapshots
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CompassError::SnapshotNotFound(id.to_string()))?;
        let removed = self.snapshots.remove(pos);
        tracing::info!("Deleted snapshot '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Diff from snapshot `from_id` to snapshot `to_id`
    pub fn diff(&self, from_id: &str, to_id: &str) -> Result<DiffResult> {
        let from = self.get(from_id)?;
        let to = self.get(to_id)?;
        Ok(diff(from, to))
    }
}
