//! JSON snapshot of the planner's state.
//!
//! A snapshot is what the persistence layer hands the scheduler: initiatives
//! and engineers already expanded with tags, unavailability and existing
//! blocks, plus the dependency edge list. [`RoadmapSnapshot::apply_schedule`]
//! performs the write-back the persistence layer does after a run.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{DependencyEdge, Engineer, Initiative, ScheduleResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapSnapshot {
    #[serde(default)]
    pub initiatives: Vec<Initiative>,
    #[serde(default)]
    pub engineers: Vec<Engineer>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEdge>,
}

impl RoadmapSnapshot {
    /// Read a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the snapshot as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn initiative(&self, id: &str) -> Option<&Initiative> {
        self.initiatives.iter().find(|i| i.id == id)
    }

    /// Initiatives that are not done
    pub fn active_initiatives(&self) -> impl Iterator<Item = &Initiative> {
        self.initiatives.iter().filter(|i| !i.is_done())
    }

    /// Replace engineers' scheduled blocks with the result of a run.
    ///
    /// Existing blocks of date-locked initiatives are kept; every other
    /// existing block is dropped. New blocks are added to their engineer,
    /// except where a kept locked block on any engineer already covers the
    /// same initiative. Blocks for engineers not in the snapshot are discarded.
    pub fn apply_schedule(&mut self, result: &ScheduleResult) {
        let locked: HashSet<&str> = self
            .initiatives
            .iter()
            .filter(|i| i.lock_dates)
            .map(|i| i.id.as_str())
            .collect();

        let mut retained = HashSet::new();
        for engineer in &mut self.engineers {
            engineer
                .scheduled_blocks
                .retain(|b| locked.contains(b.initiative_id.as_str()));
            retained.extend(engineer.scheduled_blocks.iter().map(|b| b.initiative_id.clone()));
        }

        for engineer in &mut self.engineers {
            engineer.scheduled_blocks.extend(
                result
                    .blocks
                    .iter()
                    .filter(|b| b.engineer_id == engineer.id)
                    .filter(|b| !retained.contains(&b.initiative_id))
                    .cloned(),
            );
        }
    }
}
