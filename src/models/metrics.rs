// Normalized metrics: one entry per logical process, counts per version

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Instance counts for one version of a process. `None` = not reported by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionCounts {
    pub completed: Option<i64>,
    pub running: Option<i64>,
}

impl VersionCounts {
    pub fn new(completed: Option<i64>, running: Option<i64>) -> Self {
        Self { completed, running }
    }
}

/// All deployed versions of one logical process, keyed by version token (e.g. "v2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    pub key: String,
    pub versions: BTreeMap<String, VersionCounts>,
}

impl ProcessMetrics {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            versions: BTreeMap::new(),
        }
    }

    /// Sets the counts for `version`, replacing whatever was recorded before.
    pub fn update_or_create(&mut self, version: impl Into<String>, counts: VersionCounts) {
        self.versions.insert(version.into(), counts);
    }

    pub fn version(&self, version: &str) -> Option<&VersionCounts> {
        self.versions.get(version)
    }
}

/// Result of one aggregation run.
///
/// `processes` is unique by key and ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub completed_activities: i64,
    pub process_definition_count: i64,
    pub cached_process_definition_count: i64,
    pub processes: Vec<ProcessMetrics>,
}

impl Metrics {
    /// Looks up a process by its logical key.
    pub fn process(&self, key: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|p| p.key == key)
    }
}
