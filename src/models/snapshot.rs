// Raw engine snapshot (wire shape of the engine's metrics endpoint)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat metrics snapshot as reported by the process engine.
///
/// Both count maps are keyed by the same composite identifiers listed in
/// `deployed_process_definitions`. A missing entry means the engine did not report a
/// value for that identifier, which is not the same as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    #[serde(default)]
    pub completed_activities: i64,
    #[serde(default)]
    pub process_definition_count: i64,
    #[serde(default)]
    pub cached_process_definition_count: i64,
    #[serde(default)]
    pub deployed_process_definitions: Vec<String>,
    #[serde(default)]
    pub completed_process_instance_count: HashMap<String, i64>,
    #[serde(default)]
    pub running_process_instance_count: HashMap<String, i64>,
}
