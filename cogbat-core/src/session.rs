use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::task::TestKind;
use crate::trial::TrialRecord;

/// One test's reduced summary. Created once when a runner reaches its
/// terminal phase; a repeat run of the same test replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(rename = "testType")]
    pub test: TestKind,
    pub completed: bool,
    /// Mirrors `accuracy`; kept as a separate field for export consumers.
    pub score: u32,
    /// Percent correct, 0-100.
    pub accuracy: u32,
    #[serde(rename = "meanRT")]
    pub mean_rt_ms: u64,
    pub errors: u32,
    pub total_trials: u32,
    /// Longest correctly reproduced sequence length; memory test only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<u32>,
}

/// Demographic metadata attached at export time. No validation beyond the
/// field types themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// Top-level session aggregate: participant metadata, one summary per
/// completed test, and the append-only trial log across all tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(default)]
    pub participant_info: ParticipantInfo,
    #[serde(default)]
    pub tests: BTreeMap<TestKind, TestResult>,
    #[serde(default)]
    pub trial_data: Vec<TrialRecord>,
}
