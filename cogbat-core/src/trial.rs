use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TestKind;

/// One stimulus-response event.
///
/// `trial_number` is 1-based and strictly increasing within a run.
/// `response` is `None` when nothing qualifying was registered before the
/// window closed; `reaction_time_ms` is `None` when no latency was measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    #[serde(rename = "testType")]
    pub test: TestKind,
    pub trial_number: u32,
    pub stimulus: String,
    pub response: Option<String>,
    pub reaction_time_ms: Option<u64>,
    /// 1 = correct, 0 = incorrect.
    pub accuracy: u8,
    pub timestamp: DateTime<Utc>,
}

impl TrialRecord {
    pub fn new(
        test: TestKind,
        trial_number: u32,
        stimulus: impl Into<String>,
        response: Option<String>,
        reaction_time_ms: Option<u64>,
        correct: bool,
    ) -> Self {
        Self {
            test,
            trial_number,
            stimulus: stimulus.into(),
            response,
            reaction_time_ms,
            accuracy: if correct { 1 } else { 0 },
            timestamp: Utc::now(),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.accuracy == 1
    }
}
