//! Trial-list reduction.
//!
//! Mean RT is taken over correct trials with a positive measured latency
//! only, so omission trials and tasks that do not measure latency never
//! skew the average.

use cogbat_core::{TestKind, TestResult, TrialRecord};

/// Summary statistics for one test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub total_trials: u32,
    pub correct_trials: u32,
    /// Percent correct, rounded, 0-100. 0 for an empty list.
    pub accuracy: u32,
    /// Rounded mean latency of correct trials with rt > 0; 0 when none.
    pub mean_rt_ms: u64,
    pub errors: u32,
}

/// Reduce a trial list to summary statistics. Pure: no mutation, same
/// output for the same input.
pub fn reduce(trials: &[TrialRecord]) -> Metrics {
    let total = trials.len() as u32;
    let correct = trials.iter().filter(|t| t.is_correct()).count() as u32;

    let accuracy = if total == 0 {
        0
    } else {
        (f64::from(correct) * 100.0 / f64::from(total)).round() as u32
    };

    let rts: Vec<u64> = trials
        .iter()
        .filter(|t| t.is_correct())
        .filter_map(|t| t.reaction_time_ms)
        .filter(|&rt| rt > 0)
        .collect();
    let mean_rt_ms = if rts.is_empty() {
        0
    } else {
        (rts.iter().sum::<u64>() as f64 / rts.len() as f64).round() as u64
    };

    Metrics {
        total_trials: total,
        correct_trials: correct,
        accuracy,
        mean_rt_ms,
        errors: total - correct,
    }
}

impl Metrics {
    /// Wrap the reduction into the session-level summary record.
    pub fn into_result(self, test: TestKind, span: Option<u32>) -> TestResult {
        TestResult {
            test,
            completed: true,
            score: self.accuracy,
            accuracy: self.accuracy,
            mean_rt_ms: self.mean_rt_ms,
            errors: self.errors,
            total_trials: self.total_trials,
            span,
        }
    }
}
