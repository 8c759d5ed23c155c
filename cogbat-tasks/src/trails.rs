//! Trail making task, part A.
//!
//! Numbered circles, connected in ascending order. Wrong-target clicks add
//! to the error count but never block progress; the run is timed from
//! main-phase start to the final correct click and emits a single record.

use cogbat_core::{TaskPhase, TestKind, TrialRecord};
use rand::Rng;
use tracing::debug;

use crate::config::TrailsConfig;
use crate::event::Input;
use crate::runner::Task;

const STIMULUS: &str = "trail_making_a";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailTarget {
    /// 1-based label.
    pub id: u8,
    pub x: f32,
    pub y: f32,
    pub connected: bool,
}

#[derive(Debug)]
pub struct TrailsTask {
    cfg: TrailsConfig,
    phase: TaskPhase,
    targets: Vec<TrailTarget>,
    next_label: u8,
    errors: u32,
    started_ms: Option<u64>,
    completion_ms: Option<u64>,
    trials: Vec<TrialRecord>,
}

impl TrailsTask {
    pub fn new<R: Rng>(cfg: TrailsConfig, rng: &mut R) -> Self {
        let targets = place_targets(&cfg, rng);
        Self {
            cfg,
            phase: TaskPhase::default(),
            targets,
            next_label: 1,
            errors: 0,
            started_ms: None,
            completion_ms: None,
            trials: Vec::new(),
        }
    }

    pub fn targets(&self) -> &[TrailTarget] {
        &self.targets
    }

    /// Label the participant must click next.
    pub fn next_label(&self) -> u8 {
        self.next_label
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Elapsed time from start to the final correct click.
    pub fn completion_ms(&self) -> Option<u64> {
        self.completion_ms
    }

    fn finish(&mut self, now_ms: u64) {
        let completion = now_ms - self.started_ms.unwrap_or(now_ms);
        self.completion_ms = Some(completion);
        debug!(completion_ms = completion, errors = self.errors, "trail completed");
        self.trials.push(TrialRecord::new(
            TestKind::Trails,
            1,
            STIMULUS,
            Some("completed".to_string()),
            Some(completion),
            self.errors == 0,
        ));
        self.phase = TaskPhase::Complete;
    }
}

/// Rejection-sampled layout: uniform positions inside the margin, re-drawn
/// while closer than `min_spacing` to an earlier target, giving up on the
/// spacing rule after `max_attempts` draws.
fn place_targets<R: Rng>(cfg: &TrailsConfig, rng: &mut R) -> Vec<TrailTarget> {
    let mut targets: Vec<TrailTarget> = Vec::with_capacity(cfg.targets as usize);
    let crowded = |targets: &[TrailTarget], x: f32, y: f32, spacing: f32| {
        targets
            .iter()
            .any(|t| ((t.x - x).powi(2) + (t.y - y).powi(2)).sqrt() < spacing)
    };
    for id in 1..=cfg.targets {
        let mut x = rng.random_range(cfg.margin..cfg.board_width - cfg.margin);
        let mut y = rng.random_range(cfg.margin..cfg.board_height - cfg.margin);
        let mut attempts = 1;
        while attempts < cfg.max_attempts && crowded(&targets, x, y, cfg.min_spacing) {
            x = rng.random_range(cfg.margin..cfg.board_width - cfg.margin);
            y = rng.random_range(cfg.margin..cfg.board_height - cfg.margin);
            attempts += 1;
        }
        targets.push(TrailTarget {
            id,
            x,
            y,
            connected: false,
        });
    }
    targets
}

impl Task for TrailsTask {
    fn kind(&self) -> TestKind {
        TestKind::Trails
    }

    fn phase(&self) -> TaskPhase {
        self.phase
    }

    fn on_input(&mut self, input: Input, now_ms: u64) {
        match (self.phase, input) {
            (TaskPhase::Instructions, Input::Continue) => {
                self.phase = TaskPhase::Main;
                self.started_ms = Some(now_ms);
                self.next_label = 1;
                self.errors = 0;
            }
            (TaskPhase::Main, Input::Target(label)) => {
                if label == self.next_label {
                    if let Some(t) = self.targets.iter_mut().find(|t| t.id == label) {
                        t.connected = true;
                    }
                    if label == self.cfg.targets {
                        self.finish(now_ms);
                    } else {
                        self.next_label += 1;
                    }
                } else {
                    self.errors += 1;
                }
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, _now_ms: u64) {
        // Untimed task: progress is click-driven only.
    }

    fn next_deadline(&self) -> Option<u64> {
        None
    }

    fn expected_input(&self) -> Option<Input> {
        match self.phase {
            TaskPhase::Instructions => Some(Input::Continue),
            TaskPhase::Main => Some(Input::Target(self.next_label)),
            _ => None,
        }
    }

    fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    fn abort(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::seeded_rng;

    #[test]
    fn targets_stay_inside_margin_and_apart() {
        let cfg = TrailsConfig::default();
        let mut rng = seeded_rng(9);
        let task = TrailsTask::new(cfg.clone(), &mut rng);
        let targets = task.targets();
        assert_eq!(targets.len(), cfg.targets as usize);
        for t in targets {
            assert!(t.x >= cfg.margin && t.x <= cfg.board_width - cfg.margin);
            assert!(t.y >= cfg.margin && t.y <= cfg.board_height - cfg.margin);
        }
    }

    #[test]
    fn ascending_clicks_complete_without_errors() {
        let mut task = TrailsTask::new(TrailsConfig::default(), &mut seeded_rng(4));
        task.on_input(Input::Continue, 1000);
        for label in 1..=10 {
            task.on_input(Input::Target(label), 1000 + u64::from(label) * 700);
        }
        assert!(task.is_complete());
        assert_eq!(task.errors(), 0);
        assert_eq!(task.completion_ms(), Some(7000));

        let trial = &task.trials()[0];
        assert_eq!(trial.accuracy, 1);
        assert_eq!(trial.reaction_time_ms, Some(7000));
        assert_eq!(trial.response.as_deref(), Some("completed"));
    }

    #[test]
    fn out_of_order_click_counts_error_but_does_not_block() {
        let mut task = TrailsTask::new(TrailsConfig::default(), &mut seeded_rng(4));
        task.on_input(Input::Continue, 0);
        task.on_input(Input::Target(3), 100); // wrong
        assert_eq!(task.errors(), 1);
        assert_eq!(task.next_label(), 1);

        for label in 1..=10 {
            task.on_input(Input::Target(label), 200 + u64::from(label) * 100);
        }
        assert!(task.is_complete());
        assert_eq!(task.errors(), 1);
        // One error taints the single summary trial.
        assert_eq!(task.trials()[0].accuracy, 0);
    }
}
