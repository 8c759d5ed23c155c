//! Eriksen flanker task.
//!
//! Five arrows, respond to the center one. Practice cycles the stimulus
//! table in order; the scored run draws uniformly at random. A stimulus that
//! times out resolves silently as a miss.

use cogbat_core::{TaskPhase, TestKind, TrialRecord};
use cogbat_timing::TimerSlot;
use rand::Rng;
use tracing::debug;

use crate::config::FlankerConfig;
use crate::event::Input;
use crate::runner::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn token(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FlankerStimulus {
    pub display: &'static str,
    pub target: Side,
    pub congruent: bool,
}

pub const STIMULI: [FlankerStimulus; 4] = [
    FlankerStimulus { display: "← ← ← ← ←", target: Side::Left, congruent: true },
    FlankerStimulus { display: "→ → → → →", target: Side::Right, congruent: true },
    FlankerStimulus { display: "→ → ← → →", target: Side::Left, congruent: false },
    FlankerStimulus { display: "← ← → ← ←", target: Side::Right, congruent: false },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Fixation gap before the next stimulus.
    Iti,
    Stimulus { onset: u64, index: usize },
    Feedback,
}

#[derive(Debug)]
pub struct FlankerTask {
    cfg: FlankerConfig,
    phase: TaskPhase,
    state: State,
    timer: TimerSlot,
    /// Scored-run stimulus order, drawn once up front.
    sequence: Vec<usize>,
    trial_index: u32,
    trials: Vec<TrialRecord>,
}

impl FlankerTask {
    pub fn new<R: Rng>(cfg: FlankerConfig, rng: &mut R) -> Self {
        let sequence = (0..cfg.main_trials)
            .map(|_| rng.random_range(0..STIMULI.len()))
            .collect();
        Self {
            cfg,
            phase: TaskPhase::default(),
            state: State::Idle,
            timer: TimerSlot::new(),
            sequence,
            trial_index: 0,
            trials: Vec::new(),
        }
    }

    /// Stimulus currently on screen, if any.
    pub fn current_stimulus(&self) -> Option<&'static FlankerStimulus> {
        match self.state {
            State::Stimulus { index, .. } => Some(&STIMULI[index]),
            _ => None,
        }
    }

    fn phase_trials(&self) -> u32 {
        if self.phase.is_practice() {
            self.cfg.practice_trials
        } else {
            self.cfg.main_trials
        }
    }

    fn feedback_ms(&self) -> u64 {
        if self.phase.is_practice() {
            self.cfg.feedback_practice_ms
        } else {
            self.cfg.feedback_main_ms
        }
    }

    fn enter_run(&mut self, phase: TaskPhase, now_ms: u64) {
        self.phase = phase;
        self.trial_index = 0;
        self.state = State::Iti;
        self.timer.arm(now_ms, self.cfg.inter_trial_ms);
    }

    fn present(&mut self, now_ms: u64) {
        let index = if self.phase.is_practice() {
            (self.trial_index as usize) % STIMULI.len()
        } else {
            self.sequence[self.trial_index as usize]
        };
        debug!(trial = self.trial_index + 1, stimulus = STIMULI[index].display, "flanker stimulus on");
        self.state = State::Stimulus { onset: now_ms, index };
        self.timer.arm(now_ms, self.cfg.response_window_ms);
    }

    fn resolve(&mut self, now_ms: u64, response: Option<Side>) {
        let State::Stimulus { onset, index } = self.state else {
            return;
        };
        self.timer.cancel();
        let stim = &STIMULI[index];
        let correct = response == Some(stim.target);
        if self.phase.is_main() {
            self.trials.push(TrialRecord::new(
                TestKind::Flanker,
                self.trials.len() as u32 + 1,
                stim.display,
                response.map(|s| s.token().to_string()),
                response.map(|_| now_ms - onset),
                correct,
            ));
        }
        self.trial_index += 1;
        self.state = State::Feedback;
        self.timer.arm(now_ms, self.feedback_ms());
    }

    fn advance(&mut self, now_ms: u64) {
        if self.trial_index >= self.phase_trials() {
            if self.phase.is_practice() {
                self.phase = TaskPhase::PracticeDone;
            } else {
                self.phase = TaskPhase::Complete;
            }
            self.state = State::Idle;
        } else {
            self.state = State::Iti;
            self.timer.arm(now_ms, self.cfg.inter_trial_ms);
        }
    }
}

impl Task for FlankerTask {
    fn kind(&self) -> TestKind {
        TestKind::Flanker
    }

    fn phase(&self) -> TaskPhase {
        self.phase
    }

    fn on_input(&mut self, input: Input, now_ms: u64) {
        match (self.phase, input) {
            (TaskPhase::Instructions, Input::Continue) => {
                self.enter_run(TaskPhase::Practice, now_ms);
            }
            (TaskPhase::PracticeDone, Input::Continue) => {
                self.enter_run(TaskPhase::Main, now_ms);
            }
            (TaskPhase::Practice | TaskPhase::Main, Input::Left) => {
                self.resolve(now_ms, Some(Side::Left));
            }
            (TaskPhase::Practice | TaskPhase::Main, Input::Right) => {
                self.resolve(now_ms, Some(Side::Right));
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, now_ms: u64) {
        if !self.timer.fire(now_ms) {
            return;
        }
        match self.state {
            State::Iti => self.present(now_ms),
            // Window closed with no response.
            State::Stimulus { .. } => self.resolve(now_ms, None),
            State::Feedback => self.advance(now_ms),
            State::Idle => {}
        }
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    fn expected_input(&self) -> Option<Input> {
        if self.phase.awaits_confirmation() {
            return Some(Input::Continue);
        }
        match self.current_stimulus().map(|s| s.target) {
            Some(Side::Left) => Some(Input::Left),
            Some(Side::Right) => Some(Input::Right),
            None => None,
        }
    }

    fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    fn abort(&mut self) {
        self.timer.cancel();
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{fire_next, seeded_rng};

    fn small() -> FlankerConfig {
        FlankerConfig {
            practice_trials: 2,
            main_trials: 4,
            ..FlankerConfig::default()
        }
    }

    fn into_main(task: &mut FlankerTask, now: &mut u64) {
        task.on_input(Input::Continue, *now);
        // Practice trials: answer correctly, feedback, next.
        while task.phase().is_practice() || task.phase() == TaskPhase::PracticeDone {
            if task.phase() == TaskPhase::PracticeDone {
                task.on_input(Input::Continue, *now);
                break;
            }
            fire_next(task, now);
            if let Some(input) = task.expected_input() {
                *now += 300;
                task.on_input(input, *now);
            }
        }
    }

    #[test]
    fn correct_response_measures_latency() {
        let mut rng = seeded_rng(7);
        let mut task = FlankerTask::new(small(), &mut rng);
        let mut now = 0;
        into_main(&mut task, &mut now);

        fire_next(&mut task, &mut now); // ITI elapses, stimulus on
        let expected = task.expected_input().unwrap();
        now += 412;
        task.on_input(expected, now);

        let trial = &task.trials()[0];
        assert_eq!(trial.accuracy, 1);
        assert_eq!(trial.reaction_time_ms, Some(412));
        assert_eq!(trial.trial_number, 1);
    }

    #[test]
    fn wrong_side_scores_zero() {
        let mut rng = seeded_rng(7);
        let mut task = FlankerTask::new(small(), &mut rng);
        let mut now = 0;
        into_main(&mut task, &mut now);

        fire_next(&mut task, &mut now);
        let wrong = match task.expected_input().unwrap() {
            Input::Left => Input::Right,
            _ => Input::Left,
        };
        now += 350;
        task.on_input(wrong, now);
        assert_eq!(task.trials()[0].accuracy, 0);
        assert!(task.trials()[0].reaction_time_ms.is_some());
    }

    #[test]
    fn timeout_scores_miss_with_no_response() {
        let mut rng = seeded_rng(3);
        let mut task = FlankerTask::new(small(), &mut rng);
        let mut now = 0;
        into_main(&mut task, &mut now);

        fire_next(&mut task, &mut now); // stimulus on
        fire_next(&mut task, &mut now); // window closes silently

        let trial = &task.trials()[0];
        assert_eq!(trial.accuracy, 0);
        assert_eq!(trial.response, None);
        assert_eq!(trial.reaction_time_ms, None);
    }

    #[test]
    fn practice_trials_are_never_recorded() {
        let mut rng = seeded_rng(11);
        let mut task = FlankerTask::new(small(), &mut rng);
        let mut now = 0;
        task.on_input(Input::Continue, now);
        assert!(task.phase().is_practice());

        fire_next(&mut task, &mut now);
        let input = task.expected_input().unwrap();
        now += 300;
        task.on_input(input, now);
        assert!(task.trials().is_empty());
    }

    #[test]
    fn run_completes_after_all_main_trials() {
        let mut rng = seeded_rng(5);
        let mut task = FlankerTask::new(small(), &mut rng);
        let mut now = 0;
        into_main(&mut task, &mut now);

        while !task.is_complete() {
            fire_next(&mut task, &mut now);
            if let Some(input) = task.expected_input() {
                now += 275;
                task.on_input(input, now);
            }
        }
        assert_eq!(task.trials().len(), 4);
        let numbers: Vec<u32> = task.trials().iter().map(|t| t.trial_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
        assert!(task.trials().iter().all(|t| t.accuracy == 1));
    }

    #[test]
    fn abort_cancels_pending_deadline_without_recording() {
        let mut rng = seeded_rng(7);
        let mut task = FlankerTask::new(small(), &mut rng);
        let mut now = 0;
        into_main(&mut task, &mut now);
        fire_next(&mut task, &mut now); // stimulus on, window pending

        task.abort();
        assert_eq!(task.next_deadline(), None);
        assert!(task.trials().is_empty());
    }

    #[test]
    fn seeded_sequences_are_reproducible() {
        let a = FlankerTask::new(small(), &mut seeded_rng(42)).sequence;
        let b = FlankerTask::new(small(), &mut seeded_rng(42)).sequence;
        assert_eq!(a, b);
    }
}
