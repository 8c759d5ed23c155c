//! Simple reaction time task.
//!
//! A randomized wait precedes each go-signal. A press during the wait is a
//! false start: it cancels the pending onset, is recorded as a failed trial,
//! and restarts the wait without advancing the valid-trial counter.

use cogbat_core::{TaskPhase, TestKind, TrialRecord};
use cogbat_timing::TimerSlot;
use rand::Rng;
use tracing::debug;

use crate::config::ReactionConfig;
use crate::event::Input;
use crate::runner::Task;

const STIMULUS: &str = "green_circle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Go-signal scheduled but not yet shown.
    Waiting,
    /// Go-signal on screen; no deadline, the signal waits for the press.
    Go { onset: u64 },
    FalseStartPause,
    PostResponsePause,
}

#[derive(Debug)]
pub struct ReactionTask<R: Rng> {
    cfg: ReactionConfig,
    rng: R,
    phase: TaskPhase,
    state: State,
    timer: TimerSlot,
    valid_trials: u32,
    trials: Vec<TrialRecord>,
}

impl<R: Rng> ReactionTask<R> {
    pub fn new(cfg: ReactionConfig, rng: R) -> Self {
        Self {
            cfg,
            rng,
            phase: TaskPhase::default(),
            state: State::Idle,
            timer: TimerSlot::new(),
            valid_trials: 0,
            trials: Vec::new(),
        }
    }

    /// Valid responses registered so far; false starts do not count.
    pub fn valid_trials(&self) -> u32 {
        self.valid_trials
    }

    fn start_wait(&mut self, now_ms: u64) {
        let (lo, hi) = self.cfg.wait_range_ms;
        let delay = self.rng.random_range(lo..=hi);
        self.state = State::Waiting;
        self.timer.arm(now_ms, delay);
    }

    fn record(&mut self, response: &str, rt: Option<u64>, correct: bool) {
        self.trials.push(TrialRecord::new(
            TestKind::Reaction,
            self.trials.len() as u32 + 1,
            STIMULUS,
            Some(response.to_string()),
            rt,
            correct,
        ));
    }
}

impl<R: Rng + std::fmt::Debug> Task for ReactionTask<R> {
    fn kind(&self) -> TestKind {
        TestKind::Reaction
    }

    fn phase(&self) -> TaskPhase {
        self.phase
    }

    fn on_input(&mut self, input: Input, now_ms: u64) {
        match (self.phase, input) {
            (TaskPhase::Instructions, Input::Continue) => {
                self.phase = TaskPhase::Main;
                self.start_wait(now_ms);
            }
            (TaskPhase::Main, Input::Press) => match self.state {
                State::Waiting => {
                    // Too early: the pending onset must never fire.
                    self.timer.cancel();
                    debug!(trial = self.trials.len() + 1, "false start");
                    self.record("false_start", None, false);
                    self.state = State::FalseStartPause;
                    self.timer.arm(now_ms, self.cfg.false_start_pause_ms);
                }
                State::Go { onset } => {
                    let rt = now_ms - onset;
                    debug!(trial = self.trials.len() + 1, rt_ms = rt, "response");
                    self.record("spacebar", Some(rt), true);
                    self.valid_trials += 1;
                    if self.valid_trials >= self.cfg.valid_trials {
                        self.phase = TaskPhase::Complete;
                        self.state = State::Idle;
                    } else {
                        self.state = State::PostResponsePause;
                        self.timer.arm(now_ms, self.cfg.post_response_pause_ms);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn on_timer(&mut self, now_ms: u64) {
        if !self.timer.fire(now_ms) {
            return;
        }
        match self.state {
            State::Waiting => {
                self.state = State::Go { onset: now_ms };
            }
            State::FalseStartPause | State::PostResponsePause => self.start_wait(now_ms),
            State::Go { .. } | State::Idle => {}
        }
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    fn expected_input(&self) -> Option<Input> {
        match (self.phase, self.state) {
            (TaskPhase::Instructions, _) => Some(Input::Continue),
            (TaskPhase::Main, State::Go { .. }) => Some(Input::Press),
            _ => None,
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
