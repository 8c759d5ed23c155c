//! Corsi block-tapping task.
//!
//! A sequence of unique blocks lights up, the participant reproduces it by
//! clicking. Both attempts at a length must be exact for the span to grow;
//! otherwise the run ends. Replaying the sequence during recall is allowed
//! and never scored.

use cogbat_core::{TaskPhase, TestKind, TrialRecord};
use cogbat_timing::TimerSlot;
use rand::Rng;
use tracing::debug;

use crate::config::CorsiConfig;
use crate::event::Input;
use crate::runner::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Blank pause before the first block lights up.
    LeadIn,
    /// Block `sequence[step]` is lit.
    ShowOn { step: usize },
    /// Gap after block `sequence[step]`.
    ShowOff { step: usize },
    Recall,
    ScorePause,
}

#[derive(Debug)]
pub struct CorsiTask<R: Rng> {
    cfg: CorsiConfig,
    rng: R,
    phase: TaskPhase,
    state: State,
    timer: TimerSlot,
    length: u32,
    trial_at_length: u32,
    correct_at_length: u32,
    /// Longest length with at least one exact reproduction.
    best_span: u32,
    sequence: Vec<u8>,
    user: Vec<u8>,
    trials: Vec<TrialRecord>,
}

impl<R: Rng> CorsiTask<R> {
    pub fn new(cfg: CorsiConfig, rng: R) -> Self {
        let length = cfg.start_length;
        Self {
            cfg,
            rng,
            phase: TaskPhase::default(),
            state: State::Idle,
            timer: TimerSlot::new(),
            length,
            trial_at_length: 0,
            correct_at_length: 0,
            best_span: 0,
            sequence: Vec::new(),
            user: Vec::new(),
            trials: Vec::new(),
        }
    }

    pub fn sequence_length(&self) -> u32 {
        self.length
    }

    /// Block currently lit during playback.
    pub fn active_block(&self) -> Option<u8> {
        match self.state {
            State::ShowOn { step } => self.sequence.get(step).copied(),
            _ => None,
        }
    }

    /// True while playback runs and clicks are ignored.
    pub fn showing_sequence(&self) -> bool {
        matches!(
            self.state,
            State::LeadIn | State::ShowOn { .. } | State::ShowOff { .. }
        )
    }

    fn generate_sequence(&mut self) -> Vec<u8> {
        let mut sequence = Vec::with_capacity(self.length as usize);
        while sequence.len() < self.length as usize {
            let block = self.rng.random_range(0..self.cfg.blocks);
            if !sequence.contains(&block) {
                sequence.push(block);
            }
        }
        sequence
    }

    fn start_trial(&mut self, now_ms: u64, extra_delay_ms: u64) {
        self.sequence = self.generate_sequence();
        self.user.clear();
        debug!(length = self.length, attempt = self.trial_at_length + 1, "corsi trial");
        self.state = State::LeadIn;
        self.timer.arm(now_ms, extra_delay_ms + self.cfg.lead_in_ms);
    }

    fn replay(&mut self, now_ms: u64) {
        // Same playback path; recall progress so far is kept, nothing is
        // recorded.
        self.state = State::LeadIn;
        self.timer.arm(now_ms, self.cfg.lead_in_ms);
    }

    fn score(&mut self, now_ms: u64) {
        let correct = self.user == self.sequence;
        let joined = |v: &[u8]| {
            v.iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join("-")
        };
        self.trials.push(TrialRecord::new(
            TestKind::Corsi,
            self.trials.len() as u32 + 1,
            joined(&self.sequence),
            Some(joined(&self.user)),
            None,
            correct,
        ));
        if correct {
            self.correct_at_length += 1;
            self.best_span = self.best_span.max(self.length);
        }
        self.trial_at_length += 1;
        self.state = State::ScorePause;
        self.timer.arm(now_ms, self.cfg.score_pause_ms);
    }

    /// Span gate, evaluated once both attempts at the current length are in:
    /// advance only when every attempt was exact, end otherwise.
    fn settle_length(&mut self, now_ms: u64) {
        if self.trial_at_length < self.cfg.trials_per_length {
            self.start_trial(now_ms, self.cfg.between_trials_ms);
            return;
        }
        if self.correct_at_length >= self.cfg.trials_per_length && self.length < self.cfg.max_length
        {
            self.length += 1;
            self.trial_at_length = 0;
            self.correct_at_length = 0;
            self.start_trial(now_ms, self.cfg.between_trials_ms);
        } else {
            self.phase = TaskPhase::Complete;
            self.state = State::Idle;
        }
    }
}

impl<R: Rng + std::fmt::Debug> Task for CorsiTask<R> {
    fn kind(&self) -> TestKind {
        TestKind::Corsi
    }

    fn phase(&self) -> TaskPhase {
        self.phase
    }

    fn on_input(&mut self, input: Input, now_ms: u64) {
        match (self.phase, input) {
            (TaskPhase::Instructions, Input::Continue) => {
                self.phase = TaskPhase::Main;
                self.start_trial(now_ms, 0);
            }
            (TaskPhase::Main, Input::Block(block)) if self.state == State::Recall => {
                if block >= self.cfg.blocks {
                    return;
                }
                self.user.push(block);
                if self.user.len() == self.sequence.len() {
                    self.score(now_ms);
                }
            }
            (TaskPhase::Main, Input::Replay) if self.state == State::Recall => {
                self.replay(now_ms);
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, now_ms: u64) {
        if !self.timer.fire(now_ms) {
            return;
        }
        match self.state {
            State::LeadIn => {
                self.state = State::ShowOn { step: 0 };
                self.timer.arm(now_ms, self.cfg.block_on_ms);
            }
            State::ShowOn { step } => {
                self.state = State::ShowOff { step };
                self.timer.arm(now_ms, self.cfg.block_off_ms);
            }
            State::ShowOff { step } => {
                if step + 1 < self.sequence.len() {
                    self.state = State::ShowOn { step: step + 1 };
                    self.timer.arm(now_ms, self.cfg.block_on_ms);
                } else {
                    self.state = State::Recall;
                }
            }
            State::ScorePause => self.settle_length(now_ms),
            State::Recall | State::Idle => {}
        }
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    fn expected_input(&self) -> Option<Input> {
        match (self.phase, self.state) {
            (TaskPhase::Instructions, _) => Some(Input::Continue),
            (TaskPhase::Main, State::Recall) => self
                .sequence
                .get(self.user.len())
                .copied()
                .map(Input::Block),
            _ => None,
        }
    }

    fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    fn span(&self) -> Option<u32> {
        Some(self.best_span)
    }

    fn abort(&mut self) {
        self.timer.cancel();
        self.state = State::Idle;
    }
}
