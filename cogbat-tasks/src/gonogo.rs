//! Go/no-go response inhibition task.
//!
//! Respond to GO, withhold on NO-GO. The scored sequence is composition
//! controlled (a fixed share of no-go trials) and shuffled; practice draws
//! uniformly at random instead. An omitted response resolves at the end of
//! the trial window: correct for no-go, an error for go.

use cogbat_core::{TaskPhase, TestKind, TrialRecord};
use cogbat_timing::TimerSlot;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::GoNogoConfig;
use crate::event::Input;
use crate::runner::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StimulusClass {
    Go,
    NoGo,
}

impl StimulusClass {
    pub fn display(self) -> &'static str {
        match self {
            StimulusClass::Go => "GO",
            StimulusClass::NoGo => "NO-GO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Iti,
    /// Stimulus visible; the only stretch where a press is accepted.
    Stimulus {
        onset: u64,
        class: StimulusClass,
        responded: bool,
    },
    /// Stimulus hidden, trial not yet resolved.
    Tail { class: StimulusClass, responded: bool },
}

#[derive(Debug)]
pub struct GoNogoTask<R: Rng> {
    cfg: GoNogoConfig,
    rng: R,
    phase: TaskPhase,
    state: State,
    timer: TimerSlot,
    /// Composition-controlled scored order, shuffled once up front.
    sequence: Vec<StimulusClass>,
    trial_index: u32,
    trials: Vec<TrialRecord>,
}

impl<R: Rng> GoNogoTask<R> {
    pub fn new(cfg: GoNogoConfig, mut rng: R) -> Self {
        let nogo_count = (f64::from(cfg.main_trials) * cfg.nogo_ratio).floor() as u32;
        let mut sequence = Vec::with_capacity(cfg.main_trials as usize);
        sequence.extend(std::iter::repeat_n(
            StimulusClass::Go,
            (cfg.main_trials - nogo_count) as usize,
        ));
        sequence.extend(std::iter::repeat_n(StimulusClass::NoGo, nogo_count as usize));
        sequence.shuffle(&mut rng);
        Self {
            cfg,
            rng,
            phase: TaskPhase::default(),
            state: State::Idle,
            timer: TimerSlot::new(),
            sequence,
            trial_index: 0,
            trials: Vec::new(),
        }
    }

    /// Stimulus currently on screen, if any.
    pub fn current_stimulus(&self) -> Option<StimulusClass> {
        match self.state {
            State::Stimulus { class, .. } => Some(class),
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

    fn enter_run(&mut self, phase: TaskPhase, now_ms: u64) {
        self.phase = phase;
        self.trial_index = 0;
        self.state = State::Iti;
        self.timer.arm(now_ms, self.cfg.inter_trial_ms);
    }

    fn present(&mut self, now_ms: u64) {
        let class = if self.phase.is_practice() {
            // Uniform draw, independent of the scored composition.
            if self.rng.random_range(0..2) == 0 {
                StimulusClass::Go
            } else {
                StimulusClass::NoGo
            }
        } else {
            self.sequence[self.trial_index as usize]
        };
        debug!(trial = self.trial_index + 1, stimulus = class.display(), "gonogo stimulus on");
        self.state = State::Stimulus {
            onset: now_ms,
            class,
            responded: false,
        };
        self.timer.arm(now_ms, self.cfg.stimulus_ms);
    }

    fn record(&mut self, class: StimulusClass, response: &str, rt: Option<u64>, pressed: bool) {
        if !self.phase.is_main() {
            return;
        }
        let correct = if pressed {
            class == StimulusClass::Go
        } else {
            class == StimulusClass::NoGo
        };
        self.trials.push(TrialRecord::new(
            TestKind::GoNogo,
            self.trials.len() as u32 + 1,
            class.display(),
            Some(response.to_string()),
            rt,
            correct,
        ));
    }

    fn resolve(&mut self, now_ms: u64, class: StimulusClass, responded: bool) {
        if !responded {
            self.record(class, "no_response", None, false);
        }
        self.trial_index += 1;
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

impl<R: Rng + std::fmt::Debug> Task for GoNogoTask<R> {
    fn kind(&self) -> TestKind {
        TestKind::GoNogo
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
            (TaskPhase::Practice | TaskPhase::Main, Input::Press) => {
                if let State::Stimulus {
                    onset,
                    class,
                    responded: false,
                } = self.state
                {
                    self.record(class, "spacebar", Some(now_ms - onset), true);
                    self.state = State::Stimulus {
                        onset,
                        class,
                        responded: true,
                    };
                }
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
            State::Stimulus {
                class, responded, ..
            } => {
                self.state = State::Tail { class, responded };
                self.timer.arm(now_ms, self.cfg.response_tail_ms);
            }
            State::Tail { class, responded } => self.resolve(now_ms, class, responded),
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
        match self.state {
            State::Stimulus {
                class: StimulusClass::Go,
                responded: false,
                ..
            } => Some(Input::Press),
            // Withholding is the correct behavior for no-go.
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
