//! Simulated participant.
//!
//! Drives a runner to completion on a virtual clock: waits out timer-driven
//! stretches by jumping to the pending deadline, answers qualifying prompts
//! after a sampled latency, and injects errors at configurable rates. An
//! "impulse" is a press when nothing qualifies, which surfaces as a false
//! start (reaction) or a commission error (no-go).

use anyhow::bail;
use cogbat_tasks::{Input, Task};
use cogbat_timing::{Clock, ManualClock};
use rand::Rng;

const MAX_STEPS: u32 = 100_000;

pub struct Responder<R: Rng> {
    rng: R,
    error_rate: f64,
    impulse_rate: f64,
    latency_range_ms: (u64, u64),
}

impl<R: Rng> Responder<R> {
    pub fn new(rng: R, error_rate: f64, impulse_rate: f64) -> Self {
        Self {
            rng,
            error_rate,
            impulse_rate,
            latency_range_ms: (250, 600),
        }
    }

    fn latency(&mut self) -> u64 {
        let (lo, hi) = self.latency_range_ms;
        self.rng.random_range(lo..=hi)
    }

    fn errs(&mut self) -> bool {
        self.rng.random_bool(self.error_rate)
    }

    fn impulsive(&mut self) -> bool {
        self.rng.random_bool(self.impulse_rate)
    }

    /// A deliberately wrong answer to the given prompt, or `None` for an
    /// omission.
    fn wrong(&mut self, expected: Input) -> Option<Input> {
        match expected {
            Input::Left => Some(Input::Right),
            Input::Right => Some(Input::Left),
            Input::Press => None,
            Input::Block(b) => Some(Input::Block((b + 1) % 9)),
            Input::Target(t) => Some(Input::Target(if t == 1 { 2 } else { 1 })),
            Input::Continue | Input::Replay => Some(Input::Continue),
        }
    }
}

/// Run one task to completion. Errors out instead of spinning if the runner
/// ever has neither a pending deadline nor a qualifying input.
pub fn drive<R: Rng>(
    task: &mut dyn Task,
    responder: &mut Responder<R>,
    clock: &mut ManualClock,
) -> anyhow::Result<()> {
    for _ in 0..MAX_STEPS {
        if task.is_complete() {
            return Ok(());
        }
        match task.expected_input() {
            Some(Input::Continue) => {
                clock.advance(500);
                task.on_input(Input::Continue, clock.now_ms());
            }
            Some(expected) => {
                let deadline = task.next_deadline();
                clock.advance(responder.latency());
                if let Some(d) = deadline {
                    if clock.now_ms() >= d {
                        // Dawdled past the window; resolve it as a timeout.
                        task.on_timer(clock.now_ms());
                        continue;
                    }
                }
                match if responder.errs() {
                    responder.wrong(expected)
                } else {
                    Some(expected)
                } {
                    Some(input) => task.on_input(input, clock.now_ms()),
                    // Omission: sit out the rest of the window.
                    None => match task.next_deadline() {
                        Some(d) => {
                            clock.set(d);
                            task.on_timer(d);
                        }
                        // Nothing to wait out (reaction go-signal): a lapse
                        // here would stall forever, so answer after all.
                        None => task.on_input(expected, clock.now_ms()),
                    },
                }
            }
            None => match task.next_deadline() {
                Some(d) => {
                    if responder.impulsive() && d > clock.now_ms() + 1 {
                        let press_at = clock.now_ms() + (d - clock.now_ms()) / 2;
                        clock.set(press_at);
                        task.on_input(Input::Press, press_at);
                    } else {
                        clock.set(d);
                        task.on_timer(d);
                    }
                }
                None => bail!("{} runner stalled: no deadline and no qualifying input", task.kind()),
            },
        }
    }
    bail!("{} simulation exceeded {MAX_STEPS} steps", task.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogbat_core::TestKind;
    use cogbat_tasks::registry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run(kind: TestKind, error_rate: f64, impulse_rate: f64) -> Box<dyn Task> {
        let mut task = registry::create(kind, 99);
        let mut responder = Responder::new(StdRng::seed_from_u64(7), error_rate, impulse_rate);
        let mut clock = ManualClock::new();
        drive(task.as_mut(), &mut responder, &mut clock).unwrap();
        task
    }

    #[test]
    fn flawless_battery_completes_every_test() {
        let flanker = run(TestKind::Flanker, 0.0, 0.0);
        assert_eq!(flanker.trials().len(), 80);
        assert!(flanker.trials().iter().all(|t| t.accuracy == 1));

        let reaction = run(TestKind::Reaction, 0.0, 0.0);
        assert_eq!(reaction.trials().len(), 50);

        let trails = run(TestKind::Trails, 0.0, 0.0);
        assert_eq!(trails.trials().len(), 1);
        assert_eq!(trails.trials()[0].accuracy, 1);

        let corsi = run(TestKind::Corsi, 0.0, 0.0);
        assert_eq!(corsi.span(), Some(9));

        let gonogo = run(TestKind::GoNogo, 0.0, 0.0);
        assert_eq!(gonogo.trials().len(), 50);
        assert!(gonogo.trials().iter().all(|t| t.accuracy == 1));
    }

    #[test]
    fn noisy_battery_still_terminates() {
        for kind in TestKind::ALL {
            let task = run(kind, 0.2, 0.1);
            assert!(task.is_complete());
            assert!(!task.trials().is_empty());
        }
    }

    #[test]
    fn impulses_produce_false_starts() {
        let reaction = run(TestKind::Reaction, 0.0, 0.3);
        assert!(
            reaction
                .trials()
                .iter()
                .any(|t| t.response.as_deref() == Some("false_start"))
        );
        // The run still reaches its quota of valid trials.
        let valid = reaction.trials().iter().filter(|t| t.accuracy == 1).count();
        assert_eq!(valid, 50);
    }
}
