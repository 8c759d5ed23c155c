use cogbat_core::{TaskPhase, TestKind, TrialRecord};

use crate::event::Input;

/// One test's trial runner.
///
/// Runners are event-driven: they mutate only when delivered participant
/// input or a timer event, each stamped with the current monotonic time in
/// milliseconds. A runner owns at most one pending deadline, published via
/// `next_deadline`; the driver advances its clock there and calls
/// `on_timer`. Irrelevant inputs and spurious timer events are ignored.
pub trait Task: std::fmt::Debug {
    fn kind(&self) -> TestKind;

    fn phase(&self) -> TaskPhase;

    fn on_input(&mut self, input: Input, now_ms: u64);

    fn on_timer(&mut self, now_ms: u64);

    /// Deadline of the pending scheduled callback, if any.
    fn next_deadline(&self) -> Option<u64>;

    /// The input a perfectly accurate participant would give right now.
    /// `None` when no input qualifies (timer-driven stretches, or a no-go
    /// stimulus where withholding is the correct behavior).
    fn expected_input(&self) -> Option<Input>;

    /// Scored trials recorded so far. Practice trials never appear here.
    fn trials(&self) -> &[TrialRecord];

    /// Adaptive span reached; memory test only.
    fn span(&self) -> Option<u32> {
        None
    }

    fn is_complete(&self) -> bool {
        self.phase().is_complete()
    }

    /// Abandon the run: cancels any pending deadline without recording a
    /// trial or advancing a counter.
    fn abort(&mut self);
}
