use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::runner::Task;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Advance the virtual clock to the pending deadline and deliver the timer
/// event.
pub fn fire_next<T: Task + ?Sized>(task: &mut T, now: &mut u64) {
    let deadline = task.next_deadline().expect("runner has a pending deadline");
    assert!(deadline >= *now);
    *now = deadline;
    task.on_timer(*now);
}
