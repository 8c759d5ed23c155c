/// Phase ladder every runner climbs. Tasks without a practice block go
/// straight from `Instructions` to `Main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPhase {
    #[default]
    Instructions,
    Practice,
    /// Practice trials exhausted; waiting for the participant to confirm
    /// before the scored run starts.
    PracticeDone,
    Main,
    Complete,
}

impl TaskPhase {
    pub fn is_practice(&self) -> bool {
        matches!(self, TaskPhase::Practice)
    }

    pub fn is_main(&self) -> bool {
        matches!(self, TaskPhase::Main)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TaskPhase::Complete)
    }

    /// True while the runner is waiting for an explicit confirmation rather
    /// than a scored response.
    pub fn awaits_confirmation(&self) -> bool {
        matches!(self, TaskPhase::Instructions | TaskPhase::PracticeDone)
    }

    pub fn next(&self, has_practice: bool) -> Option<TaskPhase> {
        Some(match self {
            TaskPhase::Instructions if has_practice => TaskPhase::Practice,
            TaskPhase::Instructions => TaskPhase::Main,
            TaskPhase::Practice => TaskPhase::PracticeDone,
            TaskPhase::PracticeDone => TaskPhase::Main,
            TaskPhase::Main => TaskPhase::Complete,
            TaskPhase::Complete => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_ladder_with_practice() {
        let mut phase = TaskPhase::default();
        let mut seen = vec![phase];
        while let Some(next) = phase.next(true) {
            phase = next;
            seen.push(phase);
        }
        assert_eq!(
            seen,
            [
                TaskPhase::Instructions,
                TaskPhase::Practice,
                TaskPhase::PracticeDone,
                TaskPhase::Main,
                TaskPhase::Complete,
            ]
        );
    }

    #[test]
    fn practice_skipped_when_absent() {
        assert_eq!(TaskPhase::Instructions.next(false), Some(TaskPhase::Main));
    }
}
