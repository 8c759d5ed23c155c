//! Token-to-runner mapping, the navigation seam of the battery.
//!
//! Unknown tokens surface as [`UnknownTest`] instead of a crash; callers
//! render that as a "test not found" state.

use cogbat_core::{TestKind, UnknownTest};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{CorsiConfig, FlankerConfig, GoNogoConfig, ReactionConfig, TrailsConfig};
use crate::corsi::CorsiTask;
use crate::flanker::FlankerTask;
use crate::gonogo::GoNogoTask;
use crate::reaction::ReactionTask;
use crate::runner::Task;
use crate::trails::TrailsTask;

/// Build the runner for a test, with default parameters and a seeded
/// stimulus stream.
pub fn create(kind: TestKind, seed: u64) -> Box<dyn Task> {
    let mut rng = StdRng::seed_from_u64(seed);
    match kind {
        TestKind::Flanker => Box::new(FlankerTask::new(FlankerConfig::default(), &mut rng)),
        TestKind::Reaction => Box::new(ReactionTask::new(ReactionConfig::default(), rng)),
        TestKind::Trails => Box::new(TrailsTask::new(TrailsConfig::default(), &mut rng)),
        TestKind::Corsi => Box::new(CorsiTask::new(CorsiConfig::default(), rng)),
        TestKind::GoNogo => Box::new(GoNogoTask::new(GoNogoConfig::default(), rng)),
    }
}

/// Resolve a navigation token, then build its runner.
pub fn create_for_token(token: &str, seed: u64) -> Result<Box<dyn Task>, UnknownTest> {
    Ok(create(token.parse()?, seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_builds_its_runner() {
        for kind in TestKind::ALL {
            let task = create(kind, 1);
            assert_eq!(task.kind(), kind);
            assert!(!task.is_complete());
            assert!(task.trials().is_empty());
        }
    }

    #[test]
    fn unknown_token_surfaces_not_found() {
        let err = create_for_token("nback", 1).unwrap_err();
        assert_eq!(err.to_string(), "test not found: nback");
    }
}
