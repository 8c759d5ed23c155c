pub mod phase;
pub mod session;
pub mod task;
pub mod trial;

pub use phase::TaskPhase;
pub use session::{ParticipantInfo, SessionData, TestResult};
pub use task::{TestKind, UnknownTest};
pub use trial::TrialRecord;
