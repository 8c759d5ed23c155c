use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five tests of the battery. The serialized form doubles as the
/// navigation token and the `test_type` column in exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Flanker,
    Reaction,
    Trails,
    Corsi,
    GoNogo,
}

impl TestKind {
    pub const ALL: [TestKind; 5] = [
        TestKind::Flanker,
        TestKind::Reaction,
        TestKind::Trails,
        TestKind::Corsi,
        TestKind::GoNogo,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            TestKind::Flanker => "flanker",
            TestKind::Reaction => "reaction",
            TestKind::Trails => "trails",
            TestKind::Corsi => "corsi",
            TestKind::GoNogo => "gonogo",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TestKind::Flanker => "Eriksen Flanker Task",
            TestKind::Reaction => "Simple Reaction Time Task",
            TestKind::Trails => "Trail Making Task",
            TestKind::Corsi => "Corsi Memory Task",
            TestKind::GoNogo => "Go No-Go Task",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Raised when a navigation token does not name any test in the battery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("test not found: {0}")]
pub struct UnknownTest(pub String);

impl FromStr for TestKind {
    type Err = UnknownTest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestKind::ALL
            .into_iter()
            .find(|k| k.token() == s)
            .ok_or_else(|| UnknownTest(s.to_string()))
    }
}
