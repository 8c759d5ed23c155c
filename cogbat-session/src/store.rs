//! Session persistence.
//!
//! The whole session lives as one JSON blob under a well-known key. Every
//! mutation runs the same read-modify-persist cycle; an absent or malformed
//! blob on the read path degrades to an empty session, never to an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cogbat_core::{ParticipantInfo, SessionData, TestResult, TrialRecord};
use tracing::{debug, warn};

/// Well-known storage key; the file backend appends `.json`.
pub const STORAGE_KEY: &str = "cognitiveTestData";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to persist session: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable blob storage for exactly one session.
pub trait StorageBackend {
    /// Current blob, or `None` when nothing has been stored.
    fn load(&self) -> Option<String>;
    fn save(&mut self, blob: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Blob file inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn save(&mut self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory backend for tests and headless simulation.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    blob: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Option<String> {
        self.blob.clone()
    }

    fn save(&mut self, blob: &str) -> Result<(), StoreError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.blob = None;
        Ok(())
    }
}

/// The one mutable shared resource of the battery. At most one test runs at
/// a time, so last-writer-wins persistence is sufficient.
pub struct SessionStore<B: StorageBackend> {
    backend: B,
    data: SessionData,
}

impl<B: StorageBackend> SessionStore<B> {
    /// Open the store, reconstructing the session from the backend.
    pub fn open(backend: B) -> Self {
        let data = match backend.load() {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(data) => data,
                Err(e) => {
                    warn!(error = %e, "stored session blob is malformed, starting empty");
                    SessionData::default()
                }
            },
            None => SessionData::default(),
        };
        Self { backend, data }
    }

    /// Replace any prior result for the test and append its raw trials to
    /// the running log.
    pub fn record_result(
        &mut self,
        result: TestResult,
        raw_trials: Vec<TrialRecord>,
    ) -> Result<(), StoreError> {
        debug!(test = %result.test, trials = raw_trials.len(), "recording test result");
        self.data.tests.insert(result.test, result);
        self.data.trial_data.extend(raw_trials);
        self.persist()
    }

    pub fn set_participant(&mut self, info: ParticipantInfo) -> Result<(), StoreError> {
        self.data.participant_info = info;
        self.persist()
    }

    /// Snapshot of the current session.
    pub fn get_all(&self) -> SessionData {
        self.data.clone()
    }

    /// Reset to an empty session and wipe the backend.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.data = SessionData::default();
        self.backend.clear()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&self.data)?;
        self.backend.save(&blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogbat_core::TestKind;

    fn result(test: TestKind, accuracy: u32) -> TestResult {
        TestResult {
            test,
            completed: true,
            score: accuracy,
            accuracy,
            mean_rt_ms: 400,
            errors: 0,
            total_trials: 10,
            span: None,
        }
    }

    fn trial(test: TestKind, n: u32) -> TrialRecord {
        TrialRecord::new(test, n, "stim", Some("resp".into()), Some(350), true)
    }

    #[test]
    fn record_then_get_all_round_trips() {
        let mut store = SessionStore::open(MemoryBackend::new());
        let first = vec![trial(TestKind::Flanker, 1), trial(TestKind::Flanker, 2)];
        store
            .record_result(result(TestKind::Flanker, 90), first.clone())
            .unwrap();
        let second = vec![trial(TestKind::Reaction, 1)];
        store
            .record_result(result(TestKind::Reaction, 100), second.clone())
            .unwrap();

        let session = store.get_all();
        assert_eq!(session.tests[&TestKind::Flanker], result(TestKind::Flanker, 90));
        let mut expected = first;
        expected.extend(second);
        assert_eq!(session.trial_data, expected);
    }

    #[test]
    fn repeat_run_replaces_result_but_appends_trials() {
        let mut store = SessionStore::open(MemoryBackend::new());
        store
            .record_result(result(TestKind::Corsi, 50), vec![trial(TestKind::Corsi, 1)])
            .unwrap();
        store
            .record_result(result(TestKind::Corsi, 75), vec![trial(TestKind::Corsi, 1)])
            .unwrap();

        let session = store.get_all();
        assert_eq!(session.tests.len(), 1);
        assert_eq!(session.tests[&TestKind::Corsi].accuracy, 75);
        assert_eq!(session.trial_data.len(), 2);
    }

    #[test]
    fn malformed_blob_degrades_to_empty() {
        let mut backend = MemoryBackend::new();
        backend.save("{not json").unwrap();
        let store = SessionStore::open(backend);
        assert_eq!(store.get_all(), SessionData::default());
    }

    #[test]
    fn clear_resets_and_wipes_backend() {
        let mut store = SessionStore::open(MemoryBackend::new());
        store
            .record_result(result(TestKind::Trails, 100), vec![trial(TestKind::Trails, 1)])
            .unwrap();
        store.clear().unwrap();
        assert_eq!(store.get_all(), SessionData::default());

        // Nothing left to reconstruct from.
        let reopened = SessionStore::open(MemoryBackend::new());
        assert_eq!(reopened.get_all(), SessionData::default());
    }

    #[test]
    fn file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SessionStore::open(FileBackend::new(dir.path()));
        store.set_participant(ParticipantInfo {
            participant_id: Some("P01".into()),
            age: Some(31),
            gender: None,
        })
        .unwrap();
        store
            .record_result(result(TestKind::GoNogo, 88), vec![trial(TestKind::GoNogo, 1)])
            .unwrap();

        let reopened = SessionStore::open(FileBackend::new(dir.path()));
        let session = reopened.get_all();
        assert_eq!(session.participant_info.participant_id.as_deref(), Some("P01"));
        assert_eq!(session.tests[&TestKind::GoNogo].accuracy, 88);
        assert_eq!(session.trial_data.len(), 1);
    }

    #[test]
    fn file_backend_writes_under_the_well_known_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(
            backend.path(),
            dir.path().join("cognitiveTestData.json")
        );
    }

    #[test]
    fn file_backend_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        std::fs::write(backend.path(), "garbage").unwrap();
        let store = SessionStore::open(backend);
        assert_eq!(store.get_all(), SessionData::default());
    }
}
