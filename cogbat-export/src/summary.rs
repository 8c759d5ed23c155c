use std::fmt::Write as _;
use std::io::Write;

use cogbat_core::SessionData;

use crate::ExportError;

/// Plain-text report: participant block, then one block per completed test.
pub fn summary_report(session: &SessionData) -> String {
    let mut out = String::new();
    out.push_str("Cognitive Testing Platform - Summary Report\n");
    out.push_str("=====================================\n\n");

    let info = &session.participant_info;
    if let Some(id) = &info.participant_id {
        let _ = writeln!(out, "Participant ID: {id}");
    }
    if let Some(age) = info.age {
        let _ = writeln!(out, "Age: {age}");
    }
    if let Some(gender) = &info.gender {
        let _ = writeln!(out, "Gender: {gender}");
    }

    out.push_str("\nTest Results:\n");
    out.push_str("-------------\n");

    for (kind, result) in &session.tests {
        if !result.completed {
            continue;
        }
        let _ = writeln!(out, "\n{}:", kind.token().to_uppercase());
        let _ = writeln!(out, "  Mean RT: {}ms", result.mean_rt_ms);
        let _ = writeln!(out, "  Accuracy: {}%", result.accuracy);
        let _ = writeln!(out, "  Errors: {}/{}", result.errors, result.total_trials);
        if let Some(span) = result.span {
            let _ = writeln!(out, "  Span: {span}");
        }
    }
    out
}

pub fn write_summary<W: Write>(mut writer: W, session: &SessionData) -> Result<(), ExportError> {
    writer.write_all(summary_report(session).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogbat_core::{ParticipantInfo, TestKind, TestResult};

    fn result(test: TestKind, completed: bool) -> TestResult {
        TestResult {
            test,
            completed,
            score: 85,
            accuracy: 85,
            mean_rt_ms: 512,
            errors: 6,
            total_trials: 40,
            span: (test == TestKind::Corsi).then_some(5),
        }
    }

    #[test]
    fn completed_tests_get_blocks() {
        let mut session = SessionData::default();
        session.participant_info = ParticipantInfo {
            participant_id: Some("P01".into()),
            age: Some(40),
            gender: None,
        };
        session
            .tests
            .insert(TestKind::Flanker, result(TestKind::Flanker, true));
        session
            .tests
            .insert(TestKind::Corsi, result(TestKind::Corsi, true));

        let report = summary_report(&session);
        assert!(report.starts_with("Cognitive Testing Platform - Summary Report\n"));
        assert!(report.contains("Participant ID: P01\n"));
        assert!(report.contains("Age: 40\n"));
        assert!(!report.contains("Gender:"));
        assert!(report.contains("\nFLANKER:\n  Mean RT: 512ms\n  Accuracy: 85%\n  Errors: 6/40\n"));
        assert!(report.contains("\nCORSI:\n"));
        assert!(report.contains("  Span: 5\n"));
    }

    #[test]
    fn incomplete_tests_are_skipped() {
        let mut session = SessionData::default();
        session
            .tests
            .insert(TestKind::Trails, result(TestKind::Trails, false));
        let report = summary_report(&session);
        assert!(!report.contains("TRAILS"));
    }
}
