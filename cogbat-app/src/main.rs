//! Headless battery runner.
//!
//! Runs the requested tests with a simulated participant, persists the
//! session blob, and writes the CSV and summary exports next to it.

mod sim;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use cogbat_core::{ParticipantInfo, TestKind};
use cogbat_export::{write_csv, write_summary};
use cogbat_session::{FileBackend, SessionStore, reduce};
use cogbat_tasks::registry;
use cogbat_timing::ManualClock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::sim::Responder;

#[derive(Parser, Debug)]
#[command(name = "cogbat", about = "Cognitive test battery, simulated headlessly")]
struct Args {
    /// Tests to run, in order. Defaults to the whole battery.
    tests: Vec<String>,

    /// Seed for stimulus streams and the simulated participant.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory for the session blob and export artifacts.
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Probability of a wrong or omitted answer per prompt.
    #[arg(long, default_value_t = 0.1)]
    error_rate: f64,

    /// Probability of an unprompted press per idle stretch.
    #[arg(long, default_value_t = 0.05)]
    impulse_rate: f64,

    #[arg(long)]
    participant_id: Option<String>,

    #[arg(long)]
    age: Option<u32>,

    #[arg(long)]
    gender: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let kinds: Vec<TestKind> = if args.tests.is_empty() {
        TestKind::ALL.to_vec()
    } else {
        let mut kinds = Vec::new();
        for token in &args.tests {
            match token.parse() {
                Ok(kind) => kinds.push(kind),
                Err(e) => warn!(%token, "{e}, skipping"),
            }
        }
        kinds
    };
    if kinds.is_empty() {
        bail!("no runnable tests requested");
    }

    let mut store = SessionStore::open(FileBackend::new(&args.out_dir));
    store.set_participant(ParticipantInfo {
        participant_id: args.participant_id.clone(),
        age: args.age,
        gender: args.gender.clone(),
    })?;

    for (i, kind) in kinds.iter().copied().enumerate() {
        info!(test = %kind, "starting");
        let mut task = registry::create(kind, args.seed.wrapping_add(i as u64));
        let mut responder = Responder::new(
            StdRng::seed_from_u64(args.seed ^ 0x5eed ^ i as u64),
            args.error_rate,
            args.impulse_rate,
        );
        let mut clock = ManualClock::new();
        sim::drive(task.as_mut(), &mut responder, &mut clock)
            .with_context(|| format!("{kind} run did not complete"))?;

        let result = reduce(task.trials()).into_result(kind, task.span());
        info!(
            test = %kind,
            accuracy = result.accuracy,
            mean_rt_ms = result.mean_rt_ms,
            errors = result.errors,
            "finished"
        );
        store.record_result(result, task.trials().to_vec())?;
    }

    let session = store.get_all();

    let csv_path = args.out_dir.join("cognitive_test_data.csv");
    let csv_file = File::create(&csv_path)
        .with_context(|| format!("failed to create {}", csv_path.display()))?;
    write_csv(csv_file, &session)?;
    info!(path = %csv_path.display(), "wrote trial data");

    let summary_path = args.out_dir.join("cognitive_test_summary.txt");
    let summary_file = File::create(&summary_path)
        .with_context(|| format!("failed to create {}", summary_path.display()))?;
    write_summary(summary_file, &session)?;
    info!(path = %summary_path.display(), "wrote summary report");

    Ok(())
}
