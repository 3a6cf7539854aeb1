//! One command-line run: settings in, two CSV tables out.

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::io;
use crate::planner::{ExamPlanner, PlanOutcome};
use crate::validation::{audit, validate_config, validate_roster};

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunStatus {
    /// The input table does not exist; nothing was written.
    Skipped,
    /// Both tables were written.
    Completed(PlanOutcome),
}

/// Reads the roster and exam table named by `settings`, plans, and writes
/// the exam and statistics tables.
///
/// A missing input file is not an error: it is logged and the run returns
/// [`RunStatus::Skipped`] without touching either output. Roster, config
/// and audit problems are logged as warnings.
pub fn run(settings: &Settings) -> Result<RunStatus> {
    if !settings.input_csv.exists() {
        warn!(
            path = %settings.input_csv.display(),
            "input file not found; set INPUT_CSV to an exam table"
        );
        return Ok(RunStatus::Skipped);
    }

    let roster = io::load_roster(&settings.roster_toml)?;
    for problem in validate_roster(&roster).err().unwrap_or_default() {
        warn!(kind = ?problem.kind, "{}", problem.message);
    }
    for problem in validate_config(&settings.planner).err().unwrap_or_default() {
        warn!(kind = ?problem.kind, "{}", problem.message);
    }

    let table = io::read_exam_file(&settings.input_csv)?;
    let planner = ExamPlanner::new(settings.planner.clone(), roster);
    let outcome = planner.plan(&table.rows);

    for violation in audit(&outcome.exams, planner.config()) {
        warn!(kind = ?violation.violation_type, "{}", violation.message);
    }

    io::write_exam_file(&settings.output_csv, &outcome.exams, table.headers)?;
    io::write_stats_file(&settings.output_stats_csv, &outcome.report)?;

    info!(
        exams = %settings.output_csv.display(),
        stats = %settings.output_stats_csv.display(),
        "schedule and proctor assignments saved"
    );
    Ok(RunStatus::Completed(outcome))
}
