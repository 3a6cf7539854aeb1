use anyhow::{Context, Result};

use exam_schedule::app::{self, RunStatus};
use exam_schedule::{logging, Settings};

fn main() -> Result<()> {
    logging::init(logging::DEFAULT_FILTER)?;

    let settings = Settings::from_env().context("invalid configuration")?;

    if let RunStatus::Completed(outcome) = app::run(&settings)? {
        print!("{}", outcome.report);
    }
    Ok(())
}
