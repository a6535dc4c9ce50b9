//! Grid command handler

use crate::cli::{log, LogLevel};
use crate::config::GridArgs;
use crate::error::Result;
use crate::grid::{run_grid, GridSpec, RunContext};

pub fn run_grid_command(args: GridArgs, log_level: LogLevel) -> Result<()> {
    let spec = GridSpec {
        datasets: args.data,
        models: args.models,
        epochs: args.epochs,
        sample: args.sample,
        output_root: args.output_root,
    };
    let ctx = RunContext { seed: args.seed, device: args.device, log_level };

    let reports = run_grid(&spec, &ctx)?;
    for report in &reports {
        log(
            log_level,
            LogLevel::Normal,
            &format!(
                "{} (best score {:.4}{})",
                report.results_path.display(),
                report.fit.best_score.unwrap_or(f32::NAN),
                if report.fit.stopped_early { ", stopped early" } else { "" },
            ),
        );
    }
    Ok(())
}
