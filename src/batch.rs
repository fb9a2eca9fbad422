use crate::discover::{discover_logs, output_path, prepare_output_dir};
use crate::plot::PlotConfig;
use crate::GameLog;
use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Rendered(PathBuf),
    /// the filter names no participant of this game
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Parses one log and renders its chart into the output directory.
pub fn process_file(log_file: &Path, config: &PlotConfig) -> Result<FileStatus> {
    let game = GameLog::from_csv(log_file, config.policy)?;
    debug!("{}: {}", log_file.display(), game);

    let highlight = match &config.filter {
        Some(name) => match game.color_of(name) {
            Some(color) => Some(color),
            None => {
                debug!("{} does not play in {}", name, log_file.display());
                return Ok(FileStatus::Skipped);
            }
        },
        None => None,
    };

    let fout = output_path(&config.output, log_file);
    let title = log_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    game.plot_timing(&fout, &title, highlight, &config.style)
        .map_err(|e| anyhow!("could not plot {}: {}", fout.display(), e))?;
    Ok(FileStatus::Rendered(fout))
}

/// Resets the output directory, then processes every discovered log on its own;
/// a failing file is logged and the batch goes on.
pub fn run(config: &PlotConfig) -> Result<Summary> {
    prepare_output_dir(&config.output)
        .with_context(|| format!("could not prepare {}", config.output.display()))?;
    let logs = discover_logs(&config.directory, &config.pattern)
        .with_context(|| format!("invalid pattern {}", config.pattern))?;
    info!(
        "found {} game logs in {}",
        logs.len(),
        config.directory.display()
    );

    let mut summary = Summary::default();
    for log_file in logs.iter() {
        match process_file(log_file, config) {
            Ok(FileStatus::Rendered(fout)) => {
                info!("plotted {} to {}", log_file.display(), fout.display());
                summary.rendered += 1;
            }
            Ok(FileStatus::Skipped) => summary.skipped += 1,
            Err(e) => {
                warn!("skipping {}: {:#}", log_file.display(), e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
