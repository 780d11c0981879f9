//! `civdl fetch <file>` – download every model linked from a markdown file.

use anyhow::Result;
use civdl_core::config::CivdlConfig;
use civdl_core::links;
use civdl_core::pipeline::{Pipeline, RunSummary};
use std::path::PathBuf;

/// Exit status when at least one link failed (and `--lenient` is off).
pub const EXIT_LINK_FAILURES: i32 = 2;

#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub file: PathBuf,
    pub path: Option<PathBuf>,
    pub no_preview: bool,
    pub lenient: bool,
}

/// Runs the pipeline and returns the process exit status.
pub fn run_fetch(cfg: &CivdlConfig, args: &FetchArgs) -> Result<i32> {
    let extractor = links::extractor_for(cfg.extract_policy)?;
    let pipeline = Pipeline::from_config(cfg, args.path.clone())
        .with_previews(cfg.download_previews && !args.no_preview);

    let mut out = std::io::stdout().lock();
    let summary = pipeline.run_file(&args.file, extractor.as_ref(), &mut out)?;

    println!(
        "Done: {} downloaded, {} skipped, {} failed.",
        summary.downloaded(),
        summary.skipped(),
        summary.failed()
    );
    Ok(exit_status(&summary, args.lenient))
}

/// 0 when every link was downloaded or skipped (or `lenient`), otherwise 2.
pub fn exit_status(summary: &RunSummary, lenient: bool) -> i32 {
    if summary.failed() > 0 && !lenient {
        EXIT_LINK_FAILURES
    } else {
        0
    }
}
