//! Text and JSON rendering of a sync run.

use std::io::{self, Write};

use anyhow::Result;
use scriptsync_sync::{pipeline::Progress, SyncMode, SyncReport};

/// Print one progress step of the plain report to stdout.
///
/// ```text
/// latest: /srv/web/docker_utils.sh
/// outdated:-
///   /srv/api/docker_utils.sh
/// ```
pub fn print_progress(event: Progress<'_>) {
    print!("{}", render_progress(event));
}

pub fn render_progress(event: Progress<'_>) -> String {
    match event {
        Progress::Resolved { selection, mode } => {
            let mut out = format!("latest: {}\n", selection.latest.path.display());
            if !selection.outdated.is_empty() {
                out.push_str(match mode {
                    SyncMode::Update => "updating:-\n",
                    SyncMode::Report => "outdated:-\n",
                });
            }
            out
        }
        Progress::Result(result) => format!("  {}\n", result.path().display()),
    }
}

pub fn print_json(report: &SyncReport) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, report)?;
    writeln!(handle)?;
    Ok(())
}
