//! Print a one-line summary for each MIDI file given on the command line.
//!
//! Files that fail to load are reported and skipped. Set `RUST_LOG` for more detail.

use rayon::prelude::*;
use smfread::{LoadError, MidiFile, Summary};
use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const MIDI_EXT: &[&str] = &["mid", "midi", "smf"];

fn summarize(path: &Path) -> Result<Summary, LoadError> {
    let ext = path.extension().and_then(|ext| ext.to_str());
    if !ext.is_some_and(|ext| MIDI_EXT.contains(&ext)) {
        warn!(path = %path.display(), "file does not have a midi extension");
    }
    MidiFile::load(path).map(|smf| smf.summary())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths = env::args_os().skip(1).map(PathBuf::from).collect::<Vec<_>>();
    if paths.is_empty() {
        eprintln!("usage: smfinfo <FILE>...");
        return ExitCode::from(2);
    }

    let summaries = paths.par_iter().map(|path| summarize(path)).collect::<Vec<_>>();

    let mut failed = false;
    for (path, summary) in paths.iter().zip(summaries) {
        match summary {
            Ok(summary) => println!("{}: {}", path.display(), summary),
            Err(err) => {
                error!(path = %path.display(), %err, "skipping midi file");
                failed = true;
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
