//! Reading files from disk.

use crate::{prelude::*, smf::MidiFile};
use std::io::Read;
use thiserror::Error;
use tracing::{debug, warn};

/// Files larger than this are refused by [`MidiFile::load`](struct.MidiFile.html#method.load).
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Errors produced while loading a MIDI file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read midi file: {0}")]
    Io(#[from] io::Error),

    #[error("midi file is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error(transparent)]
    Parse(#[from] Error),
}

impl MidiFile {
    /// Read a file from disk and decode it.
    ///
    /// Files over [`MAX_FILE_SIZE`](constant.MAX_FILE_SIZE.html) bytes are refused without
    /// being read.
    pub fn load<P: AsRef<Path>>(path: P) -> StdResult<MidiFile, LoadError> {
        fn load_impl(path: &Path) -> StdResult<MidiFile, LoadError> {
            let file = File::open(path)?;
            let size = file.metadata()?.len();
            if size > MAX_FILE_SIZE {
                warn!(path = %path.display(), size, "refusing to load oversized midi file");
                return Err(LoadError::TooLarge {
                    size,
                    limit: MAX_FILE_SIZE,
                });
            }
            let mut bytes = Vec::with_capacity(size as usize);
            //The file might have grown since its metadata was read
            let read = file.take(MAX_FILE_SIZE + 1).read_to_end(&mut bytes)? as u64;
            if read > MAX_FILE_SIZE {
                return Err(LoadError::TooLarge {
                    size: read,
                    limit: MAX_FILE_SIZE,
                });
            }
            debug!(path = %path.display(), size = read, "loaded midi file");
            Ok(MidiFile::parse(&bytes)?)
        }
        load_impl(path.as_ref())
    }
}
