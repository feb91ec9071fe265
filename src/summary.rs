//! Summary statistics about decoded files.

use crate::{prelude::*, primitive::Timing, smf::MidiFile};

/// The handful of statistics most consumers want about a MIDI file.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Summary {
    /// Raw header format.
    pub format: u16,
    /// Amount of tracks, as declared in the header.
    pub track_count: u16,
    /// Raw header division.
    pub division: u16,
    /// Sum of the event counts of all tracks.
    pub total_event_count: usize,
}
impl Summary {
    pub fn of(smf: &MidiFile) -> Summary {
        Summary {
            format: smf.header.format,
            track_count: smf.header.track_count,
            division: smf.header.division,
            total_event_count: smf.event_count(),
        }
    }
}
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "format {}, {} tracks, ", self.format, self.track_count)?;
        match Timing::from_division(self.division) {
            Some(timing) => write!(f, "{}", timing)?,
            None => write!(f, "division {:#06X}", self.division)?,
        }
        write!(f, ", {} events", self.total_event_count)
    }
}

impl MidiFile {
    /// Summarize this file.
    pub fn summary(&self) -> Summary {
        Summary::of(self)
    }
}

/// Parse a file and summarize it in one step.
pub fn summarize(raw: &[u8]) -> Result<Summary> {
    MidiFile::parse(raw).map(|smf| smf.summary())
}

/// Summarize several files, one result per input buffer and in the same order.
///
/// With the `parallel` feature the buffers are parsed on the `rayon` thread pool. Each buffer
/// is still parsed by a single thread, and a failure in one buffer does not affect the others.
pub fn summarize_all<B>(buffers: &[B]) -> Vec<Result<Summary>>
where
    B: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        //Not worth spinning up the pool for a single file
        if buffers.len() > 1 {
            use rayon::prelude::*;

            return buffers
                .par_iter()
                .map(|raw| summarize(raw.as_ref()))
                .collect();
        }
    }
    buffers.iter().map(|raw| summarize(raw.as_ref())).collect()
}
