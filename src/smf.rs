//! Specific to the SMF packaging of MIDI streams.

use crate::{
    event::MidiEvent,
    prelude::*,
    primitive::{Format, Timing},
};
use tracing::{debug, trace};

/// A fully decoded Standard Midi File.
///
/// Owns the header and every track, event and meta payload. It is built in one go by
/// [`MidiFile::parse`](#method.parse) and holds exactly `header.track_count` tracks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MidiFile {
    pub header: MidiHeader,
    pub tracks: Vec<MidiTrack>,
}
impl MidiFile {
    pub fn new(header: MidiHeader, tracks: Vec<MidiTrack>) -> MidiFile {
        MidiFile { header, tracks }
    }

    /// Decode a complete SMF file from its raw bytes.
    ///
    /// The header is decoded first, then exactly as many track chunks as it declares. Any error
    /// aborts the whole parse. Bytes after the last declared track are ignored.
    pub fn parse(raw: &[u8]) -> Result<MidiFile> {
        let mut reader = Reader::new(raw);
        let header = MidiHeader::read(&mut reader)?;
        debug!(
            format = header.format,
            track_count = header.track_count,
            division = header.division,
            "decoded midi header"
        );

        //Every track chunk takes at least 8 bytes, don't trust the declared count blindly
        let capacity = (header.track_count as usize).min(reader.remaining() / 8);
        let mut tracks = Vec::with_capacity(capacity);
        for index in 0..header.track_count {
            let track = MidiTrack::read(&mut reader)
                .inspect_err(|err| debug!(track = index, %err, "failed to decode track"))?;
            trace!(track = index, events = track.len(), "decoded track");
            tracks.push(track);
        }
        if !reader.is_exhausted() {
            debug!(
                trailing = reader.remaining(),
                "ignoring bytes after the last track"
            );
        }
        Ok(MidiFile { header, tracks })
    }

    /// Total amount of events across all tracks.
    pub fn event_count(&self) -> usize {
        self.tracks.iter().map(MidiTrack::len).sum()
    }
}

/// Decode a complete SMF file from its raw bytes.
///
/// Same as [`MidiFile::parse`](struct.MidiFile.html#method.parse).
pub fn parse(raw: &[u8]) -> Result<MidiFile> {
    MidiFile::parse(raw)
}

/// A MIDI file header.
///
/// Fields are kept raw. In particular `format` is not checked to be 0, 1 or 2, and `division`
/// is not interpreted; use [`format_kind`](#method.format_kind) and [`timing`](#method.timing)
/// for that.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct MidiHeader {
    pub format: u16,
    pub track_count: u16,
    pub division: u16,
}
impl MidiHeader {
    /// The only valid length of the header chunk data.
    pub const CHUNK_LEN: u32 = 6;

    pub fn new(format: u16, track_count: u16, division: u16) -> MidiHeader {
        MidiHeader {
            format,
            track_count,
            division,
        }
    }

    /// The header format, if it is one of the standard ones.
    pub fn format_kind(&self) -> Option<Format> {
        Format::from_raw(self.format)
    }

    /// The interpreted `division` field, if it is valid.
    pub fn timing(&self) -> Option<Timing> {
        Timing::from_division(self.division)
    }

    /// Read the 14-byte header chunk, magic and length included.
    pub(crate) fn read(reader: &mut Reader) -> Result<MidiHeader> {
        let start = reader.position();
        let id: [u8; 4] = reader.read_array()?;
        ensure!(&id == b"MThd", Error::new(start, ErrorKind::InvalidHeader));
        let len_pos = reader.position();
        let len = u32::read(reader)?;
        ensure!(
            len == Self::CHUNK_LEN,
            Error::new(len_pos, ErrorKind::InvalidHeaderLength(len))
        );
        let format = u16::read(reader)?;
        let track_count = u16::read(reader)?;
        let division = u16::read(reader)?;
        Ok(MidiHeader::new(format, track_count, division))
    }
}

/// A single decoded track: its events, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MidiTrack {
    pub events: Vec<MidiEvent>,
}
impl MidiTrack {
    pub fn new(events: Vec<MidiEvent>) -> MidiTrack {
        MidiTrack { events }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, MidiEvent> {
        self.events.iter()
    }

    /// Read a whole `MTrk` chunk.
    ///
    /// The declared chunk length is the only track boundary: decoding stops exactly there, with
    /// or without an end-of-track event, and no event may read past it.
    /// On success the reader is left at the start of the next chunk.
    pub(crate) fn read(reader: &mut Reader) -> Result<MidiTrack> {
        let start = reader.position();
        let id: [u8; 4] = reader.read_array()?;
        ensure!(&id == b"MTrk", Error::new(start, ErrorKind::InvalidTrackChunk));
        let len = u32::read(reader)?;
        let mut chunk = reader.split_track(len)?;

        let mut running_status = None;
        let mut events = Vec::with_capacity(chunk.remaining() / 3);
        while !chunk.is_exhausted() {
            //Delta-times are not kept
            let _delta = decode_vlq(&mut chunk)?;
            events.push(MidiEvent::read(&mut chunk, &mut running_status)?);
        }
        Ok(MidiTrack { events })
    }
}
impl<'a> IntoIterator for &'a MidiTrack {
    type Item = &'a MidiEvent;
    type IntoIter = core::slice::Iter<'a, MidiEvent>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
