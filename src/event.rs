//! Track events and their decoder.

use crate::prelude::*;

/// A decoded SMF track event.
///
/// Only the five event shapes below are decoded. Delta-times are not part of the event; they
/// are consumed by the track decoder and thrown away.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum MidiEvent {
    /// Stop playing a note.
    NoteOff {
        /// The MIDI channel that this event is associated with.
        channel: u4,
        /// The MIDI key to stop playing.
        note: u7,
        /// The velocity with which to stop playing it.
        velocity: u7,
    },
    /// Start playing a note.
    NoteOn {
        /// The MIDI channel that this event is associated with.
        channel: u4,
        /// The key to start playing.
        note: u7,
        /// The velocity (strength) with which to press it.
        ///
        /// Note that by convention a `NoteOn` message with a velocity of 0 is equivalent to a
        /// `NoteOff`. It is kept as a `NoteOn` here.
        velocity: u7,
    },
    /// Modify the value of a MIDI controller.
    ControlChange {
        /// The MIDI channel that this event is associated with.
        channel: u4,
        /// The controller to modify.
        controller: u7,
        /// The value to set it to.
        value: u7,
    },
    /// Change the program (also known as instrument) for a channel.
    ProgramChange {
        /// The MIDI channel that this event is associated with.
        channel: u4,
        /// The new program (instrument) to use for the channel.
        program: u7,
    },
    /// A meta-event, giving extra information for correct playback, like tempo, song name,
    /// lyrics, etc...
    ///
    /// Use [`MidiEvent::meta`](#method.meta) for a typed view of the payload.
    Meta {
        /// The raw meta-event type byte.
        meta_type: u8,
        /// The payload, exactly as many bytes as the event declared.
        data: Vec<u8>,
    },
}
impl MidiEvent {
    /// Decode a single event, without its delta-time.
    ///
    /// `running_status` is the status byte of the last channel event of the track. It should be
    /// shared between consecutive calls on the same track and should initially be `None`.
    ///
    /// Running status rules:
    /// - Channel events (`0x80..=0xEF`) set the running status.
    /// - Meta events (`0xFF`) leave it untouched, so it survives them.
    /// - A data byte in place of a status byte reuses the running status.
    ///
    /// In case of failure the reader might be left in the middle of an event!
    pub(crate) fn read(reader: &mut Reader, running_status: &mut Option<u8>) -> Result<MidiEvent> {
        let status_pos = reader.position();
        let byte = reader.read_u8()?;
        let (status, mut pending) = if byte < 0x80 {
            //Running status, this byte is already the first data byte
            let status = running_status
                .ok_or_else(|| Error::new(status_pos, ErrorKind::InvalidRunningStatus))?;
            (status, Some(u7::from(byte)))
        } else {
            (byte, None)
        };

        let event = match status {
            0x80..=0xEF => {
                let channel = u4::from(status);
                let event = match bit_range(status, 4..8) {
                    0x8 => MidiEvent::NoteOff {
                        channel,
                        note: read_data(reader, &mut pending)?,
                        velocity: read_data(reader, &mut pending)?,
                    },
                    0x9 => MidiEvent::NoteOn {
                        channel,
                        note: read_data(reader, &mut pending)?,
                        velocity: read_data(reader, &mut pending)?,
                    },
                    0xB => MidiEvent::ControlChange {
                        channel,
                        controller: read_data(reader, &mut pending)?,
                        value: read_data(reader, &mut pending)?,
                    },
                    0xC => MidiEvent::ProgramChange {
                        channel,
                        program: read_data(reader, &mut pending)?,
                    },
                    //Aftertouch, channel aftertouch and pitch bend
                    _ => bail!(Error::new(status_pos, ErrorKind::UnsupportedEvent(status))),
                };
                *running_status = Some(status);
                event
            }
            0xFF => {
                let meta_type = u8::read(reader)?;
                let (len, _) = decode_vlq(reader)?;
                let data = reader.read_slice(len.as_int() as usize)?;
                MidiEvent::Meta {
                    meta_type,
                    data: data.to_vec(),
                }
            }
            _ => bail!(Error::new(status_pos, ErrorKind::UnsupportedEvent(status))),
        };
        Ok(event)
    }

    /// The channel of a channel event, or `None` for meta events.
    pub fn channel(&self) -> Option<u4> {
        match self {
            MidiEvent::NoteOff { channel, .. }
            | MidiEvent::NoteOn { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::ProgramChange { channel, .. } => Some(*channel),
            MidiEvent::Meta { .. } => None,
        }
    }

    /// Whether this is an end-of-track meta event (type `0x2F`).
    ///
    /// The decoder does not rely on these; track boundaries come from the chunk length.
    pub fn is_end_of_track(&self) -> bool {
        matches!(self, MidiEvent::Meta { meta_type: 0x2F, .. })
    }

    /// A typed view of a meta event, or `None` for channel events.
    pub fn meta(&self) -> Option<MetaMessage<'_>> {
        match self {
            MidiEvent::Meta { meta_type, data } => Some(MetaMessage::from_raw(*meta_type, data)),
            _ => None,
        }
    }
}

/// Read a data byte, or take the one already read as a running status byte.
fn read_data(reader: &mut Reader, pending: &mut Option<u7>) -> Result<u7> {
    if let Some(data) = pending.take() {
        return Ok(data);
    }
    let pos = reader.position();
    let byte = reader.read_u8()?;
    u7::try_from(byte).ok_or_else(|| Error::new(pos, ErrorKind::InvalidDataByte(byte)))
}

/// A "meta message", as defined by the SMF spec.
/// These events carry metadata about the track, such as tempo, time signature, copyright, etc...
///
/// This is a borrowed view over the payload of a `MidiEvent::Meta`.
/// Known meta types whose payload is too short are reported as `Unknown`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MetaMessage<'a> {
    /// For `Format::Sequential` MIDI file types, `TrackNumber` can be empty, and defaults to
    /// the track index.
    TrackNumber(Option<u16>),
    /// Arbitrary text associated to an instant.
    Text(&'a [u8]),
    /// A copyright notice.
    Copyright(&'a [u8]),
    /// Information about the name of the track.
    TrackName(&'a [u8]),
    /// Information about the name of the current instrument.
    InstrumentName(&'a [u8]),
    /// Arbitrary lyric information associated to an instant.
    Lyric(&'a [u8]),
    /// Arbitrary marker text associated to an instant.
    Marker(&'a [u8]),
    /// Arbitrary cue point text associated to an instant.
    CuePoint(&'a [u8]),
    /// Information about the name of the current program.
    ProgramName(&'a [u8]),
    /// Name of the device that this file was intended to be played with.
    DeviceName(&'a [u8]),
    /// Number of the MIDI channel that this file was intended to be played with.
    MidiChannel(u4),
    /// Number of the MIDI port that this file was intended to be played with.
    MidiPort(u7),
    /// Obligatory at track end.
    EndOfTrack,
    /// Amount of microseconds per beat (quarter note).
    Tempo(u24),
    /// In order of the MIDI specification, numerator, denominator, MIDI clocks per click, 32nd
    /// notes per quarter
    TimeSignature(u8, u8, u8, u8),
    /// As in the MIDI specification, negative numbers indicate number of flats and positive
    /// numbers indicate number of sharps.
    /// `false` indicates a major scale, `true` indicates a minor scale.
    KeySignature(i8, bool),
    /// Arbitrary data intended for the sequencer.
    SequencerSpecific(&'a [u8]),
    /// An unknown or malformed meta-message.
    ///
    /// The first `u8` is the raw meta-message identifier byte.
    /// The slice is the actual payload of the meta-message.
    Unknown(u8, &'a [u8]),
}
impl<'a> MetaMessage<'a> {
    /// Interpret a raw meta type and payload.
    pub fn from_raw(meta_type: u8, data: &'a [u8]) -> MetaMessage<'a> {
        match (meta_type, data) {
            (0x00, [hi, lo, ..]) => MetaMessage::TrackNumber(Some(u16::from_be_bytes([*hi, *lo]))),
            (0x00, _) => MetaMessage::TrackNumber(None),
            (0x01, _) => MetaMessage::Text(data),
            (0x02, _) => MetaMessage::Copyright(data),
            (0x03, _) => MetaMessage::TrackName(data),
            (0x04, _) => MetaMessage::InstrumentName(data),
            (0x05, _) => MetaMessage::Lyric(data),
            (0x06, _) => MetaMessage::Marker(data),
            (0x07, _) => MetaMessage::CuePoint(data),
            (0x08, _) => MetaMessage::ProgramName(data),
            (0x09, _) => MetaMessage::DeviceName(data),
            (0x20, [chan, ..]) => MetaMessage::MidiChannel(u4::from(*chan)),
            (0x21, [port, ..]) => MetaMessage::MidiPort(u7::from(*port)),
            (0x2F, _) => MetaMessage::EndOfTrack,
            (0x51, [a, b, c, ..]) => {
                MetaMessage::Tempo(u24::from(u32::from_be_bytes([0, *a, *b, *c])))
            }
            (0x58, [num, den, clocks, notes, ..]) => {
                MetaMessage::TimeSignature(*num, *den, *clocks, *notes)
            }
            (0x59, [sharps, minor, ..]) => MetaMessage::KeySignature(*sharps as i8, *minor != 0),
            (0x7F, _) => MetaMessage::SequencerSpecific(data),
            _ => MetaMessage::Unknown(meta_type, data),
        }
    }
}
