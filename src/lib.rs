//! # Overview
//!
//! `smfread` is a strict Standard Midi File (SMF) decoder. It turns the raw bytes of a `.mid`
//! file into an owned [`MidiFile`](struct.MidiFile.html): the header fields, and for every track
//! the ordered list of events it contains.
//!
//! Usage is as simple as:
//!
//! ```rust
//! use smfread::{MidiEvent, MidiFile};
//!
//! let bytes = [
//!     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0, 60,
//!     b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
//! ];
//! let smf = MidiFile::parse(&bytes).unwrap();
//!
//! assert_eq!(smf.header.division, 60);
//! for (i, track) in smf.tracks.iter().enumerate() {
//!     println!("track {} has {} events", i, track.len());
//! }
//! assert!(smf.tracks[0].events[0].is_end_of_track());
//! ```
//!
//! # What is decoded
//!
//! Only five event shapes are modeled: note off, note on, control change, program change and
//! meta events. Anything else (aftertouch, pitch bend, system exclusive, system common and
//! realtime bytes) is rejected with [`ErrorKind::UnsupportedEvent`](enum.ErrorKind.html).
//!
//! Delta-times are consumed while decoding but are not kept; a track preserves event order only.
//!
//! Parsing is all-or-nothing: either a complete `MidiFile` is returned or an
//! [`Error`](struct.Error.html) describing the first problem and the byte offset where it
//! was found.
//!
//! # Summaries
//!
//! Most consumers only want a handful of statistics about a file:
//!
//! ```rust
//! # let bytes = [
//! #     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 1, 0, 60,
//! #     b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
//! # ];
//! let summary = smfread::summarize(&bytes).unwrap();
//! assert_eq!(summary.total_event_count, 1);
//! println!("{}", summary);
//! ```
//!
//! # About features
//!
//! - The `std` feature (default) adds `std::error::Error` integration and
//!   [`MidiFile::load`](struct.MidiFile.html#method.load). Without it the crate is
//!   `no_std + alloc`.
//! - The `parallel` feature (default) summarizes batches of files on the `rayon` thread pool
//!   through [`summarize_all`](fn.summarize_all.html). A single parse is always single-threaded.
//! - The `cli` feature builds the `smfinfo` binary.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}
macro_rules! ensure {
    ($cond:expr, $err:expr) => {{
        if !$cond {
            bail!($err)
        }
    }};
}

mod prelude {
    pub(crate) use crate::{
        error::{Error, ErrorKind, Result, StdResult},
        primitive::{decode_vlq, u24, u4, u7, IntRead},
        reader::Reader,
    };
    pub(crate) use alloc::vec::Vec;
    pub(crate) use core::{fmt, mem, ops};
    #[cfg(feature = "std")]
    pub(crate) use std::{fs::File, io, path::Path};

    pub(crate) fn bit_range<T>(val: T, range: ops::Range<u32>) -> T
    where
        T: From<u8>
            + ops::Shr<u32, Output = T>
            + ops::Shl<u32, Output = T>
            + ops::Not<Output = T>
            + ops::BitAnd<Output = T>,
    {
        let mask = !((!T::from(0)) << (range.end - range.start));
        (val >> range.start) & mask
    }
}

mod error;
mod event;
#[cfg(feature = "std")]
mod load;
mod primitive;
mod reader;
mod smf;
mod summary;

#[cfg(feature = "std")]
pub use crate::load::{LoadError, MAX_FILE_SIZE};
pub use crate::{
    error::{Error, ErrorKind, Result},
    event::{MetaMessage, MidiEvent},
    primitive::{decode_vlq, encode_vlq, Format, Fps, Timing, Vlq},
    reader::Reader,
    smf::{parse, MidiFile, MidiHeader, MidiTrack},
    summary::{summarize, summarize_all, Summary},
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u15, u24, u28, u4, u7};
}
