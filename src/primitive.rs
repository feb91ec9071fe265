//! Simple building-block data that can be read in one go.
//! Also, primitives advance the reader when read.

use crate::prelude::*;

/// Implemented on integer types for reading as big-endian.
pub(crate) trait IntRead: Sized {
    /// Reads a big-endian integer.
    fn read(reader: &mut Reader) -> Result<Self>;
}

/// Implement simple big endian integer reads.
macro_rules! impl_read_int {
    {$( $int:ty ),*} => {
        $(
            impl IntRead for $int {
                #[inline]
                fn read(reader: &mut Reader) -> Result<$int> {
                    let bytes = reader.read_slice(mem::size_of::<$int>())?;
                    Ok(bytes.iter().fold(0 as $int, |mut acc, byte| {
                        acc = acc.checked_shl(8).unwrap_or(0);
                        acc |= *byte as $int;
                        acc
                    }))
                }
            }
        )*
    }
}
impl_read_int! {u8,u16,u32}

/// Slightly restricted integers.
macro_rules! restricted_int {
    {$(#[$attr:meta])* $name:ident : $inner:tt => $bits:expr} => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
        #[repr(transparent)]
        #[allow(non_camel_case_types)]
        pub struct $name($inner);
        impl From<$inner> for $name {
            /// Lossy conversion, loses the top bits.
            #[inline]
            fn from(raw: $inner) -> $name {
                $name::from_int_lossy(raw)
            }
        }
        impl From<$name> for $inner {
            #[inline]
            fn from(restricted: $name) -> $inner {restricted.0}
        }
        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
        impl $name {
            const MASK: $inner = (1 << $bits) - 1;

            /// The maximum value that this restricted integer can hold.
            #[inline]
            pub const fn max_value() -> $name {
                $name (Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking off the
            /// extra bits.
            #[inline]
            pub const fn new(raw: $inner) -> $name {
                $name (raw & Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking off the
            /// extra bits.
            #[inline]
            pub const fn from_int_lossy(raw: $inner) -> $name {
                $name (raw & Self::MASK)
            }

            /// Returns `Some` if the raw integer is within range of the restricted integer, and
            /// `None` otherwise.
            #[inline]
            pub fn try_from(raw: $inner) -> Option<$name> {
                if raw <= Self::MASK {
                    Some($name(raw))
                } else {
                    None
                }
            }

            /// Get the inner integer out of the wrapper.
            /// The inner integer is guaranteed to be in range of the restricted wrapper.
            #[inline]
            pub fn as_int(self) -> $inner {
                Into::into(self)
            }
        }
        impl PartialEq<$inner> for $name {
            fn eq(&self, rhs: &$inner) -> bool {
                self.as_int() == *rhs
            }
        }
        impl PartialEq<$name> for $inner {
            fn eq(&self, rhs: &$name) -> bool {
                *self == rhs.as_int()
            }
        }
    };
}
restricted_int! {
    /// A 15-bit integer type.
    ///
    /// Wraps the `u16` type and ensures that the top bit is always zero.
    u15: u16 => 15
}
restricted_int! {
    /// A 7-bit integer type.
    ///
    /// Wraps the `u8` type and ensures that the top bit is always zero.
    u7: u8 => 7
}
restricted_int! {
    /// A 4-bit integer type.
    ///
    /// Wraps the `u8` type and ensures that the top 4 bits are always zero.
    u4: u8 => 4
}
restricted_int! {
    /// A 24-bit integer type.
    ///
    /// Wraps the `u32` type and ensures that the top 8 bits are always zero.
    u24: u32 => 24
}
restricted_int! {
    /// Referred to in the MIDI spec as "variable length int".
    u28: u32 => 28
}

/// Decode a variable-length quantity, returning its value and how many bytes it took.
///
/// Each byte contributes its bottom 7 bits, most significant group first. A byte with the top
/// bit set means another byte follows.
///
/// At most 4 bytes are read. If the 4th byte still has its continuation bit set the quantity
/// would not fit in 28 bits, and `ErrorKind::InvalidVlq` is returned instead of wrapping.
pub fn decode_vlq(reader: &mut Reader) -> Result<(u28, usize)> {
    let start = reader.position();
    let mut int: u32 = 0;
    for consumed in 1..=4 {
        let byte = reader.read_u8()?;
        int <<= 7;
        int |= bit_range(byte, 0..7) as u32;
        if bit_range(byte, 7..8) == 0 {
            //At most 4 groups of 7 bits were read, so the int fits in 28 bits
            return Ok((u28::from(int), consumed));
        }
    }
    Err(Error::new(start, ErrorKind::InvalidVlq))
}

/// The encoded bytes of a variable-length quantity, as produced by
/// [`encode_vlq`](fn.encode_vlq.html).
///
/// Dereferences to a byte slice between 1 and 4 bytes long.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Vlq {
    bytes: [u8; 4],
    len: u8,
}
impl Vlq {
    /// The encoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}
impl ops::Deref for Vlq {
    type Target = [u8];
    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode a value as a variable-length quantity using the least amount of bytes.
pub fn encode_vlq(value: u28) -> Vlq {
    let int = value.as_int();
    let mut vlq = Vlq {
        bytes: [0; 4],
        len: 0,
    };
    let mut skipping = true;
    for i in (0..4).rev() {
        let byte = ((int >> (i * 7)) & 0x7F) as u8;
        if skipping && byte == 0 && i != 0 {
            //Skip these leading zeros
        } else {
            skipping = false;
            vlq.bytes[vlq.len as usize] = if i == 0 { byte } else { byte | 0x80 };
            vlq.len += 1;
        }
    }
    vlq
}

/// The order in which tracks should be laid out when playing back an SMF file.
///
/// The header keeps the raw format number; this is only an interpretation of it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Format {
    /// This file should have a single track only.
    SingleTrack,
    /// This file has several tracks that should be played simultaneously.
    ///
    /// Usually the first track controls tempo and other song metadata.
    Parallel,
    /// This file has several tracks, each one a separate song.
    Sequential,
}
impl Format {
    /// Interpret a raw header format number, if it is one of the three standard ones.
    pub fn from_raw(format: u16) -> Option<Format> {
        Some(match format {
            0 => Format::SingleTrack,
            1 => Format::Parallel,
            2 => Format::Sequential,
            _ => return None,
        })
    }
}

/// The timing for an SMF file, as encoded in the header `division` field.
/// This can be in ticks/beat or ticks/second.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Timing {
    /// Specifies ticks/beat as a 15-bit integer.
    ///
    /// The length of a beat is not standard, so in order to fully describe the length of a MIDI
    /// tick a tempo meta event should be present.
    Metrical(u15),
    /// Specifies ticks/second by dividing a second into frames and then into subframes.
    /// Therefore the length of of a tick is `1/fps/subframe`.
    Timecode(Fps, u8),
}
impl Timing {
    /// Interpret a raw `division` field.
    ///
    /// Returns `None` for timecode divisions with a frame rate other than 24, 25, 29 or 30.
    pub fn from_division(raw: u16) -> Option<Timing> {
        if bit_range(raw, 15..16) != 0 {
            //Timecode, the top byte is the negated frame rate
            let fps = (bit_range(raw, 8..16) as u8 as i8).wrapping_neg();
            let subframe = bit_range(raw, 0..8) as u8;
            Some(Timing::Timecode(Fps::from_int(fps as u8)?, subframe))
        } else {
            Some(Timing::Metrical(u15::from(raw)))
        }
    }
}
impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Timing::Metrical(ticks) => write!(f, "{} ticks/beat", ticks),
            Timing::Timecode(fps, subframes) => {
                write!(f, "{} fps x {} ticks/frame", fps.as_int(), subframes)
            }
        }
    }
}

/// One of the four FPS values available for SMPTE times, as defined by the MIDI standard.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Fps {
    /// 24 frames per second.
    Fps24,
    /// 25 frames per second.
    Fps25,
    /// Actually `29.97 = 30 / 1.001` frames per second.
    ///
    /// Quite an exotic value because of interesting historical reasons.
    Fps29,
    /// 30 frames per second.
    Fps30,
}
impl Fps {
    /// Converts an integer representing the semantic fps to an `Fps` value (ie. `24` -> `Fps24`).
    #[inline]
    pub fn from_int(raw: u8) -> Option<Fps> {
        Some(match raw {
            24 => Fps::Fps24,
            25 => Fps::Fps25,
            29 => Fps::Fps29,
            30 => Fps::Fps30,
            _ => return None,
        })
    }

    /// Get the integral approximate fps out.
    #[inline]
    pub fn as_int(self) -> u8 {
        match self {
            Fps::Fps24 => 24,
            Fps::Fps25 => 25,
            Fps::Fps29 => 29,
            Fps::Fps30 => 30,
        }
    }
}
