use thiserror::Error;

/// Represents an error while decoding a Standard Midi File.
///
/// Wraps an [`ErrorKind`](enum.ErrorKind.html) together with the absolute byte offset into the
/// input where the failing read started.
///
/// Every error is terminal: decoding a fixed byte buffer again would fail in exactly the same
/// way, and no partially decoded file is ever handed out.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Error)]
#[error("invalid midi at byte {position}: {kind}")]
pub struct Error {
    position: usize,
    kind: ErrorKind,
}
impl Error {
    /// Create a new error of the given kind, located at `position`.
    #[inline]
    pub const fn new(position: usize, kind: ErrorKind) -> Error {
        Error { position, kind }
    }

    /// What went wrong.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The byte offset into the input at which the failing read started.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// True if the input ended before a chunk or event was complete.
    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnexpectedEndOfFile | ErrorKind::UnexpectedEndOfTrack
        )
    }
}

/// The type of error that occurred while decoding.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Error)]
pub enum ErrorKind {
    /// The file does not start with the `MThd` magic.
    #[error("missing `MThd` header chunk")]
    InvalidHeader,
    /// The header chunk declares a length other than 6.
    #[error("header chunk declares {0} bytes instead of 6")]
    InvalidHeaderLength(u32),
    /// A track chunk was expected but the `MTrk` magic is missing.
    #[error("missing `MTrk` track chunk")]
    InvalidTrackChunk,
    /// A variable-length quantity did not terminate within 4 bytes.
    #[error("variable-length quantity longer than 4 bytes")]
    InvalidVlq,
    /// A data byte showed up before any status byte was established.
    #[error("data byte with no running status active")]
    InvalidRunningStatus,
    /// The status byte does not belong to one of the decoded event kinds.
    #[error("unsupported event with status {0:#04X}")]
    UnsupportedEvent(u8),
    /// A data byte has its top bit set.
    #[error("data byte {0:#04X} has its top bit set")]
    InvalidDataByte(u8),
    /// The input is shorter than a chunk header or a declared chunk length demands.
    #[error("unexpected end of file")]
    UnexpectedEndOfFile,
    /// An event extends past the declared end of its track chunk.
    #[error("event runs past the end of its track chunk")]
    UnexpectedEndOfTrack,
}

/// The result type used by the MIDI decoder.
pub type Result<T> = StdResult<T, Error>;
pub(crate) use core::result::Result as StdResult;
