use thiserror::Error;

use crate::protocols::common::Truncated;

/// Fatal link-layer decode errors.
///
/// Each variant aborts the current frame only; anything already rendered
/// for the frame is kept.
///
/// # Examples
/// ```
/// use ax25trace_core::Ax25Error;
///
/// let err = Ax25Error::TooShort { len: 9 };
/// assert!(err.to_string().contains("too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ax25Error {
    #[error("{len} bytes is too short to be valid AX25")]
    TooShort { len: usize },
    #[error("missing control field")]
    MissingControl,
    #[error("frame truncated: {0}")]
    Truncated(#[from] Truncated),
}
