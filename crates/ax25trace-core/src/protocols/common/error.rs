use thiserror::Error;

/// A fixed-width read ran past the end of the frame.
///
/// # Examples
/// ```
/// use ax25trace_core::Truncated;
///
/// let err = Truncated { needed: 7, actual: 3 };
/// assert_eq!(err.to_string(), "need 7 bytes, got 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("need {needed} bytes, got {actual}")]
pub struct Truncated {
    pub needed: usize,
    pub actual: usize,
}
