use thiserror::Error;

/// NetRom decode failures.
///
/// These end decoding of the NetRom layers for the current frame but leave
/// the link-layer decode intact.
///
/// # Examples
/// ```
/// use ax25trace_core::NetRomError;
///
/// let err = NetRomError::MalformedL4Header { needed: 20, actual: 9 };
/// assert!(err.to_string().contains("bad L4 header"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NetRomError {
    #[error("L3 header too short: need {needed} bytes, got {actual}")]
    HeaderTooShort { needed: usize, actual: usize },
    #[error("bad L4 header: need {needed} bytes, got {actual}")]
    MalformedL4Header { needed: usize, actual: usize },
}
