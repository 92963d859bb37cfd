//! Helpers shared by every protocol layer: the frame cursor, its
//! truncation error, and the printable-text conventions used by payload
//! and alias fields.

pub mod error;
pub mod reader;
pub mod text;

pub use error::Truncated;
pub use reader::FrameCursor;
