//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, ranges and bit masks (source of truth)
//! - `error`: explicit, actionable errors
//! - one module per header or field, decoding through a
//!   [`FrameCursor`](common::FrameCursor) (no direct byte indexing)
//!
//! Decoders are pure and contain no I/O; the `source` module reads
//! captures and the `trace` module renders the decoded layers.

pub mod ax25;
pub mod common;
pub mod netrom;
