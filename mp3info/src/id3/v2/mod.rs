//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! * Tags of version 2.2, 2.3 and 2.4 can be read, but they are always written as ID3v2.3.0
//! * Only text frames (`T***`), comments, and unsynchronised lyrics are decoded. Every other
//!   frame is kept as its raw body, see [`FrameValue`]
//!
//! See:
//!
//! * [`Id3v2Tag`]
//! * [`FrameEntry`]

mod frame;
pub(crate) mod header;
pub(crate) mod read;
mod tag;
pub mod util;
mod write;

// Exports

pub use frame::{FrameEntry, FrameValue};
pub use header::Id3v2Version;
pub use tag::Id3v2Tag;
pub use util::upgrade::upgrade_v2;
