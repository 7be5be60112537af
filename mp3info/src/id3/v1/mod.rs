//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! See also: [`Id3v1Tag`]
//!
//! ## Location
//!
//! An ID3v1 tag occupies the last 128 bytes of a file, starting with `"TAG"`. Some old taggers
//! placed it at the very start of the file instead, which is only supported when reading.
//!
//! ## Genres
//!
//! ID3v1 stores the genre in a single byte. The genres from 0 to 147 (inclusive) are
//! stored in the [`GENRES`] constant, a value of 255 means there is no genre.
//!
//! ## Track Numbers
//!
//! ID3v1 stores the track number in a non-zero byte.
//! A track number of 0 will be treated as an empty field.
//! Additionally, there is no track total field.
pub(crate) mod constants;
pub(crate) mod read;
pub(crate) mod tag;
pub(crate) mod write;

pub use crate::id3::v1::{constants::GENRES, tag::Id3v1Tag};
