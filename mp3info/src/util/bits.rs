//! Bit and integer helpers shared by the MPEG and ID3 readers

use crate::error::Result;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// Extracts bits `hi..=lo` of `word` as an unsigned integer
///
/// Bit 0 is the least significant bit. If `hi < lo`, this returns `0`.
///
/// # Examples
///
/// ```rust
/// use mp3info::bits::bits;
///
/// // The MPEG version bits of a common MPEG-1 frame header
/// assert_eq!(bits(0xFFFB_9040, 20, 19), 0b11);
/// assert_eq!(bits(0xFFFB_9040, 0, 1), 0);
/// ```
#[must_use]
pub fn bits(word: u32, hi: u32, lo: u32) -> u32 {
	if hi < lo || hi > 31 {
		return 0;
	}

	let width = hi - lo + 1;
	let mask = ((1_u64 << width) - 1) as u32;

	(word >> lo) & mask
}

/// Reads a big-endian `u32`
///
/// # Errors
///
/// The reader has fewer than 4 bytes available, see [`ErrorKind::UnexpectedEof`](crate::error::ErrorKind::UnexpectedEof)
pub fn read_u32_be<R>(reader: &mut R) -> Result<u32>
where
	R: Read,
{
	Ok(reader.read_u32::<BigEndian>()?)
}

/// Reads a big-endian 24-bit integer, as used for ID3v2.2 frame sizes
///
/// # Errors
///
/// The reader has fewer than 3 bytes available, see [`ErrorKind::UnexpectedEof`](crate::error::ErrorKind::UnexpectedEof)
pub fn read_u24_be<R>(reader: &mut R) -> Result<u32>
where
	R: Read,
{
	Ok(reader.read_u24::<BigEndian>()?)
}

/// Reads a 28-bit syncsafe integer
///
/// Only the low 7 bits of each of the 4 bytes are used.
///
/// # Errors
///
/// The reader has fewer than 4 bytes available, see [`ErrorKind::UnexpectedEof`](crate::error::ErrorKind::UnexpectedEof)
///
/// # Examples
///
/// ```rust
/// use mp3info::bits::read_syncsafe_u32;
///
/// # fn main() -> mp3info::error::Result<()> {
/// let mut reader = &[0x00, 0x00, 0x02, 0x01][..];
/// assert_eq!(read_syncsafe_u32(&mut reader)?, 257);
/// # Ok(()) }
/// ```
pub fn read_syncsafe_u32<R>(reader: &mut R) -> Result<u32>
where
	R: Read,
{
	Ok((reader.read_u32::<BigEndian>()? & 0x7F7F_7F7F).unsynch())
}
