//! Utilities for working with synchsafe integers and unsynchronised ID3v2 content
//!
//! An ID3v2 tag may never contain a false MPEG frame sync (`0xFF` followed by a byte with its
//! top 3 bits set). Sizes are stored using only the low 7 bits of each byte, and tag bodies
//! flagged as unsynchronised have a `0x00` inserted after every `0xFF`.

use crate::error::Result;

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 28 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// let synch_number = 0x0000_0201_u32;
	/// assert_eq!(synch_number.unsynch(), 257);
	/// ```
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		if self > 0x0FFF_FFFF {
			crate::macros::err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}

/// Removes the `0x00` following every `0xFF` in unsynchronised content
///
/// # Examples
///
/// ```rust
/// use mp3info::id3::v2::util::synchsafe::resynchronise;
///
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
/// assert_eq!(resynchronise(&content), [0xFF, 0x1A, 0xFF, 0x15]);
/// ```
pub fn resynchronise(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	let mut encountered_ff = false;
	for byte in content {
		if encountered_ff {
			encountered_ff = false;

			// Only skip the byte if this is valid unsynchronisation
			if *byte == 0 {
				continue;
			}
		}

		out.push(*byte);
		encountered_ff = *byte == 0xFF;
	}

	out
}

/// Maps a position in resynchronised content back to the position in the raw `content`
pub(crate) fn raw_position(content: &[u8], resynchronised_pos: usize) -> usize {
	let mut seen = 0;
	let mut encountered_ff = false;

	for (index, byte) in content.iter().enumerate() {
		if encountered_ff {
			encountered_ff = false;

			if *byte == 0 {
				continue;
			}
		}

		if seen == resynchronised_pos {
			return index;
		}

		seen += 1;
		encountered_ff = *byte == 0xFF;
	}

	content.len()
}

#[cfg(test)]
mod tests {
	use super::{SynchsafeInteger, raw_position, resynchronise};

	const UNSYNCHRONISED_CONTENT: &[u8] =
		&[0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00];
	const EXPECTED: &[u8] = &[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00];

	#[test_log::test]
	fn resynchronised_content() {
		assert_eq!(resynchronise(UNSYNCHRONISED_CONTENT), EXPECTED);
	}

	#[test_log::test]
	fn raw_positions() {
		assert_eq!(raw_position(UNSYNCHRONISED_CONTENT, 0), 0);
		// The second byte (0x00) is at raw index 2, as index 1 is the inserted null
		assert_eq!(raw_position(UNSYNCHRONISED_CONTENT, 1), 2);
		assert_eq!(raw_position(UNSYNCHRONISED_CONTENT, 3), 4);
		assert_eq!(raw_position(UNSYNCHRONISED_CONTENT, 7), 9);
		assert_eq!(
			raw_position(UNSYNCHRONISED_CONTENT, EXPECTED.len()),
			UNSYNCHRONISED_CONTENT.len()
		);
	}

	#[test_log::test]
	fn synchsafe_integers() {
		assert_eq!(257_u32.synch().unwrap(), 0x0201);
		assert_eq!(0x0201_u32.unsynch(), 257);
		assert_eq!(0x0FFF_FFFF_u32.synch().unwrap().unsynch(), 0x0FFF_FFFF);
		assert!(0x1000_0000_u32.synch().is_err());
	}
}
