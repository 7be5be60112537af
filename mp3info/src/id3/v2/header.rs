use crate::error::Result;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::id3v2_err;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	pub(crate) fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

/// The layout of the frames within a tag, determined by its major version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum FrameLayout {
	/// 3 character IDs, 24-bit sizes, no flags
	V2,
	/// 4 character IDs, 32-bit sizes (synchsafe in ID3v2.4), 2 flag bytes
	V3orV4 { synchsafe_sizes: bool },
}

impl FrameLayout {
	pub(crate) fn id_len(self) -> usize {
		match self {
			Self::V2 => 3,
			Self::V3orV4 { .. } => 4,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub minor: u8,
	pub unsynchronisation: bool,
	pub extended_header: bool,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER**)
	pub size: u32,
}

impl Id3v2Header {
	pub(crate) const LEN: u64 = 10;

	/// Parses an ID3v2 header, returning `None` if there isn't one
	pub(crate) fn parse<R>(bytes: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let mut header = [0; 10];
		if bytes.read_exact(&mut header).is_err() || &header[..3] != b"ID3" {
			return Ok(None);
		}

		log::debug!("Found an ID3v2 header");

		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => id3v2_err!(@BAIL UnsupportedVersion(major, header[4])),
		};

		let flags = header[5];

		Ok(Some(Self {
			version,
			minor: header[4],
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: version != Id3v2Version::V2 && flags & 0x40 == 0x40,
			size: BigEndian::read_u32(&header[6..]).unsynch(),
		}))
	}

	pub(crate) fn frame_layout(&self) -> FrameLayout {
		match self.version {
			Id3v2Version::V2 => FrameLayout::V2,
			Id3v2Version::V3 => FrameLayout::V3orV4 {
				synchsafe_sizes: false,
			},
			Id3v2Version::V4 => FrameLayout::V3orV4 {
				synchsafe_sizes: true,
			},
		}
	}

	/// The full size of the tag, including the header
	pub(crate) fn full_tag_size(&self) -> u64 {
		Self::LEN + u64::from(self.size)
	}
}

#[cfg(test)]
mod tests {
	use super::{FrameLayout, Id3v2Header, Id3v2Version};
	use crate::error::{ErrorKind, Id3v2ErrorKind};

	#[test_log::test]
	fn parse_header() {
		let bytes = [b'I', b'D', b'3', 4, 0, 0xC0, 0x00, 0x00, 0x02, 0x01];
		let header = Id3v2Header::parse(&mut &bytes[..]).unwrap().unwrap();

		assert_eq!(header.version, Id3v2Version::V4);
		assert!(header.unsynchronisation);
		assert!(header.extended_header);
		assert_eq!(header.size, 257);
		assert_eq!(header.full_tag_size(), 267);
		assert_eq!(
			header.frame_layout(),
			FrameLayout::V3orV4 {
				synchsafe_sizes: true
			}
		);
	}

	#[test_log::test]
	fn not_a_header() {
		assert!(Id3v2Header::parse(&mut &b"TAG"[..]).unwrap().is_none());
		assert!(
			Id3v2Header::parse(&mut &[0xFF, 0xFB, 0x90, 0x40, 0, 0, 0, 0, 0, 0][..])
				.unwrap()
				.is_none()
		);
	}

	#[test_log::test]
	fn unsupported_version() {
		let bytes = [b'I', b'D', b'3', 5, 0, 0, 0, 0, 0, 0];
		let err = Id3v2Header::parse(&mut &bytes[..]).unwrap_err();

		let ErrorKind::Id3v2(id3v2_err) = err.kind() else {
			panic!("expected an ID3v2 error, got {err:?}");
		};

		assert!(matches!(
			id3v2_err.kind(),
			Id3v2ErrorKind::UnsupportedVersion(5, 0)
		));
	}
}
