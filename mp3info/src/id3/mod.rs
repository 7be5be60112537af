//! ID3 specific items
//!
//! An MP3 file may carry an ID3v2 tag at its start, and an ID3v1 tag in its last 128 bytes.
//! Check the other modules for important notes and/or warnings.

pub mod v1;
pub mod v2;

use crate::error::Result;
use v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use v1::tag::Id3v1Tag;

use std::io::{Read, Seek, SeekFrom};

pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Searches for a trailing ID3v1 tag, parsing it if `read` is set
///
/// The reader is left at the start of the tag if one was found, or at the end of the stream.
pub(crate) fn find_id3v1<R>(
	data: &mut R,
	read: bool,
) -> Result<ID3FindResults<(), Option<Id3v1Tag>>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	let mut id3v1 = None;
	let mut header = None;

	// Reader is too small to contain an ID3v1 tag
	if data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64))).is_err() {
		data.seek(SeekFrom::End(0))?;
		return Ok(ID3FindResults(header, id3v1));
	}

	let mut id3v1_tag = [0; 128];
	data.read_exact(&mut id3v1_tag)?;

	data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))?;

	// No ID3v1 tag found
	if id3v1_tag[..3] != ID3V1_TAG_MARKER {
		data.seek(SeekFrom::End(0))?;
		return Ok(ID3FindResults(header, id3v1));
	}

	log::debug!("Found an ID3v1 tag");

	header = Some(());

	if read {
		id3v1 = Some(Id3v1Tag::parse(id3v1_tag));
	}

	Ok(ID3FindResults(header, id3v1))
}

/// Checks for an ID3v1 tag at the very start of the stream, as written by some old taggers
///
/// The reader is left after the tag if one was found, or at the start of the stream.
pub(crate) fn find_leading_id3v1<R>(data: &mut R) -> Result<Option<Id3v1Tag>>
where
	R: Read + Seek,
{
	data.rewind()?;

	let mut id3v1_tag = [0; 128];
	if data.read_exact(&mut id3v1_tag).is_err() || id3v1_tag[..3] != ID3V1_TAG_MARKER {
		data.rewind()?;
		return Ok(None);
	}

	log::warn!("Found an ID3v1 tag at the start of the stream");

	Ok(Some(Id3v1Tag::parse(id3v1_tag)))
}

#[cfg(test)]
mod tests {
	use super::{ID3FindResults, find_id3v1, find_leading_id3v1};
	use crate::id3::v1::Id3v1Tag;

	use std::io::{Cursor, Seek};

	fn id3v1() -> Id3v1Tag {
		Id3v1Tag {
			title: Some(String::from("Foo title")),
			..Id3v1Tag::default()
		}
	}

	#[test_log::test]
	fn trailing_tag() {
		let mut data = vec![0; 300];
		data.extend(id3v1().to_bytes());
		let mut reader = Cursor::new(data);

		let ID3FindResults(header, tag) = find_id3v1(&mut reader, true).unwrap();
		assert!(header.is_some());
		assert_eq!(tag, Some(id3v1()));
		assert_eq!(reader.stream_position().unwrap(), 300);

		let ID3FindResults(header, tag) = find_id3v1(&mut reader, false).unwrap();
		assert!(header.is_some());
		assert!(tag.is_none());
	}

	#[test_log::test]
	fn no_trailing_tag() {
		let mut reader = Cursor::new(vec![0; 300]);
		let ID3FindResults(header, _) = find_id3v1(&mut reader, true).unwrap();
		assert!(header.is_none());

		// Too small
		let mut reader = Cursor::new(b"TAG".to_vec());
		let ID3FindResults(header, _) = find_id3v1(&mut reader, true).unwrap();
		assert!(header.is_none());
	}

	#[test_log::test]
	fn leading_tag() {
		let mut data = id3v1().to_bytes().to_vec();
		data.extend([0xFF, 0xFB, 0x90, 0x40]);
		let mut reader = Cursor::new(data);

		assert_eq!(find_leading_id3v1(&mut reader).unwrap(), Some(id3v1()));
		assert_eq!(reader.stream_position().unwrap(), 128);

		let mut reader = Cursor::new(vec![0xFF, 0xFB, 0x90, 0x40]);
		assert_eq!(find_leading_id3v1(&mut reader).unwrap(), None);
		assert_eq!(reader.stream_position().unwrap(), 0);
	}
}
