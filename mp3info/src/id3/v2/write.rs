use super::frame::encode_frame_value;
use super::tag::Id3v2Tag;
use super::util::synchsafe::SynchsafeInteger;
use super::util::upgrade::upgrade_v2;
use crate::error::Result;
use crate::macros::err;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// Serializes a tag as ID3v2.3.0
///
/// A tag without frames produces no bytes at all, so writing it removes the tag.
pub(crate) fn create_tag(tag: &Id3v2Tag) -> Result<Vec<u8>> {
	if tag.is_empty() {
		log::debug!("ID3v2: Tag is empty, nothing to write");
		return Ok(Vec::new());
	}

	let mut frames = Vec::new();
	for (id, entry) in tag.iter() {
		let upgraded_id = upgrade_v2(id);
		if upgraded_id.len() != 4 {
			log::debug!("ID3v2: Discarding frame `{id}`, it has no ID3v2.3 equivalent");
			continue;
		}

		for value in entry.values().iter().filter(|value| !value.is_empty()) {
			let body = encode_frame_value(upgraded_id, value, tag.language);
			write_frame(&mut frames, upgraded_id, &body)?;
		}
	}

	let Ok(size) = u32::try_from(frames.len()) else {
		err!(TooMuchData);
	};

	let mut bytes = Vec::with_capacity(frames.len() + 10);
	bytes.write_all(b"ID3")?;
	// Version 2.3.0, no flags
	bytes.write_all(&[3, 0, 0])?;
	bytes.write_u32::<BigEndian>(size.synch()?)?;
	bytes.write_all(&frames)?;

	Ok(bytes)
}

fn write_frame<W>(writer: &mut W, id: &str, body: &[u8]) -> Result<()>
where
	W: Write,
{
	let Ok(len) = u32::try_from(body.len()) else {
		err!(TooMuchData);
	};

	writer.write_all(id.as_bytes())?;
	writer.write_u32::<BigEndian>(len)?;
	// Flags
	writer.write_u16::<BigEndian>(0)?;
	writer.write_all(body)?;

	Ok(())
}
