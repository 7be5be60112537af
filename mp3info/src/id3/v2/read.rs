use super::frame::decode_frame_value;
use super::header::{FrameLayout, Id3v2Header, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::synchsafe::{SynchsafeInteger, raw_position, resynchronise};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::{id3v2_err, try_vec};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder};

/// Frames larger than this are rejected
const MAX_FRAME_SIZE: u32 = 50_000_000;

/// Old versions of the "mp3ext" tagger leave this where the next frame ID should be
const MP3EXT_MARKER: &[u8] = b"MP3e";

/// Reads an ID3v2 tag, expecting the reader to be at the start of the stream
///
/// Returns `None` if the stream doesn't start with a tag, leaving the reader at the start of
/// the stream. Otherwise, the reader is left at the end of the tag.
///
/// Problems with the frames themselves are not fatal. Everything read up to that point is kept,
/// and the end of the tag is taken from its header.
pub(crate) fn parse_id3v2<R>(
	reader: &mut R,
	stream_len: u64,
	parse_options: ParseOptions,
) -> Result<Option<Id3v2Tag>>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;

	let Some(header) = Id3v2Header::parse(reader)? else {
		reader.seek(SeekFrom::Start(start))?;
		return Ok(None);
	};

	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let declared_end = (start + header.full_tag_size()).min(stream_len);

	let mut tag = Id3v2Tag::with_options(parse_options);
	tag.version = Some((header.version, header.minor));
	tag.parsed = true;

	let mut raw_body = try_vec![0; (declared_end - start).saturating_sub(Id3v2Header::LEN) as usize];
	reader.read_exact(&mut raw_body)?;

	let end_offset = match read_frames(&mut tag, reader, header, &raw_body, start) {
		Ok(end) => end,
		Err(e) => {
			log::warn!("ID3v2: Tag not fully parsed: {e}");
			declared_end
		},
	};

	tag.end_offset = Some(end_offset);
	tag.tag_length = end_offset - start;
	tag.snapshot();

	reader.seek(SeekFrom::Start(end_offset))?;

	Ok(Some(tag))
}

// Returns the offset of the end of the tag
fn read_frames<R>(
	tag: &mut Id3v2Tag,
	reader: &mut R,
	header: Id3v2Header,
	raw_body: &[u8],
	tag_start: u64,
) -> Result<u64>
where
	R: Read + Seek,
{
	let body_start = tag_start + Id3v2Header::LEN;
	let declared_end = body_start + raw_body.len() as u64;

	let resynchronised;
	let body = if header.unsynchronisation {
		log::debug!("ID3v2: Resynchronising tag");
		resynchronised = resynchronise(raw_body);
		resynchronised.as_slice()
	} else {
		raw_body
	};

	let to_raw = |pos: usize| -> u64 {
		let raw = if header.unsynchronisation {
			raw_position(raw_body, pos)
		} else {
			pos
		};

		body_start + raw as u64
	};

	let mut pos = if header.extended_header {
		extended_header_len(body, header.version)
	} else {
		0
	};

	let layout = header.frame_layout();
	let id_len = layout.id_len();

	while pos < body.len() {
		let id_bytes = &body[pos..body.len().min(pos + id_len)];

		if id_bytes.first() == Some(&0) || id_bytes == MP3EXT_MARKER {
			log::debug!("ID3v2: Found padding, searching for the end of the tag");
			return find_tag_end(reader, to_raw(pos));
		}

		let Some((id, size)) = read_frame_header(body, pos, layout) else {
			log::warn!("ID3v2: Incomplete frame header at offset {}", to_raw(pos));
			break;
		};

		if size > MAX_FRAME_SIZE {
			id3v2_err!(@BAIL OversizedFrame(id, size));
		}

		let content_start = pos + frame_header_len(layout);
		let content_end = content_start + size as usize;

		let Some(content) = body.get(content_start..content_end) else {
			log::warn!("ID3v2: Frame `{id}` extends past the end of the tag");
			break;
		};

		log::trace!("ID3v2: Reading frame `{id}`, size: {size}");

		match decode_frame_value(&id, content, tag.text_encoding) {
			Ok(Some(value)) => {
				if id == "TPOS" {
					if let Some((number, total)) = value.as_text().and_then(split_disc) {
						tag.insert("disc_number", number);
						tag.insert("disc_total", total);
					}
				}

				tag.push(id, value);
			},
			Ok(None) => log::trace!("ID3v2: Frame `{id}` is empty, skipping"),
			Err(e) => log::warn!("ID3v2: Unable to decode frame `{id}`: {e}"),
		}

		pos = content_end;
	}

	Ok(declared_end)
}

fn extended_header_len(body: &[u8], version: Id3v2Version) -> usize {
	let Some(size_bytes) = body.get(..4) else {
		return body.len();
	};

	let size = BigEndian::read_u32(size_bytes);
	let len = match version {
		// The size includes itself
		Id3v2Version::V4 => size.unsynch() as usize,
		_ => size as usize + 4,
	};

	log::debug!("ID3v2: Skipping extended header, size: {len}");
	len.min(body.len())
}

fn frame_header_len(layout: FrameLayout) -> usize {
	match layout {
		FrameLayout::V2 => 6,
		FrameLayout::V3orV4 { .. } => 10,
	}
}

fn read_frame_header(body: &[u8], pos: usize, layout: FrameLayout) -> Option<(String, u32)> {
	let header = body.get(pos..pos + frame_header_len(layout))?;
	let id_len = layout.id_len();

	let id = header[..id_len].iter().map(|&b| char::from(b)).collect();
	let size = match layout {
		FrameLayout::V2 => BigEndian::read_u24(&header[3..6]),
		FrameLayout::V3orV4 { synchsafe_sizes } => {
			let size = BigEndian::read_u32(&header[4..8]);
			if synchsafe_sizes { size.unsynch() } else { size }
		},
	};

	Some((id, size))
}

// Padding is followed by the audio, which starts with the first 0xFF
fn find_tag_end<R>(reader: &mut R, from: u64) -> Result<u64>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(from))?;

	let mut buf = [0; 4096];
	let mut pos = from;
	loop {
		let read = match reader.read(&mut buf) {
			Ok(0) => id3v2_err!(@BAIL MissingTagEnd),
			Ok(read) => read,
			Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
			Err(e) => return Err(e.into()),
		};

		if let Some(index) = buf[..read].iter().position(|b| *b == 0xFF) {
			return Ok(pos + index as u64);
		}

		pos += read as u64;
	}
}

/// Splits a "N/M" disc position
///
/// The first `/` with digits directly on both sides (ignoring whitespace) is used.
fn split_disc(text: &str) -> Option<(u32, u32)> {
	for (index, _) in text.match_indices('/') {
		let left = text[..index].trim_end();
		let right = text[index + 1..].trim_start();

		let number_start = left
			.rfind(|c: char| !c.is_ascii_digit())
			.map_or(0, |i| i + 1);
		let number = &left[number_start..];

		let total_end = right
			.find(|c: char| !c.is_ascii_digit())
			.unwrap_or(right.len());
		let total = &right[..total_end];

		if let (Ok(number), Ok(total)) = (number.parse(), total.parse()) {
			return Some((number, total));
		}
	}

	None
}
