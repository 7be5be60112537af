use super::constants::{FIRST_FRAME_ATTEMPTS, MAX_SEARCH_WINDOW};
use super::header::FrameHeader;
use crate::error::{ErrorKind, Mp3InfoError, Result};
use crate::macros::err;
use crate::util::alloc::VecFallibleCapacity;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

/// Searches for the next valid frame header, starting at the reader's current position
///
/// At most 2,000,000 bytes are searched. On success, the reader is left just past the header,
/// so the frame starts at `stream_position() - 4`.
///
/// # Errors
///
/// * [`ErrorKind::EndOfStream`] - The end of the stream was reached before a valid header
/// * [`ErrorKind::NoValidFrame`] - The search window was exhausted
pub fn find_next_frame<R>(reader: &mut R, stream_len: u64) -> Result<FrameHeader>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;
	let budget = stream_len.saturating_sub(start).min(MAX_SEARCH_WINDOW);

	// A header candidate at the very end of the budget still needs its 3 trailing bytes
	let mut window = Vec::try_with_capacity_stable((budget + 3) as usize)?;
	reader.by_ref().take(budget + 3).read_to_end(&mut window)?;

	let search_len = (budget as usize).min(window.len());
	for (index, byte) in window[..search_len].iter().enumerate() {
		if *byte != 0xFF {
			continue;
		}

		let Some(header_bytes) = window.get(index..index + 4) else {
			log::trace!("MPEG: Reached the end of the stream while reading a frame header");
			reader.seek(SeekFrom::Start(start + window.len() as u64))?;
			err!(EndOfStream);
		};

		let word = u32::from_be_bytes([
			header_bytes[0],
			header_bytes[1],
			header_bytes[2],
			header_bytes[3],
		]);

		if let Ok(header) = FrameHeader::decode(word) {
			reader.seek(SeekFrom::Start(start + index as u64 + 4))?;
			return Ok(header);
		}
	}

	reader.seek(SeekFrom::Start(start + budget))?;

	if start + budget >= stream_len {
		log::debug!("MPEG: Reached the end of the stream without finding a frame");
		err!(EndOfStream);
	}

	log::debug!("MPEG: No valid frame found in {budget} bytes");
	err!(NoValidFrame)
}

/// Finds the first frame of the audio stream
///
/// Returns the header and the offset of the frame. Up to 5 search windows are tried.
pub(crate) fn locate_first_frame<R>(reader: &mut R, stream_len: u64) -> Result<(FrameHeader, u64)>
where
	R: Read + Seek,
{
	for _ in 0..FIRST_FRAME_ATTEMPTS {
		match find_next_frame(reader, stream_len) {
			Ok(header) => {
				let offset = reader.stream_position()? - 4;
				log::debug!("MPEG: Found the first frame at offset {offset}");
				return Ok((header, offset));
			},
			Err(e) if matches!(e.kind(), ErrorKind::NoValidFrame) => {},
			Err(e) if matches!(e.kind(), ErrorKind::EndOfStream) => break,
			Err(e) => return Err(e),
		}
	}

	err!(NoValidFrame)
}

/// An iterator over the frame headers of an audio stream
///
/// Created by [`Track::frames`](crate::track::Track::frames). Each frame is expected to directly
/// follow the previous one. Iteration stops at the end of the audio data, and an
/// [`ErrorKind::InvalidFrameHeader`] is yielded (once) if a frame does not start with a valid header.
pub struct FrameIter<R> {
	reader: R,
	pos: u64,
	end: u64,
	done: bool,
}

impl<R> FrameIter<R>
where
	R: Read + Seek,
{
	pub(crate) fn new(reader: R, start: u64, end: u64) -> Self {
		Self {
			reader,
			pos: start,
			end,
			done: false,
		}
	}

	/// The offset of the next frame
	pub fn position(&self) -> u64 {
		self.pos
	}

	fn read_header(&mut self) -> Result<FrameHeader> {
		self.reader.seek(SeekFrom::Start(self.pos))?;
		let word = self.reader.read_u32::<BigEndian>()?;

		FrameHeader::decode(word)
	}
}

impl<R> Iterator for FrameIter<R>
where
	R: Read + Seek,
{
	type Item = Result<FrameHeader>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done || self.pos.saturating_add(4) > self.end {
			return None;
		}

		match self.read_header() {
			Ok(header) => {
				self.pos += u64::from(header.frame_size());
				Some(Ok(header))
			},
			Err(e) => {
				self.done = true;
				log::debug!("MPEG: Invalid frame header at offset {}", self.pos);
				Some(Err(e))
			},
		}
	}
}

/// The result of [`frame_scan`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct FrameScan {
	pub(crate) frame_count: u64,
	pub(crate) average_bitrate: f64,
}

/// Averages the bitrate over (at most `limit`) frames
pub(crate) fn frame_scan<I>(frames: I, limit: Option<usize>) -> Result<FrameScan>
where
	I: Iterator<Item = Result<FrameHeader>>,
{
	let mut frame_count = 0_u64;
	let mut bitrate_sum = 0_u64;

	for header in frames.take(limit.unwrap_or(usize::MAX)) {
		let header = header?;

		bitrate_sum += u64::from(header.bitrate());
		frame_count += 1;
	}

	if frame_count == 0 {
		return Err(Mp3InfoError::new(ErrorKind::NoValidFrame));
	}

	Ok(FrameScan {
		frame_count,
		average_bitrate: bitrate_sum as f64 / frame_count as f64,
	})
}
