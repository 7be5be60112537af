use super::constants::{VBR_SAMPLE_FRAMES, XING_OFFSETS};
use super::header::{ChannelMode, FrameHeader, Layer, MpegVersion};
use super::scan::{FrameIter, frame_scan, locate_first_frame};
use crate::error::Result;
use crate::macros::err;

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use byteorder::{BigEndian, ReadBytesExt};

/// The structural details of an MPEG audio stream
///
/// This is derived once per load, from the first frame header and either a Xing header or
/// a scan of the frames.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSummary {
	pub(crate) first_frame: FrameHeader,
	pub(crate) bitrate: u32,
	pub(crate) is_vbr: bool,
	pub(crate) duration: f64,
	pub(crate) first_frame_offset: u64,
}

impl StreamSummary {
	/// MPEG version
	pub fn mpeg_version(&self) -> MpegVersion {
		self.first_frame.version
	}

	/// MPEG layer
	pub fn layer(&self) -> Layer {
		self.first_frame.layer
	}

	/// Bitrate (kbps)
	///
	/// For VBR streams, this is the (truncated) average bitrate.
	pub fn bitrate(&self) -> u32 {
		self.bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.first_frame.sample_rate
	}

	/// Channel mode
	pub fn channel_mode(&self) -> ChannelMode {
		self.first_frame.channel_mode
	}

	/// Whether the stream has a variable bitrate
	pub fn is_vbr(&self) -> bool {
		self.is_vbr
	}

	/// Duration of the audio in seconds
	pub fn duration_seconds(&self) -> f64 {
		self.duration
	}

	/// Duration of the audio
	pub fn duration(&self) -> Duration {
		Duration::try_from_secs_f64(self.duration).unwrap_or_default()
	}

	/// Offset of the first frame in the stream
	pub fn first_frame_offset(&self) -> u64 {
		self.first_frame_offset
	}

	/// The header of the first frame
	pub fn first_frame(&self) -> &FrameHeader {
		&self.first_frame
	}

	/// The duration of a single frame in seconds
	pub fn frame_length(&self) -> f64 {
		self.first_frame.frame_length()
	}
}

/// The contents of a "Xing" header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct XingHeader {
	frame_count: u32,
	stream_size: u32,
}

impl XingHeader {
	const FRAMES_FLAG: u32 = 0x2;
	const BYTES_FLAG: u32 = 0x4;
	const TOC_FLAG: u32 = 0x1;

	// Expects the reader to be directly after the first frame header
	fn read<R>(reader: &mut R, first_frame: &FrameHeader) -> Result<Option<Self>>
	where
		R: Read + Seek,
	{
		let version_index = usize::from(first_frame.version != MpegVersion::V1);
		let mono_index = usize::from(first_frame.channel_mode == ChannelMode::Mono);
		reader.seek(SeekFrom::Current(XING_OFFSETS[version_index][mono_index]))?;

		let mut marker = [0; 4];
		if reader.read_exact(&mut marker).is_err() || &marker != b"Xing" {
			return Ok(None);
		}

		log::debug!("MPEG: Xing header (VBR) detected");

		let flags = reader.read_u32::<BigEndian>()?;

		let mut frame_count = 0;
		let mut stream_size = 0;

		if flags & Self::FRAMES_FLAG == Self::FRAMES_FLAG {
			frame_count = reader.read_u32::<BigEndian>()?;
		}

		if flags & Self::BYTES_FLAG == Self::BYTES_FLAG {
			stream_size = reader.read_u32::<BigEndian>()?;
		}

		log::debug!("MPEG: Xing header reports {frame_count} frames, {stream_size} bytes");

		if frame_count == 0 {
			err!(BadVbrHeader);
		}

		// The TOC is not needed
		if flags & Self::TOC_FLAG == Self::TOC_FLAG {
			reader.seek(SeekFrom::Current(100))?;
		}

		Ok(Some(Self {
			frame_count,
			stream_size,
		}))
	}
}

/// The bounds of the audio data within a stream
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct AudioRegion {
	pub(crate) start: u64,
	pub(crate) end: u64,
	pub(crate) stream_len: u64,
}

impl AudioRegion {
	pub(crate) fn len(self) -> u64 {
		self.end.saturating_sub(self.start)
	}
}

pub(crate) fn read_stream_summary<R>(reader: &mut R, region: AudioRegion) -> Result<StreamSummary>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(region.start))?;

	let (first_frame, first_frame_offset) = locate_first_frame(reader, region.stream_len)?;

	let mut summary = StreamSummary {
		first_frame,
		bitrate: first_frame.bitrate,
		is_vbr: false,
		duration: 0.0,
		first_frame_offset,
	};

	let samples_per_frame = f64::from(first_frame.samples_per_frame());
	let sample_rate = first_frame.sample_rate;

	if let Some(xing) = XingHeader::read(reader, &first_frame)? {
		summary.is_vbr = true;
		summary.duration = f64::from(xing.frame_count) * samples_per_frame / f64::from(sample_rate);

		let bitrate = ((u64::from(xing.stream_size) / u64::from(xing.frame_count))
			* u64::from(sample_rate))
			/ 144
			/ 1024;
		summary.bitrate = bitrate as u32;

		return Ok(summary);
	}

	// CBR estimate, possibly corrected by the frame scan below
	summary.duration = (region.len() * 8) as f64 / 1000.0 / f64::from(first_frame.bitrate);

	let sample = match frame_scan(
		FrameIter::new(&mut *reader, first_frame_offset, region.end),
		Some(VBR_SAMPLE_FRAMES),
	) {
		Ok(sample) => sample,
		Err(e) => {
			log::warn!("MPEG: Unable to sample the frames, keeping the CBR estimate: {e}");
			return Ok(summary);
		},
	};

	#[allow(clippy::float_cmp)]
	let matches_declared = sample.average_bitrate == f64::from(first_frame.bitrate);
	if matches_declared {
		return Ok(summary);
	}

	log::debug!(
		"MPEG: Average bitrate of the first {} frames ({}) differs from the declared bitrate, \
		 scanning the entire stream",
		sample.frame_count,
		sample.average_bitrate
	);

	match frame_scan(
		FrameIter::new(&mut *reader, first_frame_offset, region.end),
		None,
	) {
		Ok(full) => {
			summary.is_vbr = true;
			summary.bitrate = full.average_bitrate as u32;
			summary.duration = full.frame_count as f64 * samples_per_frame / f64::from(sample_rate);
		},
		Err(e) => log::warn!("MPEG: Unable to scan the frames, keeping the CBR estimate: {e}"),
	}

	Ok(summary)
}
