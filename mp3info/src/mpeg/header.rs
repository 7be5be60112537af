use super::constants::{BITRATES, SAMPLE_RATES, SAMPLES_PER_FRAME};
use crate::error::Result;
use crate::macros::err;
use crate::util::bits::bits;

use std::fmt::{Display, Formatter};

/// MPEG Audio version
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
}

impl MpegVersion {
	fn index(self) -> usize {
		match self {
			Self::V1 => 0,
			Self::V2 => 1,
			Self::V2_5 => 2,
		}
	}
}

impl Display for MpegVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::V1 => f.write_str("1"),
			Self::V2 => f.write_str("2"),
			Self::V2_5 => f.write_str("2.5"),
		}
	}
}

/// MPEG layer
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Layer {
	Layer1 = 1,
	Layer2 = 2,
	#[default]
	Layer3 = 3,
}

impl Display for Layer {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", *self as u8)
	}
}

/// Channel mode
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum ChannelMode {
	#[default]
	Stereo = 0,
	JointStereo = 1,
	/// Two independent mono channels
	DualChannel = 2,
	Mono = 3,
}

impl Display for ChannelMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Stereo => f.write_str("Stereo"),
			Self::JointStereo => f.write_str("JStereo"),
			Self::DualChannel => f.write_str("Dual Channel"),
			Self::Mono => f.write_str("Single Channel"),
		}
	}
}

/// A decoded MPEG audio frame header
///
/// See [`FrameHeader::decode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameHeader {
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) bitrate: u32,
	pub(crate) sample_rate: u32,
	pub(crate) channel_mode: ChannelMode,
	pub(crate) padding: bool,
	pub(crate) private: bool,
	pub(crate) copyright: bool,
	pub(crate) original: bool,
	pub(crate) error_protection: bool,
	pub(crate) mode_extension: u8,
	pub(crate) emphasis: u8,
	pub(crate) frame_size: u32,
}

impl FrameHeader {
	/// Decode a big-endian 32-bit frame header word
	///
	/// # Errors
	///
	/// The word is not a valid MPEG audio frame header:
	///
	/// * The 11-bit frame sync is missing
	/// * The version or layer is reserved
	/// * The bitrate index is free-format (`0000`) or bad (`1111`)
	/// * The sample rate index is reserved
	/// * The top 16 bits are `0xFFFE`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::mpeg::{ChannelMode, FrameHeader, Layer, MpegVersion};
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// let header = FrameHeader::decode(0xFFFB_9040)?;
	///
	/// assert_eq!(header.version(), MpegVersion::V1);
	/// assert_eq!(header.layer(), Layer::Layer3);
	/// assert_eq!(header.bitrate(), 128);
	/// assert_eq!(header.sample_rate(), 44100);
	/// assert_eq!(header.channel_mode(), ChannelMode::JointStereo);
	/// assert_eq!(header.frame_size(), 417);
	/// # Ok(()) }
	/// ```
	pub fn decode(word: u32) -> Result<Self> {
		if word & 0xFFE0_0000 != 0xFFE0_0000
			|| word & 0x0006_0000 == 0
			|| word & 0x0000_F000 == 0x0000_F000
			|| word & 0x0000_F000 == 0
			|| word & 0x0000_0C00 == 0x0000_0C00
			|| word & 0xFFFF_0000 == 0xFFFE_0000
		{
			err!(InvalidFrameHeader);
		}

		let version = match bits(word, 20, 19) {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => {
				log::trace!("MPEG: Frame header uses a reserved version");
				err!(InvalidFrameHeader);
			},
		};

		let layer = match bits(word, 18, 17) {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			_ => Layer::Layer1,
		};

		let layer_index = layer as usize - 1;
		let bitrate_index = bits(word, 15, 12) as usize;
		let bitrate = BITRATES[version.index()][layer_index][bitrate_index - 1];
		let sample_rate = SAMPLE_RATES[version.index()][bits(word, 11, 10) as usize];

		let channel_mode = match bits(word, 7, 6) {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::Mono,
		};

		let mut header = Self {
			version,
			layer,
			bitrate,
			sample_rate,
			channel_mode,
			padding: bits(word, 9, 9) == 1,
			private: bits(word, 8, 8) == 0,
			copyright: bits(word, 3, 3) == 1,
			original: bits(word, 2, 2) == 1,
			error_protection: bits(word, 16, 16) == 0,
			mode_extension: bits(word, 5, 4) as u8,
			emphasis: bits(word, 1, 0) as u8,
			frame_size: 0,
		};

		header.frame_size = header.compute_frame_size();

		Ok(header)
	}

	fn compute_frame_size(&self) -> u32 {
		let bytes_per_slot = if self.layer == Layer::Layer1 { 4 } else { 1 };
		let slot_factor = u64::from(self.samples_per_frame()) / 8 / bytes_per_slot;

		let slot_count = slot_factor * u64::from(self.bitrate) * 1000
			/ u64::from(self.sample_rate)
			+ u64::from(self.padding);

		(slot_count * bytes_per_slot) as u32
	}

	/// MPEG version
	pub fn version(&self) -> MpegVersion {
		self.version
	}

	/// MPEG layer
	pub fn layer(&self) -> Layer {
		self.layer
	}

	/// Bitrate (kbps)
	pub fn bitrate(&self) -> u32 {
		self.bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Channel mode
	pub fn channel_mode(&self) -> ChannelMode {
		self.channel_mode
	}

	/// Whether the frame carries an extra padding slot
	pub fn padding(&self) -> bool {
		self.padding
	}

	/// The inverse of the private bit
	pub fn private(&self) -> bool {
		self.private
	}

	/// Whether the audio is copyrighted
	pub fn copyright(&self) -> bool {
		self.copyright
	}

	/// Whether the media is original
	pub fn original(&self) -> bool {
		self.original
	}

	/// Whether the frame is followed by a CRC
	pub fn error_protection(&self) -> bool {
		self.error_protection
	}

	/// Joint stereo mode extension (0..=3)
	pub fn mode_extension(&self) -> u8 {
		self.mode_extension
	}

	/// Emphasis (0..=3)
	pub fn emphasis(&self) -> u8 {
		self.emphasis
	}

	/// The total size of the frame in bytes, including the 4 header bytes
	pub fn frame_size(&self) -> u32 {
		self.frame_size
	}

	/// The number of samples in a single frame
	pub fn samples_per_frame(&self) -> u16 {
		SAMPLES_PER_FRAME[self.layer as usize - 1][self.version.index()]
	}

	/// The duration of a single frame in seconds
	pub fn frame_length(&self) -> f64 {
		f64::from(self.samples_per_frame()) / f64::from(self.sample_rate)
	}
}
