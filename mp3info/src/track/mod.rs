//! Reading and writing MP3 files
//!
//! A [`Track`] holds everything read from an MP3 file: the [`StreamSummary`] of the audio,
//! the ID3v1 and ID3v2 tags, and a [`UniversalTag`] view over both. Tag edits are kept in
//! memory until [`Track::commit`] writes them back.
//!
//! ```rust,no_run
//! use mp3info::track::Track;
//!
//! # fn main() -> mp3info::error::Result<()> {
//! let mut track = Track::open("path/to/my.mp3")?;
//!
//! if let Some(summary) = track.summary() {
//! 	println!("{} kbps, {} seconds", summary.bitrate(), summary.duration_seconds());
//! }
//!
//! track.universal_mut().set_title(String::from("Foo title"));
//! track.commit()?;
//! # Ok(()) }
//! ```

mod universal;
mod write;

pub use universal::UniversalTag;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v1::constants::ID3V1_TAG_SIZE;
use crate::id3::v2::Id3v2Tag;
use crate::id3::v2::header::{Id3v2Header, Id3v2Version};
use crate::id3::v2::read::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v1, find_leading_id3v1};
use crate::macros::err;
use crate::mpeg::{AudioRegion, FrameIter, StreamSummary, locate_first_frame, read_stream_summary};
use crate::source::{ByteSource, SourceReader};
use crate::util::io::SeekStreamLen;

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// An MP3 file
///
/// The source is only opened while loading and committing, the `Track` holds no open handles.
#[derive(Debug, Clone)]
pub struct Track {
	source: ByteSource,
	options: ParseOptions,
	summary: Option<StreamSummary>,
	id3v1: Option<Id3v1Tag>,
	original_id3v1: Option<Id3v1Tag>,
	id3v2: Id3v2Tag,
	universal: UniversalTag,
	original_universal: UniversalTag,
	audio: AudioRegion,
	has_id3v1_trailer: bool,
	target: Option<PathBuf>,
}

impl Track {
	/// Read an MP3 file from a path, using the default [`ParseOptions`]
	///
	/// # Errors
	///
	/// See [`Track::read_from`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use mp3info::track::Track;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// let track = Track::open("path/to/my.mp3")?;
	/// # Ok(()) }
	/// ```
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		Self::open_with_options(path, ParseOptions::new())
	}

	/// Read an MP3 file from a path
	///
	/// # Errors
	///
	/// See [`Track::read_from`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use mp3info::config::ParseOptions;
	/// use mp3info::track::Track;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// // Only interested in the tags
	/// let options = ParseOptions::new().parse_audio(false);
	/// let track = Track::open_with_options("path/to/my.mp3", options)?;
	/// # Ok(()) }
	/// ```
	pub fn open_with_options<P>(path: P, options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		Self::read_from(ByteSource::File(path.as_ref().to_path_buf()), options)
	}

	/// Read an MP3 file from memory
	///
	/// A `Track` read from memory can not be committed.
	///
	/// # Errors
	///
	/// See [`Track::read_from`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::config::ParseOptions;
	/// use mp3info::error::ErrorKind;
	/// use mp3info::track::Track;
	///
	/// let err = Track::from_buffer(vec![0; 128], ParseOptions::new()).unwrap_err();
	/// assert!(matches!(err.kind(), ErrorKind::NoValidFrame));
	/// ```
	pub fn from_buffer(buffer: Vec<u8>, options: ParseOptions) -> Result<Self> {
		Self::read_from(ByteSource::Buffer(buffer), options)
	}

	/// Read an MP3 file from a [`ByteSource`]
	///
	/// # Errors
	///
	/// * [`ErrorKind::EmptySource`](crate::error::ErrorKind::EmptySource) - The source is empty
	/// * [`ErrorKind::NoValidFrame`](crate::error::ErrorKind::NoValidFrame) - No MPEG frame could be found
	/// * [`ErrorKind::BadVbrHeader`](crate::error::ErrorKind::BadVbrHeader) - A Xing header without a frame count
	/// * [`Id3v2ErrorKind::UnsupportedVersion`](crate::error::Id3v2ErrorKind::UnsupportedVersion) - The ID3v2 tag
	///   has an unknown major version
	/// * Any I/O error
	pub fn read_from(source: ByteSource, options: ParseOptions) -> Result<Self> {
		let mut track = Self {
			source,
			options,
			summary: None,
			id3v1: None,
			original_id3v1: None,
			id3v2: Id3v2Tag::with_options(options),
			universal: UniversalTag::default(),
			original_universal: UniversalTag::default(),
			audio: AudioRegion {
				start: 0,
				end: 0,
				stream_len: 0,
			},
			has_id3v1_trailer: false,
			target: None,
		};

		track.reload()?;
		Ok(track)
	}

	/// Read the source again, discarding any changes that have not been committed
	///
	/// # Errors
	///
	/// See [`Track::read_from`]
	pub fn reload(&mut self) -> Result<()> {
		let mut reader = self.source.reader()?;

		let stream_len = reader.stream_len_hack()?;
		if stream_len == 0 {
			err!(EmptySource);
		}

		let options = self.options;

		let mut id3v1 = None;
		let mut id3v2 = Id3v2Tag::with_options(options);
		let mut audio_start = 0;

		if options.parse_tags {
			if stream_len >= ID3V1_TAG_SIZE {
				id3v1 = find_leading_id3v1(&mut reader)?;
			}

			if id3v1.is_some() {
				audio_start = ID3V1_TAG_SIZE;
			} else if let Some(tag) = parse_id3v2(&mut reader, stream_len, options)? {
				audio_start = tag.end_offset().unwrap_or(0);
				id3v2 = tag;
			}
		} else {
			// The tag still needs to be skipped
			reader.rewind()?;
			if let Ok(Some(header)) = Id3v2Header::parse(&mut reader) {
				audio_start = header.full_tag_size().min(stream_len);
			}
		}

		// The trailer is always searched for, as it bounds the audio
		let ID3FindResults(trailer, trailing_id3v1) =
			find_id3v1(&mut reader, options.parse_tags && id3v1.is_none())?;
		if id3v1.is_none() {
			id3v1 = trailing_id3v1;
		}

		// A tag with every field unset is treated as no tag
		let id3v1 = id3v1.filter(|tag| !tag.is_empty());

		let audio = AudioRegion {
			start: audio_start,
			end: if trailer.is_some() {
				stream_len - ID3V1_TAG_SIZE
			} else {
				stream_len
			},
			stream_len,
		};

		let summary = if options.parse_audio {
			Some(read_stream_summary(&mut reader, audio)?)
		} else {
			None
		};

		let universal = if id3v2.is_parsed() {
			UniversalTag::from_id3v2(&id3v2)
		} else if let Some(id3v1) = &id3v1 {
			UniversalTag::from_id3v1(id3v1)
		} else {
			UniversalTag::default()
		};

		self.summary = summary;
		self.original_id3v1.clone_from(&id3v1);
		self.id3v1 = id3v1;
		self.id3v2 = id3v2;
		self.original_universal.clone_from(&universal);
		self.universal = universal;
		self.audio = audio;
		self.has_id3v1_trailer = trailer.is_some();

		Ok(())
	}

	/// Write any tag changes back to the file
	///
	/// Nothing is written if nothing has changed, and nothing is ever written if the
	/// track was read without [`ParseOptions::parse_tags`].
	///
	/// If a new path was set with [`Track::rename`], the source is first copied there, and
	/// every write below happens on the copy.
	///
	/// 1. If the [`UniversalTag`] changed, its fields are copied into the ID3v1 tag (unless the ID3v1
	///    tag was edited directly) and the ID3v2 tag
	/// 2. If the ID3v1 tag changed, it is rewritten (or removed) in place
	/// 3. If the ID3v2 tag changed, the file is rewritten through a temporary file
	///
	/// # Errors
	///
	/// * [`ErrorKind::NotWritable`](crate::error::ErrorKind::NotWritable) - There are changes, but the
	///   source is a buffer or a read-only file
	/// * [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData) - The ID3v2 tag is too large
	/// * Any I/O error
	pub fn commit(&mut self) -> Result<()> {
		if !self.options.parse_tags {
			log::debug!("Tag parsing is disabled, not committing");
			return Ok(());
		}

		if let Some(target) = self.target.take() {
			self.copy_to(target)?;
		}

		if self.id3v1.as_ref().is_some_and(Id3v1Tag::is_empty) {
			self.id3v1 = None;
		}

		if self.universal != self.original_universal {
			log::debug!("Universal tag changed, merging it into the ID3 tags");

			if self.id3v1 == self.original_id3v1 {
				let mut id3v1 = self.id3v1.take().unwrap_or_default();
				self.universal.merge_into_id3v1(&mut id3v1);
				self.id3v1 = (!id3v1.is_empty()).then_some(id3v1);
			}

			self.universal.merge_into_id3v2(&mut self.id3v2);
			self.original_universal.clone_from(&self.universal);
		}

		let id3v1_changed = self.id3v1 != self.original_id3v1;
		let id3v2_changed = self.id3v2.is_changed();
		if !id3v1_changed && !id3v2_changed {
			return Ok(());
		}

		let path = match &self.source {
			ByteSource::File(path) if self.source.is_writable() => path.clone(),
			_ => err!(NotWritable),
		};

		if id3v1_changed {
			self.commit_id3v1(&path)?;
		}

		if id3v2_changed {
			self.commit_id3v2(&path)?;
		}

		Ok(())
	}

	fn copy_to(&mut self, target: PathBuf) -> Result<()> {
		if matches!(&self.source, ByteSource::File(path) if *path == target) {
			return Ok(());
		}

		log::debug!("Copying the track to `{}`", target.display());

		{
			let mut reader = self.source.reader()?;
			reader.rewind()?;

			let mut file = File::create(&target)?;
			std::io::copy(&mut reader, &mut file)?;
		}

		self.source = ByteSource::File(target);
		Ok(())
	}

	fn commit_id3v1(&mut self, path: &Path) -> Result<()> {
		log::debug!("ID3v1 tag changed, writing");

		let tag = self.id3v1.clone().unwrap_or_default();
		write::write_id3v1_to_path(path, &tag)?;

		let has_trailer = !tag.is_empty();
		match (self.has_id3v1_trailer, has_trailer) {
			(false, true) => self.audio.stream_len += ID3V1_TAG_SIZE,
			(true, false) => {
				self.audio.stream_len -= ID3V1_TAG_SIZE;
				self.audio.end = self.audio.stream_len;
			},
			_ => {},
		}

		self.has_id3v1_trailer = has_trailer;
		self.original_id3v1.clone_from(&self.id3v1);

		Ok(())
	}

	fn commit_id3v2(&mut self, path: &Path) -> Result<()> {
		log::debug!("ID3v2 tag changed, rewriting the file");

		let tag_bytes = self.id3v2.to_bytes()?;
		let old_tag_end = self.id3v2.end_offset();
		write::rewrite_id3v2(path, &tag_bytes, old_tag_end)?;

		let old_len = old_tag_end.unwrap_or(0);
		let new_len = tag_bytes.len() as u64;

		self.audio.start = self.audio.start - old_len + new_len;
		self.audio.end = self.audio.end - old_len + new_len;
		self.audio.stream_len = self.audio.stream_len - old_len + new_len;
		if let Some(summary) = &mut self.summary {
			summary.first_frame_offset = summary.first_frame_offset - old_len + new_len;
		}

		let written = !tag_bytes.is_empty();
		self.id3v2.parsed = written;
		self.id3v2.version = written.then_some((Id3v2Version::V3, 0));
		self.id3v2.end_offset = written.then_some(new_len);
		self.id3v2.tag_length = new_len;
		self.id3v2.snapshot();

		Ok(())
	}

	/// [`Track::commit`], then [`Track::reload`]
	///
	/// # Errors
	///
	/// See [`Track::commit`] and [`Track::read_from`]
	pub fn flush(&mut self) -> Result<()> {
		self.commit()?;
		self.reload()
	}

	/// Set a new path for the track
	///
	/// On the next [`Track::commit`], the current source is copied to `path` and the tag changes are
	/// written there. The original file is left untouched. This also makes a `Track` read from memory
	/// committable.
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use mp3info::track::Track;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// let mut track = Track::open("path/to/my.mp3")?;
	/// track.universal_mut().set_title(String::from("Foo title"));
	///
	/// track.rename("path/to/copy.mp3");
	/// track.commit()?;
	/// # Ok(()) }
	/// ```
	pub fn rename<P>(&mut self, path: P)
	where
		P: AsRef<Path>,
	{
		self.target = Some(path.as_ref().to_path_buf());
	}

	/// The source of the track
	pub fn source(&self) -> &ByteSource {
		&self.source
	}

	/// The options the track was read with
	pub fn options(&self) -> ParseOptions {
		self.options
	}

	/// The details of the audio stream
	///
	/// This is `None` if the track was read without [`ParseOptions::parse_audio`].
	pub fn summary(&self) -> Option<&StreamSummary> {
		self.summary.as_ref()
	}

	/// The ID3v1 tag
	pub fn id3v1(&self) -> Option<&Id3v1Tag> {
		self.id3v1.as_ref()
	}

	/// The ID3v1 tag, created if it doesn't exist
	///
	/// An empty ID3v1 tag is removed on commit.
	pub fn id3v1_mut(&mut self) -> &mut Id3v1Tag {
		self.id3v1.get_or_insert_with(Id3v1Tag::default)
	}

	/// The ID3v2 tag
	///
	/// Check [`Track::has_id3v2`] to see whether one was actually read.
	pub fn id3v2(&self) -> &Id3v2Tag {
		&self.id3v2
	}

	/// The ID3v2 tag
	///
	/// An ID3v2 tag without frames is removed on commit.
	pub fn id3v2_mut(&mut self) -> &mut Id3v2Tag {
		&mut self.id3v2
	}

	/// The version independent view of the tags
	pub fn universal(&self) -> &UniversalTag {
		&self.universal
	}

	/// The version independent view of the tags, see [`UniversalTag`] for how edits are applied
	pub fn universal_mut(&mut self) -> &mut UniversalTag {
		&mut self.universal
	}

	/// Whether the track has an ID3v1 tag
	pub fn has_id3v1(&self) -> bool {
		self.id3v1.is_some()
	}

	/// Whether an ID3v2 tag was read from the track
	pub fn has_id3v2(&self) -> bool {
		self.id3v2.is_parsed()
	}

	/// Whether the track has either tag
	pub fn has_tag(&self) -> bool {
		self.has_id3v1() || self.has_id3v2()
	}

	/// Remove the ID3v1 tag, it will be removed from the file on commit
	pub fn remove_id3v1(&mut self) -> Option<Id3v1Tag> {
		self.id3v1.take()
	}

	/// Remove every ID3v2 frame, the tag will be removed from the file on commit
	pub fn remove_id3v2(&mut self) {
		self.id3v2.clear();
	}

	/// An iterator over the frame headers of the audio stream
	///
	/// The iterator holds the source open until it is dropped.
	///
	/// # Errors
	///
	/// * The source could not be opened
	/// * [`ErrorKind::NoValidFrame`](crate::error::ErrorKind::NoValidFrame) - The track was read without
	///   [`ParseOptions::parse_audio`], and no frame could be found
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use mp3info::track::Track;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// let track = Track::open("path/to/my.mp3")?;
	///
	/// let mut frame_count = 0;
	/// for header in track.frames()? {
	/// 	let header = header?;
	/// 	frame_count += 1;
	/// }
	/// # Ok(()) }
	/// ```
	pub fn frames(&self) -> Result<FrameIter<SourceReader<'_>>> {
		let mut reader = self.source.reader()?;

		let first_frame_offset = match &self.summary {
			Some(summary) => summary.first_frame_offset(),
			None => {
				reader.seek(SeekFrom::Start(self.audio.start))?;
				locate_first_frame(&mut reader, self.audio.stream_len)?.1
			},
		};

		Ok(FrameIter::new(reader, first_frame_offset, self.audio.end))
	}

	/// The offset and length of the audio data, excluding the tags
	///
	/// This can be used to compare the audio of two files with different tags.
	pub fn audio_content(&self) -> (u64, u64) {
		(self.audio.start, self.audio.len())
	}

	/// The duration of a single frame in seconds
	pub fn frame_length(&self) -> Option<f64> {
		self.summary.as_ref().map(StreamSummary::frame_length)
	}
}

impl Display for Track {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.summary {
			Some(summary) => write!(
				f,
				"MPEG {} Layer {} {} {} Kbps {} {} Hz length {} sec.",
				summary.mpeg_version(),
				summary.layer(),
				if summary.is_vbr() { "VBR" } else { "CBR" },
				summary.bitrate(),
				summary.channel_mode(),
				summary.sample_rate(),
				summary.duration_seconds()
			)?,
			None => f.write_str("MPEG audio not read")?,
		}

		if let Some(id3v1) = &self.id3v1 {
			write!(f, "\ntag1: {id3v1:?}")?;
		}

		if self.has_id3v2() {
			write!(f, "\ntag2: {}", self.id3v2)?;
		}

		Ok(())
	}
}

/// Whether the file at `path` ends with an ID3v1 tag
///
/// # Errors
///
/// The file could not be read
pub fn has_id3v1_tag<P>(path: P) -> Result<bool>
where
	P: AsRef<Path>,
{
	let mut file = File::open(path)?;
	let ID3FindResults(header, _) = find_id3v1(&mut file, false)?;

	Ok(header.is_some())
}

/// Whether the file at `path` starts with an ID3v2 tag
///
/// # Errors
///
/// The file could not be read
pub fn has_id3v2_tag<P>(path: P) -> Result<bool>
where
	P: AsRef<Path>,
{
	let mut marker = [0; 3];
	let mut file = File::open(path)?;

	match file.read_exact(&mut marker) {
		Ok(()) => Ok(&marker == b"ID3"),
		Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
		Err(e) => Err(e.into()),
	}
}

/// Remove the trailing ID3v1 tag of the file at `path`, if it has one
///
/// # Errors
///
/// The file could not be read or written
pub fn remove_id3v1_tag<P>(path: P) -> Result<()>
where
	P: AsRef<Path>,
{
	write::write_id3v1_to_path(path.as_ref(), &Id3v1Tag::new())
}

/// Remove the ID3v2 tag of the file at `path`, if it has one
///
/// # Errors
///
/// * The file could not be read or written
/// * [`Id3v2ErrorKind::UnsupportedVersion`](crate::error::Id3v2ErrorKind::UnsupportedVersion) - The tag
///   has an unknown major version, so its end can't be determined
pub fn remove_id3v2_tag<P>(path: P) -> Result<()>
where
	P: AsRef<Path>,
{
	let path: PathBuf = path.as_ref().to_path_buf();

	let tag = {
		let source = ByteSource::File(path.clone());
		let mut reader = source.reader()?;
		let stream_len = reader.stream_len_hack()?;
		parse_id3v2(&mut reader, stream_len, ParseOptions::new())?
	};

	if let Some(tag) = tag {
		write::rewrite_id3v2(&path, &[], tag.end_offset())?;
	}

	Ok(())
}
