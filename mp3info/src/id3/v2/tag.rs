use super::frame::{FrameEntry, FrameValue};
use super::header::Id3v2Version;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::util::text::TextEncoding;

use std::fmt::{Display, Formatter};

/// An `ID3v2` tag
///
/// Frames are kept in the order they were first read (or inserted), keyed by their frame ID.
/// Tags of any version can be read, but they are always written as ID3v2.3.0:
///
/// * ID3v2.2 frame IDs are upgraded to their ID3v2.3 equivalents, see [`upgrade_v2`](crate::id3::v2::util::upgrade::upgrade_v2)
/// * Frame IDs that are not 4 characters long after upgrading are dropped
/// * Text is written as UTF-16 with a BOM
///
/// ## `TPOS`
///
/// When a `TPOS` frame of the form `N/M` is read, two additional [`FrameValue::Integer`] entries
/// are created, `disc_number` and `disc_total`. These are never written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Tag {
	pub(crate) version: Option<(Id3v2Version, u8)>,
	pub(crate) frames: Vec<(String, FrameEntry)>,
	pub(crate) original_frames: Vec<(String, FrameEntry)>,
	pub(crate) text_encoding: TextEncoding,
	pub(crate) language: [u8; 3],
	pub(crate) parsed: bool,
	pub(crate) tag_length: u64,
	pub(crate) end_offset: Option<u64>,
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self::new()
	}
}

impl Id3v2Tag {
	/// Create a new empty `ID3v2Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v2::Id3v2Tag;
	///
	/// let tag = Id3v2Tag::new();
	/// assert!(tag.is_empty());
	/// assert!(!tag.is_parsed());
	/// ```
	pub fn new() -> Self {
		Self::with_options(ParseOptions::new())
	}

	pub(crate) fn with_options(options: ParseOptions) -> Self {
		Self {
			version: None,
			frames: Vec::new(),
			original_frames: Vec::new(),
			text_encoding: options.text_encoding,
			language: options.language,
			parsed: false,
			tag_length: 0,
			end_offset: None,
		}
	}

	/// The full version of the tag that was read (ex. `"2.3.0"`)
	///
	/// This is `None` if no tag was read.
	pub fn version(&self) -> Option<String> {
		self.version
			.map(|(major, minor)| format!("2.{}.{minor}", major.major()))
	}

	/// The major version of the tag that was read
	pub fn original_version(&self) -> Option<Id3v2Version> {
		self.version.map(|(major, _)| major)
	}

	/// Whether a tag was read from the source
	pub fn is_parsed(&self) -> bool {
		self.parsed
	}

	/// Whether the frames differ from the ones that were read
	///
	/// The order of the frames is not considered.
	pub fn is_changed(&self) -> bool {
		if self.frames.len() != self.original_frames.len() {
			return true;
		}

		self.frames.iter().any(|(id, entry)| {
			!self
				.original_frames
				.iter()
				.any(|(original_id, original_entry)| id == original_id && entry == original_entry)
		})
	}

	/// The number of bytes the tag occupied in the source, from the start of the header
	/// to the end of the tag (including padding)
	pub fn tag_length(&self) -> u64 {
		self.tag_length
	}

	/// The offset in the source where the tag ends
	///
	/// This is where the search for audio frames begins.
	pub fn end_offset(&self) -> Option<u64> {
		self.end_offset
	}

	/// The language written into `COMM` and `USLT` frames
	pub fn language(&self) -> [u8; 3] {
		self.language
	}

	/// Set the language written into `COMM` and `USLT` frames
	pub fn set_language(&mut self, language: [u8; 3]) {
		self.language = language;
	}

	/// The encoding assumed for text frames with an unknown encoding
	pub fn text_encoding(&self) -> TextEncoding {
		self.text_encoding
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// The number of distinct frame IDs
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Get the entry for a frame ID
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v2::{FrameEntry, Id3v2Tag};
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.insert("TIT2", "Foo title");
	///
	/// assert_eq!(tag.get("TIT2"), Some(&FrameEntry::Single("Foo title".into())));
	/// ```
	pub fn get(&self, id: &str) -> Option<&FrameEntry> {
		self.frames
			.iter()
			.find(|(frame_id, _)| frame_id == id)
			.map(|(_, entry)| entry)
	}

	fn get_mut(&mut self, id: &str) -> Option<&mut FrameEntry> {
		self.frames
			.iter_mut()
			.find(|(frame_id, _)| frame_id == id)
			.map(|(_, entry)| entry)
	}

	/// Get the first text value of a frame ID
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v2::Id3v2Tag;
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.insert_all("TPE1", vec!["Foo artist".into(), "Bar artist".into()]);
	///
	/// assert_eq!(tag.get_text("TPE1"), Some("Foo artist"));
	/// ```
	pub fn get_text(&self, id: &str) -> Option<&str> {
		self.get(id)
			.and_then(FrameEntry::first)
			.and_then(FrameValue::as_text)
	}

	/// Get all values of a frame ID
	pub fn get_all(&self, id: &str) -> impl Iterator<Item = &FrameValue> + '_ {
		self.get(id).map(FrameEntry::values).unwrap_or_default().iter()
	}

	/// Set a single value for a frame ID, replacing any existing values
	pub fn insert(&mut self, id: impl Into<String>, value: impl Into<FrameValue>) {
		self.set_entry(id.into(), FrameEntry::Single(value.into()));
	}

	/// Set multiple values for a frame ID, replacing any existing values
	///
	/// An empty `values` removes the frame ID, and a single value is stored as a [`FrameEntry::Single`].
	pub fn insert_all(&mut self, id: impl Into<String>, mut values: Vec<FrameValue>) {
		let id = id.into();

		match values.len() {
			0 => {
				self.remove(&id);
			},
			1 => {
				let value = values.remove(0);
				self.set_entry(id, FrameEntry::Single(value));
			},
			_ => self.set_entry(id, FrameEntry::Multiple(values)),
		}
	}

	fn set_entry(&mut self, id: String, entry: FrameEntry) {
		match self.get_mut(&id) {
			Some(existing) => *existing = entry,
			None => self.frames.push((id, entry)),
		}
	}

	/// Add a value to a frame ID
	///
	/// If the frame ID already has a value, the entry becomes a [`FrameEntry::Multiple`].
	/// A value identical to one already present is not added again.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v2::{FrameEntry, Id3v2Tag};
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.push("TPE1", "Foo artist");
	/// tag.push("TPE1", "Bar artist");
	/// tag.push("TPE1", "Foo artist");
	///
	/// assert_eq!(
	/// 	tag.get("TPE1"),
	/// 	Some(&FrameEntry::Multiple(vec![
	/// 		"Foo artist".into(),
	/// 		"Bar artist".into()
	/// 	]))
	/// );
	/// ```
	pub fn push(&mut self, id: impl Into<String>, value: impl Into<FrameValue>) {
		let id = id.into();
		let value = value.into();

		match self.get_mut(&id) {
			Some(entry) => {
				if !entry.push(value) {
					log::trace!("ID3v2: Skipping duplicate value for `{id}`");
				}
			},
			None => self.frames.push((id, FrameEntry::Single(value))),
		}
	}

	/// Remove a frame ID, returning its entry
	pub fn remove(&mut self, id: &str) -> Option<FrameEntry> {
		let index = self.frames.iter().position(|(frame_id, _)| frame_id == id)?;
		Some(self.frames.remove(index).1)
	}

	/// Remove all frames
	///
	/// Committing a cleared tag removes it from the file.
	pub fn clear(&mut self) {
		self.frames.clear();
	}

	/// Iterate over the frame IDs and their entries
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameEntry)> + '_ {
		self.frames.iter().map(|(id, entry)| (id.as_str(), entry))
	}

	/// Serialize the tag as ID3v2.3.0
	///
	/// A tag without any frames produces no bytes.
	///
	/// # Errors
	///
	/// The tag is too large to be represented in ID3v2
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v2::Id3v2Tag;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// tag.insert("TIT2", "X");
	///
	/// let bytes = tag.to_bytes()?;
	/// assert_eq!(&bytes[..5], b"ID3\x03\x00");
	/// # Ok(()) }
	/// ```
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		super::write::create_tag(self)
	}

	/// Marks the current frames as the "original" frames, see [`Id3v2Tag::is_changed`]
	pub(crate) fn snapshot(&mut self) {
		self.original_frames.clone_from(&self.frames);
	}
}

impl Display for Id3v2Tag {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("{")?;
		for (index, (id, entry)) in self.frames.iter().enumerate() {
			if index > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{id:?}=>{entry}")?;
		}
		f.write_str("}")
	}
}
