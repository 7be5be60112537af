use crate::id3::v1::constants::GENRES;

macro_rules! impl_accessor {
	($($name:ident,)+) => {
		paste::paste! {
			$(
				#[doc = "Returns the " $name]
				pub fn $name(&self) -> Option<&str> {
					self.$name.as_deref()
				}

				#[doc = "Sets the " $name]
				pub fn [<set_ $name>](&mut self, value: String) {
					self.$name = Some(value)
				}

				#[doc = "Removes the " $name]
				pub fn [<remove_ $name>](&mut self) {
					self.$name = None
				}
			)+
		}
	}
}

/// ID3v1 is a severely limited format, with each field
/// being incredibly small in size. All fields have been
/// commented with their maximum sizes and any other additional
/// restrictions.
///
/// Attempting to write a field greater than the maximum size
/// will **not** error, it will just be shrunk. Text is written
/// as Latin-1, with unrepresentable characters replaced by `?`.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub title: Option<String>,
	/// Track artist, 30 bytes max
	pub artist: Option<String>,
	/// Album title, 30 bytes max
	pub album: Option<String>,
	/// Release year (max 9999)
	pub year: Option<u16>,
	/// A short comment
	///
	/// A V1 tag may have been read, which allows 30 bytes for this field.
	/// A V1.1 tag, however, only has 28 bytes available.
	///
	/// A V1.1 tag is *always* written.
	pub comment: Option<String>,
	/// The track number, 1 byte max
	///
	/// The track number **cannot** be 0, as a null byte at the end of the comment
	/// is what differentiates V1 and V1.1.
	pub track_number: Option<u8>,
	/// The track's genre, 1 byte max
	///
	/// ID3v1 has a predefined set of genres, see [`GENRES`].
	/// This byte should be an index to a genre.
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	/// Create a new empty `ID3v1Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v1::Id3v1Tag;
	///
	/// let id3v1_tag = Id3v1Tag::new();
	/// assert!(id3v1_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	impl_accessor!(title, artist, album, comment,);

	/// The name of the genre, if the genre byte is a valid index into [`GENRES`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v1::Id3v1Tag;
	///
	/// let mut id3v1_tag = Id3v1Tag::new();
	/// id3v1_tag.genre = Some(17);
	///
	/// assert_eq!(id3v1_tag.genre_name(), Some("Rock"));
	/// ```
	pub fn genre_name(&self) -> Option<&'static str> {
		self.genre
			.and_then(|genre| GENRES.get(usize::from(genre)))
			.copied()
	}

	/// Whether every field is empty
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track_number.is_none()
			&& self.genre.is_none()
	}

	/// Remove every field
	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use crate::id3::v1::Id3v1Tag;

	fn expected_tag() -> Id3v1Tag {
		Id3v1Tag {
			title: Some(String::from("Foo title")),
			artist: Some(String::from("Bar artist")),
			album: Some(String::from("Baz album")),
			year: Some(1984),
			comment: Some(String::from("Qux comment")),
			track_number: Some(1),
			genre: Some(32),
		}
	}

	#[test_log::test]
	fn parse_id3v1() {
		let mut tag = [0; 128];
		tag[..3].copy_from_slice(b"TAG");
		tag[3..12].copy_from_slice(b"Foo title");
		tag[33..43].copy_from_slice(b"Bar artist");
		tag[63..72].copy_from_slice(b"Baz album");
		tag[93..97].copy_from_slice(b"1984");
		tag[97..108].copy_from_slice(b"Qux comment");
		tag[126] = 1;
		tag[127] = 32;

		let parsed_tag = Id3v1Tag::parse(tag);

		assert_eq!(parsed_tag, expected_tag());
		assert_eq!(parsed_tag.genre_name(), Some("Classical"));
	}

	#[test_log::test]
	fn id3v1_re_read() {
		let tag = expected_tag();
		let bytes = tag.to_bytes();

		assert_eq!(bytes.len(), 128);
		assert_eq!(Id3v1Tag::parse(bytes), tag);
	}

	#[test_log::test]
	fn accessors() {
		let mut tag = Id3v1Tag::new();
		assert!(tag.is_empty());

		tag.set_title(String::from("Foo title"));
		assert_eq!(tag.title(), Some("Foo title"));
		assert!(!tag.is_empty());

		tag.remove_title();
		assert_eq!(tag.title(), None);

		tag.genre = Some(200);
		assert_eq!(tag.genre_name(), None);

		tag.clear();
		assert!(tag.is_empty());
	}
}
