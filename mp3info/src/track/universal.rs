use crate::id3::v1::{GENRES, Id3v1Tag};
use crate::id3::v2::{Id3v2Tag, Id3v2Version};

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

/// The ID3v2 frames backing each field of the [`UniversalTag`]
struct FieldMapping {
	title: &'static str,
	artist: &'static str,
	album: &'static str,
	year: &'static str,
	track_number: &'static str,
	comment: &'static str,
	genre_name: &'static str,
}

impl FieldMapping {
	const V2: Self = Self {
		title: "TT2",
		artist: "TP1",
		album: "TAL",
		year: "TYE",
		track_number: "TRK",
		comment: "COM",
		genre_name: "TCO",
	};

	const V3: Self = Self {
		title: "TIT2",
		artist: "TPE1",
		album: "TALB",
		year: "TYER",
		track_number: "TRCK",
		comment: "COMM",
		genre_name: "TCON",
	};

	fn ids(&self) -> [&'static str; 7] {
		[
			self.title,
			self.artist,
			self.album,
			self.year,
			self.track_number,
			self.comment,
			self.genre_name,
		]
	}
}

/// A version independent view of the common tag fields
///
/// When a [`Track`](crate::track::Track) is loaded, this is filled from the ID3v1 tag, or
/// from the ID3v2 tag if one was read. Edits are written to both tags on commit:
///
/// * The ID3v1 tag receives every field that is set, unless the ID3v1 tag was edited itself
/// * The ID3v2 tag receives every text field that is set, under its ID3v2.3 frame ID
///
/// Removing a field does not remove it from either tag.
///
/// | Field          | ID3v1          | ID3v2.2 | ID3v2.3/4 |
/// |----------------|----------------|---------|-----------|
/// | `title`        | `title`        | `TT2`   | `TIT2`    |
/// | `artist`       | `artist`       | `TP1`   | `TPE1`    |
/// | `album`        | `album`        | `TAL`   | `TALB`    |
/// | `year`         | `year`         | `TYE`   | `TYER`    |
/// | `track_number` | `track_number` | `TRK`   | `TRCK`    |
/// | `comment`      | `comment`      | `COM`   | `COMM`    |
/// | `genre`        | `genre`        |         |           |
/// | `genre_name`   |                | `TCO`   | `TCON`    |
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct UniversalTag {
	/// Track title
	pub title: Option<String>,
	/// Track artist
	pub artist: Option<String>,
	/// Album title
	pub album: Option<String>,
	/// Release year
	pub year: Option<u32>,
	/// Track number
	pub track_number: Option<u32>,
	/// A short comment
	pub comment: Option<String>,
	/// The ID3v1 genre index, see [`GENRES`]
	pub genre: Option<u8>,
	/// The genre as text
	pub genre_name: Option<String>,
}

impl UniversalTag {
	impl_accessor!(title, artist, album, comment, genre_name,);

	/// Whether every field is empty
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	pub(crate) fn from_id3v1(tag: &Id3v1Tag) -> Self {
		Self {
			title: tag.title.clone(),
			artist: tag.artist.clone(),
			album: tag.album.clone(),
			year: tag.year.map(u32::from),
			track_number: tag.track_number.map(u32::from),
			comment: tag.comment.clone(),
			genre: tag.genre,
			genre_name: tag.genre_name().map(str::to_owned),
		}
	}

	pub(crate) fn from_id3v2(tag: &Id3v2Tag) -> Self {
		let mapping = match tag.original_version() {
			Some(Id3v2Version::V2) => FieldMapping::V2,
			_ => FieldMapping::V3,
		};

		let text = |id: &str| tag.get_text(id).map(str::to_owned);

		let mut genre_name = text(mapping.genre_name);
		if tag.original_version() == Some(Id3v2Version::V2) {
			// ID3v2.2 genres may refer to an ID3v1 genre, ex. "(17)"
			if let Some(genre) = genre_name.as_deref().and_then(id3v1_genre_reference) {
				genre_name = Some(genre.to_owned());
			}
		}

		Self {
			title: text(mapping.title),
			artist: text(mapping.artist),
			album: text(mapping.album),
			year: tag.get_text(mapping.year).and_then(leading_number),
			track_number: tag.get_text(mapping.track_number).and_then(leading_number),
			comment: text(mapping.comment),
			genre: None,
			genre_name,
		}
	}

	/// Copies every field that is set into `tag`
	pub(crate) fn merge_into_id3v1(&self, tag: &mut Id3v1Tag) {
		if let Some(title) = &self.title {
			tag.title = Some(title.clone());
		}
		if let Some(artist) = &self.artist {
			tag.artist = Some(artist.clone());
		}
		if let Some(album) = &self.album {
			tag.album = Some(album.clone());
		}
		if let Some(year) = self.year {
			tag.year = Some(year.min(9999) as u16);
		}
		if let Some(comment) = &self.comment {
			tag.comment = Some(comment.clone());
		}
		if let Some(track_number) = self.track_number {
			match u8::try_from(track_number) {
				Ok(track_number) if track_number > 0 => tag.track_number = Some(track_number),
				_ => log::warn!("ID3v1: Track number {track_number} does not fit, skipping"),
			}
		}
		if let Some(genre) = self.genre {
			tag.genre = Some(genre);
		}
	}

	/// Replaces the ID3v2.2 frames with their ID3v2.3 equivalents holding the fields that are set
	pub(crate) fn merge_into_id3v2(&self, tag: &mut Id3v2Tag) {
		let values = [
			self.title.clone(),
			self.artist.clone(),
			self.album.clone(),
			self.year.map(|year| year.to_string()),
			self.track_number.map(|track| track.to_string()),
			self.comment.clone(),
			self.genre_name.clone(),
		];

		let v2_ids = FieldMapping::V2.ids();
		let v3_ids = FieldMapping::V3.ids();

		for ((v2_id, v3_id), value) in v2_ids.into_iter().zip(v3_ids).zip(values) {
			tag.remove(v2_id);

			if let Some(value) = value {
				tag.insert(v3_id, value);
			}
		}
	}
}

// Parses the leading digits, as in "3/12" -> 3
fn leading_number(text: &str) -> Option<u32> {
	let text = text.trim_start();
	let end = text
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(text.len());

	text[..end].parse().ok()
}

fn id3v1_genre_reference(text: &str) -> Option<&'static str> {
	let index = text.strip_prefix('(')?.strip_suffix(')')?;
	if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	GENRES.get(index.parse::<usize>().ok()?).copied()
}

#[cfg(test)]
mod tests {
	use super::{UniversalTag, id3v1_genre_reference, leading_number};
	use crate::id3::v1::Id3v1Tag;
	use crate::id3::v2::{Id3v2Tag, Id3v2Version};

	#[test_log::test]
	fn from_id3v1() {
		let id3v1 = Id3v1Tag {
			title: Some(String::from("Foo title")),
			year: Some(1999),
			track_number: Some(4),
			genre: Some(17),
			..Id3v1Tag::default()
		};

		let tag = UniversalTag::from_id3v1(&id3v1);
		assert_eq!(tag.title(), Some("Foo title"));
		assert_eq!(tag.year, Some(1999));
		assert_eq!(tag.track_number, Some(4));
		assert_eq!(tag.genre, Some(17));
		assert_eq!(tag.genre_name(), Some("Rock"));
	}

	#[test_log::test]
	fn from_id3v2() {
		let mut id3v2 = Id3v2Tag::new();
		id3v2.version = Some((Id3v2Version::V3, 0));
		id3v2.insert("TIT2", "Foo title");
		id3v2.push("TPE1", "Foo artist");
		id3v2.push("TPE1", "Bar artist");
		id3v2.insert("TYER", "2004-05");
		id3v2.insert("TRCK", "3/12");
		id3v2.insert("TCON", "(17)");

		let tag = UniversalTag::from_id3v2(&id3v2);
		assert_eq!(tag.title(), Some("Foo title"));
		assert_eq!(tag.artist(), Some("Foo artist"));
		assert_eq!(tag.year, Some(2004));
		assert_eq!(tag.track_number, Some(3));
		// Only resolved for ID3v2.2
		assert_eq!(tag.genre_name(), Some("(17)"));
		assert_eq!(tag.genre, None);
	}

	#[test_log::test]
	fn from_id3v22() {
		let mut id3v2 = Id3v2Tag::new();
		id3v2.version = Some((Id3v2Version::V2, 0));
		id3v2.insert("TT2", "Foo title");
		id3v2.insert("TCO", "(17)");

		let tag = UniversalTag::from_id3v2(&id3v2);
		assert_eq!(tag.title(), Some("Foo title"));
		assert_eq!(tag.genre_name(), Some("Rock"));
	}

	#[test_log::test]
	fn merge() {
		let tag = UniversalTag {
			title: Some(String::from("New title")),
			year: Some(2010),
			track_number: Some(300),
			..UniversalTag::default()
		};

		let mut id3v1 = Id3v1Tag {
			artist: Some(String::from("Foo artist")),
			track_number: Some(1),
			..Id3v1Tag::default()
		};
		tag.merge_into_id3v1(&mut id3v1);

		assert_eq!(id3v1.title(), Some("New title"));
		assert_eq!(id3v1.artist(), Some("Foo artist"));
		assert_eq!(id3v1.year, Some(2010));
		assert_eq!(id3v1.track_number, Some(1));

		let mut id3v2 = Id3v2Tag::new();
		id3v2.insert("TT2", "Old title");
		id3v2.insert("TAL", "Old album");
		tag.merge_into_id3v2(&mut id3v2);

		assert!(id3v2.get("TT2").is_none());
		assert!(id3v2.get("TAL").is_none());
		assert_eq!(id3v2.get_text("TIT2"), Some("New title"));
		assert_eq!(id3v2.get_text("TYER"), Some("2010"));
		assert_eq!(id3v2.get_text("TRCK"), Some("300"));
		assert!(id3v2.get("TALB").is_none());
	}

	#[test_log::test]
	fn helpers() {
		assert_eq!(leading_number(" 12abc"), Some(12));
		assert_eq!(leading_number("abc"), None);
		assert_eq!(id3v1_genre_reference("(0)"), Some("Blues"));
		assert_eq!(id3v1_genre_reference("(999)"), None);
		assert_eq!(id3v1_genre_reference("Rock"), None);
		assert_eq!(id3v1_genre_reference("()"), None);
	}
}
