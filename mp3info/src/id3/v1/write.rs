use super::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use super::tag::Id3v1Tag;
use crate::error::{Mp3InfoError, Result};
use crate::util::io::{FileLike, Length, Truncate};
use crate::util::text::latin1_encode_lossy;

use std::io::SeekFrom;

/// Writes (or removes) the trailing ID3v1 tag of `file`
///
/// * An empty tag truncates an existing tag away
/// * Without an existing tag, the tag is appended
/// * Otherwise, the existing tag is overwritten in place
pub(crate) fn write_id3v1<F>(file: &mut F, tag: &Id3v1Tag) -> Result<()>
where
	F: FileLike,
	Mp3InfoError: From<<F as Truncate>::Error>,
	Mp3InfoError: From<<F as Length>::Error>,
{
	let file_len = file.len()?;

	let mut has_tag = false;
	if file_len >= ID3V1_TAG_SIZE {
		file.seek(SeekFrom::Start(file_len - ID3V1_TAG_SIZE))?;

		let mut marker = [0; 3];
		file.read_exact(&mut marker)?;
		has_tag = marker == ID3V1_TAG_MARKER;
	}

	if tag.is_empty() {
		if has_tag {
			log::debug!("ID3v1: Removing tag");

			// An ID3v1 tag occupies the last 128 bytes of the file, so we can just
			// shrink it down.
			file.truncate(file_len - ID3V1_TAG_SIZE)?;
		}

		return Ok(());
	}

	if has_tag {
		file.seek(SeekFrom::Start(file_len - ID3V1_TAG_SIZE))?;
	} else {
		log::debug!("ID3v1: No existing tag, appending");
		file.seek(SeekFrom::End(0))?;
	}

	file.write_all(&tag.to_bytes())?;

	Ok(())
}

impl Id3v1Tag {
	/// Encodes the tag as ID3v1.1
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::id3::v1::Id3v1Tag;
	///
	/// let mut tag = Id3v1Tag::new();
	/// tag.year = Some(2003);
	///
	/// let bytes = tag.to_bytes();
	/// assert_eq!(&bytes[..3], b"TAG");
	/// assert_eq!(&bytes[93..97], b"2003");
	/// // No genre
	/// assert_eq!(bytes[127], 255);
	/// ```
	pub fn to_bytes(&self) -> [u8; 128] {
		fn resize_string(value: Option<&str>, dest: &mut [u8]) {
			if let Some(val) = value {
				for (d, b) in dest.iter_mut().zip(latin1_encode_lossy(val)) {
					*d = b;
				}
			}
		}

		let mut bytes = [0; 128];
		bytes[..3].copy_from_slice(&ID3V1_TAG_MARKER);

		resize_string(self.title.as_deref(), &mut bytes[3..33]);
		resize_string(self.artist.as_deref(), &mut bytes[33..63]);
		resize_string(self.album.as_deref(), &mut bytes[63..93]);

		// A zero year is left as NUL bytes
		if let Some(year) = self.year.filter(|year| *year != 0) {
			let year = format!("{:04}", year.min(9999));
			bytes[93..97].copy_from_slice(year.as_bytes());
		}

		resize_string(self.comment.as_deref(), &mut bytes[97..125]);

		// bytes[125] is the null separating the comment and track number
		bytes[126] = self.track_number.unwrap_or(0);
		bytes[127] = self.genre.unwrap_or(u8::MAX);

		bytes
	}
}
