use super::tag::Id3v1Tag;
use crate::util::text::latin1_decode;

impl Id3v1Tag {
	/// Parses a tag, expecting the `"TAG"` marker to have been verified already
	pub(crate) fn parse(reader: [u8; 128]) -> Self {
		let reader = &reader[3..];

		let mut tag = Self {
			title: decode_text(&reader[..30]),
			artist: decode_text(&reader[30..60]),
			album: decode_text(&reader[60..90]),
			year: parse_year(&reader[90..94]),
			comment: None,
			track_number: None,
			genre: None,
		};

		// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
		// We check for the null terminator 28 bytes in. A track number of 0 is invalid.
		let comment = &reader[94..124];
		let range = if comment[28] == 0 {
			if comment[29] != 0 {
				tag.track_number = Some(comment[29]);
			}

			0_usize..28
		} else {
			0..30
		};

		tag.comment = decode_text(&comment[range]);

		if reader[124] != u8::MAX {
			tag.genre = Some(reader[124]);
		}

		tag
	}
}

// Fields end at the first null, any trailing spaces are dropped as well
fn decode_text(data: &[u8]) -> Option<String> {
	let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());

	let text = latin1_decode(&data[..end]);
	let trimmed = text.trim_end_matches(' ');
	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_owned())
}

// Takes the leading digits (ignoring leading whitespace), a year of 0 is treated as empty
fn parse_year(input: &[u8]) -> Option<u16> {
	let year = input
		.iter()
		.skip_while(|c| c.is_ascii_whitespace())
		.take_while(|c| c.is_ascii_digit())
		.fold(0_u16, |year, c| year * 10 + u16::from(*c - b'0'));

	if year == 0 {
		return None;
	}

	Some(year)
}
