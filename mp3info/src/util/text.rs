use crate::error::{ErrorKind, Mp3InfoError, Result};
use crate::macros::err;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash, Default)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	#[default]
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// Get a `TextEncoding` from its conventional name
	///
	/// The accepted names are `iso-8859-1`, `utf-16`, `utf-16be` and `utf-8` (case insensitive).
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::TextEncoding;
	///
	/// assert_eq!(TextEncoding::from_name("UTF-16BE"), Some(TextEncoding::UTF16BE));
	/// assert_eq!(TextEncoding::from_name("koi8-r"), None);
	/// ```
	pub fn from_name(name: &str) -> Option<Self> {
		const NAMES: [(&str, TextEncoding); 4] = [
			("iso-8859-1", TextEncoding::Latin1),
			("utf-16", TextEncoding::UTF16),
			("utf-16be", TextEncoding::UTF16BE),
			("utf-8", TextEncoding::UTF8),
		];

		NAMES
			.iter()
			.find(|(n, _)| n.eq_ignore_ascii_case(name))
			.map(|(_, encoding)| *encoding)
	}

	/// The conventional name of the encoding
	pub fn name(self) -> &'static str {
		match self {
			Self::Latin1 => "iso-8859-1",
			Self::UTF16 => "utf-16",
			Self::UTF16BE => "utf-16be",
			Self::UTF8 => "utf-8",
		}
	}

	/// The length of a string terminator in this encoding
	pub(crate) fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}
}

/// Decodes `bytes` using `encoding`, stripping any trailing nulls
///
/// UTF-16 (with BOM) text without a byte order mark is decoded using `fallback_endianness`.
pub(crate) fn decode_text(
	bytes: &[u8],
	encoding: TextEncoding,
	fallback_endianness: fn([u8; 2]) -> u16,
) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	match encoding {
		TextEncoding::Latin1 => Ok(latin1_decode(bytes)),
		TextEncoding::UTF16 => {
			if bytes.len() % 2 != 0 {
				log::debug!("UTF-16 string has an odd length, ignoring the last byte");
			}

			match bytes {
				[0xFE, 0xFF, rest @ ..] => utf16_decode_bytes(rest, u16::from_be_bytes),
				[0xFF, 0xFE, rest @ ..] => utf16_decode_bytes(rest, u16::from_le_bytes),
				_ => utf16_decode_bytes(bytes, fallback_endianness),
			}
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(bytes, u16::from_be_bytes),
		TextEncoding::UTF8 => utf8_decode(bytes.to_vec()),
	}
}

/// Finds the first string terminator of `encoding` in `bytes`
///
/// For UTF-16, only terminators aligned to a code unit boundary are considered.
pub(crate) fn find_terminator(bytes: &[u8], encoding: TextEncoding) -> Option<usize> {
	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => bytes.iter().position(|b| *b == 0),
		TextEncoding::UTF16 | TextEncoding::UTF16BE => bytes
			.chunks_exact(2)
			.position(|c| c == [0, 0])
			.map(|pos| pos * 2),
	}
}

/// The endianness a UTF-16 string's byte order mark selects, if it has one
pub(crate) fn utf16_bom_endianness(bytes: &[u8]) -> Option<fn([u8; 2]) -> u16> {
	match bytes {
		[0xFE, 0xFF, ..] => Some(u16::from_be_bytes),
		[0xFF, 0xFE, ..] => Some(u16::from_le_bytes),
		_ => None,
	}
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| char::from(*c)).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

/// Encodes `s` as Latin-1, replacing any unrepresentable characters with `?`
pub(crate) fn latin1_encode_lossy(s: &str) -> impl Iterator<Item = u8> + '_ {
	s.chars().map(|c| u8::try_from(c).unwrap_or(b'?'))
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| Mp3InfoError::new(ErrorKind::TextDecode("Expected a UTF-8 string")))
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	let unverified: Vec<u16> = bytes
		.chunks_exact(2)
		// Multiple strings in one frame may each carry a BOM
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			[b1, b2] => Some(endianness([*b1, *b2])),
			_ => None,
		})
		.collect();

	match String::from_utf16(&unverified) {
		Ok(mut text) => {
			trim_end_nulls(&mut text);
			Ok(text)
		},
		Err(_) => err!(TextDecode("Given an invalid UTF-16 string")),
	}
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

/// Encodes `text` as little endian UTF-16, prefixed with a byte order mark
pub(crate) fn utf16_encode(text: &str, terminated: bool) -> Vec<u8> {
	let mut encoded = Vec::<u8>::with_capacity((text.len() + 2) * 2);

	encoded.extend_from_slice(&0xFEFF_u16.to_le_bytes());

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&ch.to_le_bytes());
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}
