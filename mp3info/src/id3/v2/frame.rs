use crate::error::Result;
use crate::util::text::{
	TextEncoding, decode_text, find_terminator, latin1_decode, utf16_bom_endianness, utf16_encode,
};

use std::fmt::{Display, Formatter};

/// Binary values longer than this are snipped when displayed
const DISPLAY_SNIP_LEN: usize = 128;

/// The value of a single ID3v2 frame
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameValue {
	/// Decoded text, for text frames (`T***`), comments and unsynchronised lyrics
	Text(String),
	/// The raw frame body, for every other frame
	Binary(Vec<u8>),
	/// An integer, used for the `disc_number` and `disc_total` entries derived from `TPOS`
	Integer(u32),
}

impl FrameValue {
	/// The value as text, if it is [`FrameValue::Text`]
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// The value as an integer, if it is [`FrameValue::Integer`]
	pub fn as_integer(&self) -> Option<u32> {
		match self {
			Self::Integer(i) => Some(*i),
			_ => None,
		}
	}

	/// The value as raw bytes, if it is [`FrameValue::Binary`]
	pub fn as_binary(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Whether the value is empty, empty values are never written
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(text) => text.is_empty(),
			Self::Binary(bytes) => bytes.is_empty(),
			Self::Integer(_) => false,
		}
	}

	fn to_text(&self) -> String {
		match self {
			Self::Text(text) => text.clone(),
			Self::Binary(bytes) => latin1_decode(bytes),
			Self::Integer(i) => i.to_string(),
		}
	}
}

impl Display for FrameValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Text(text) => write!(f, "{text:?}"),
			Self::Integer(i) => write!(f, "{i}"),
			Self::Binary(bytes) if bytes.len() > DISPLAY_SNIP_LEN => {
				write!(
					f,
					"{:?}<<<...snip...>>>",
					latin1_decode(&bytes[..DISPLAY_SNIP_LEN])
				)
			},
			Self::Binary(bytes) => write!(f, "{:?}", latin1_decode(bytes)),
		}
	}
}

impl From<String> for FrameValue {
	fn from(input: String) -> Self {
		Self::Text(input)
	}
}

impl From<&str> for FrameValue {
	fn from(input: &str) -> Self {
		Self::Text(input.to_owned())
	}
}

impl From<u32> for FrameValue {
	fn from(input: u32) -> Self {
		Self::Integer(input)
	}
}

impl From<Vec<u8>> for FrameValue {
	fn from(input: Vec<u8>) -> Self {
		Self::Binary(input)
	}
}

/// The value(s) stored under a single frame ID
///
/// A frame ID that appears once holds a [`FrameEntry::Single`] value. Once a second, different
/// value is added under the same ID, the entry is promoted to a [`FrameEntry::Multiple`], which
/// is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameEntry {
	/// A single value
	Single(FrameValue),
	/// Multiple values, in the order they were added
	Multiple(Vec<FrameValue>),
}

impl FrameEntry {
	/// All values of the entry
	pub fn values(&self) -> &[FrameValue] {
		match self {
			Self::Single(value) => std::slice::from_ref(value),
			Self::Multiple(values) => values,
		}
	}

	/// The first value of the entry
	pub fn first(&self) -> Option<&FrameValue> {
		self.values().first()
	}

	/// Adds a value, promoting the entry to [`FrameEntry::Multiple`]
	///
	/// Returns `false` if an identical value is already present.
	pub(crate) fn push(&mut self, value: FrameValue) -> bool {
		if self.values().contains(&value) {
			return false;
		}

		match self {
			Self::Single(existing) => {
				let existing = std::mem::replace(existing, FrameValue::Integer(0));
				*self = Self::Multiple(vec![existing, value]);
			},
			Self::Multiple(values) => values.push(value),
		}

		true
	}
}

impl Display for FrameEntry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Single(value) => write!(f, "{value}"),
			Self::Multiple(values) => {
				f.write_str("[")?;
				for (index, value) in values.iter().enumerate() {
					if index > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{value}")?;
				}
				f.write_str("]")
			},
		}
	}
}

fn is_language_frame(id: &str) -> bool {
	matches!(id, "COMM" | "USLT" | "COM" | "ULT")
}

fn is_text_frame(id: &str) -> bool {
	id.starts_with('T')
}

/// Decodes the body of a frame
///
/// Returns `None` for values that decode to nothing.
pub(crate) fn decode_frame_value(
	id: &str,
	body: &[u8],
	default_encoding: TextEncoding,
) -> Result<Option<FrameValue>> {
	let text = if is_language_frame(id) {
		decode_language_frame(body, default_encoding)?
	} else if is_text_frame(id) {
		let Some((&encoding_byte, content)) = body.split_first() else {
			return Ok(None);
		};

		let encoding = text_encoding(encoding_byte, default_encoding);
		decode_text(content, encoding, u16::from_le_bytes)?
	} else {
		if body.is_empty() {
			return Ok(None);
		}

		return Ok(Some(FrameValue::Binary(body.to_vec())));
	};

	if text.is_empty() {
		return Ok(None);
	}

	Ok(Some(FrameValue::Text(text)))
}

fn text_encoding(byte: u8, default_encoding: TextEncoding) -> TextEncoding {
	TextEncoding::from_u8(byte).unwrap_or_else(|| {
		log::debug!("ID3v2: Unknown text encoding {byte}, assuming {default_encoding:?}");
		default_encoding
	})
}

// Layout: encoding (1), language (3), terminated description, text
//
// The text is used, unless it is empty, in which case the description is used instead.
// Without a terminator, the entire remainder is the text.
fn decode_language_frame(body: &[u8], default_encoding: TextEncoding) -> Result<String> {
	if body.len() < 4 {
		return Ok(String::new());
	}

	let encoding = text_encoding(body[0], default_encoding);
	let content = &body[4..];

	let Some(terminator_pos) = find_terminator(content, encoding) else {
		return decode_text(content, encoding, u16::from_le_bytes);
	};

	let description = &content[..terminator_pos];
	let text = &content[terminator_pos + encoding.terminator_len()..];

	// Some encoders only give the description a BOM
	let endianness = utf16_bom_endianness(description).unwrap_or(u16::from_le_bytes);

	let decoded_text = decode_text(text, encoding, endianness)?;
	if !decoded_text.is_empty() {
		return Ok(decoded_text);
	}

	decode_text(description, encoding, endianness)
}

/// Encodes the body of a frame for an ID3v2.3 tag
pub(crate) fn encode_frame_value(id: &str, value: &FrameValue, language: [u8; 3]) -> Vec<u8> {
	if id == "COMM" || id == "USLT" {
		let text = utf16_encode(&value.to_text(), false);

		let mut body = Vec::with_capacity(text.len() + 8);
		body.push(TextEncoding::UTF16 as u8);
		body.extend_from_slice(&language);
		// Empty description
		body.extend(utf16_encode("", true));
		body.extend(text);

		return body;
	}

	if is_text_frame(id) {
		let mut body = vec![TextEncoding::UTF16 as u8];
		body.extend(utf16_encode(&value.to_text(), false));

		return body;
	}

	match value {
		FrameValue::Binary(bytes) => bytes.clone(),
		FrameValue::Text(text) => text.as_bytes().to_vec(),
		FrameValue::Integer(i) => i.to_string().into_bytes(),
	}
}
