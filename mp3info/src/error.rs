//! Contains the errors that can arise within mp3info
//!
//! The primary error is [`Mp3InfoError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Mp3InfoError>`
pub type Result<T> = std::result::Result<T, Mp3InfoError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Source related errors
	/// The byte source is empty
	EmptySource,
	/// Attempted to commit changes to a source that cannot be written to
	///
	/// This is the case for in-memory buffers and read-only files.
	NotWritable,
	/// Provided an invalid configuration value
	InvalidArgument(&'static str),

	// MPEG related errors
	/// The frame sync search was exhausted without finding a valid frame header
	NoValidFrame,
	/// A 32-bit word failed frame header validation
	///
	/// This is recovered from during frame scanning, and will only surface when decoding
	/// a header directly.
	InvalidFrameHeader,
	/// The end of the stream was reached while searching for a frame
	EndOfStream,
	/// A read of a fixed number of bytes came up short
	UnexpectedEof,
	/// A "Xing" header was found without a usable frame count
	BadVbrHeader,

	// Tag related errors
	/// Errors that arise while reading/writing ID3v2 tags
	Id3v2(Id3v2Error),
	/// Errors that arise while decoding text
	TextDecode(&'static str),

	// Data related errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`], other than unexpected EOFs.
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	/// Arises when an ID3v2 major version outside of `2..=4` is found
	UnsupportedVersion(u8, u8),
	/// Arises when a single frame claims to be larger than the allowed maximum
	OversizedFrame(String, u32),
	/// Arises when the end of the stream is reached while skipping tag padding
	MissingTagEnd,
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnsupportedVersion(major, minor) => write!(
				f,
				"Found an unsupported version (v2.{major}.{minor}), expected any major revision \
				 in: (2, 3, 4)"
			),
			Self::OversizedFrame(id, size) => {
				write!(f, "Frame `{id}` is too large ({size} bytes)")
			},
			Self::MissingTagEnd => write!(f, "Reached EOF before finding the end of the tag"),
		}
	}
}

/// An error that arises while interacting with an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// Errors that could occur within mp3info
pub struct Mp3InfoError {
	pub(crate) kind: ErrorKind,
}

impl Mp3InfoError {
	/// Create an `Mp3InfoError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::error::{ErrorKind, Mp3InfoError};
	///
	/// let no_frame = Mp3InfoError::new(ErrorKind::NoValidFrame);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::error::{ErrorKind, Mp3InfoError};
	///
	/// let no_frame = Mp3InfoError::new(ErrorKind::NoValidFrame);
	/// if let ErrorKind::NoValidFrame = no_frame.kind() {
	/// 	println!("Is this really an MP3?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Mp3InfoError {}

impl Debug for Mp3InfoError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for Mp3InfoError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<std::io::Error> for Mp3InfoError {
	fn from(input: std::io::Error) -> Self {
		if input.kind() == std::io::ErrorKind::UnexpectedEof {
			return Self {
				kind: ErrorKind::UnexpectedEof,
			};
		}

		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::collections::TryReserveError> for Mp3InfoError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for Mp3InfoError {
	fn from(input: std::convert::Infallible) -> Self {
		match input {}
	}
}

impl Display for Mp3InfoError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::EmptySource => write!(f, "The provided source is empty"),
			ErrorKind::NotWritable => write!(f, "The source is not writable"),
			ErrorKind::InvalidArgument(message) => write!(f, "Invalid argument: {message}"),

			ErrorKind::NoValidFrame => write!(f, "Unable to find a valid MPEG frame"),
			ErrorKind::InvalidFrameHeader => write!(f, "MPEG: Encountered an invalid frame header"),
			ErrorKind::EndOfStream => write!(f, "MPEG: Reached the end of the stream"),
			ErrorKind::UnexpectedEof => write!(f, "Unexpectedly reached the end of the stream"),
			ErrorKind::BadVbrHeader => write!(f, "MPEG: Bad VBR header"),

			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),

			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
		}
	}
}
