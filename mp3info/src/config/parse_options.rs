use crate::error::Result;
use crate::macros::err;
use crate::util::text::TextEncoding;

/// Options to control how mp3info loads a [`Track`](crate::track::Track)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parse_tags: bool,
	pub(crate) parse_audio: bool,
	pub(crate) text_encoding: TextEncoding,
	pub(crate) language: [u8; 3],
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parse_tags: true,
	/// 	parse_audio: true,
	/// 	text_encoding: TextEncoding::Latin1,
	/// 	language: *b"ENG",
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default language used when writing `COMM` and `USLT` frames
	pub const DEFAULT_LANGUAGE: [u8; 3] = *b"ENG";

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parse_tags: true,
			parse_audio: true,
			text_encoding: TextEncoding::Latin1,
			language: Self::DEFAULT_LANGUAGE,
		}
	}

	/// Whether or not to read (and later write) the ID3v1 and ID3v2 tags
	///
	/// When disabled, an ID3v2 tag is still skipped over to find the audio frames,
	/// but it is never decoded, and [`Track::commit`](crate::track::Track::commit) does nothing.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::config::ParseOptions;
	///
	/// // By default, `parse_tags` is enabled. Here, we only want the stream details.
	/// let parsing_options = ParseOptions::new().parse_tags(false);
	/// ```
	pub fn parse_tags(&mut self, parse_tags: bool) -> Self {
		self.parse_tags = parse_tags;
		*self
	}

	/// Whether or not to scan the MPEG frames for the [`StreamSummary`](crate::mpeg::StreamSummary)
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::config::ParseOptions;
	///
	/// // By default, `parse_audio` is enabled. Here, we only care about the tags.
	/// let parsing_options = ParseOptions::new().parse_audio(false);
	/// ```
	pub fn parse_audio(&mut self, parse_audio: bool) -> Self {
		self.parse_audio = parse_audio;
		*self
	}

	/// The encoding assumed for ID3v2 text frames that declare an unknown encoding
	///
	/// # Errors
	///
	/// `name` is not one of `iso-8859-1`, `utf-16`, `utf-16be` or `utf-8`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::config::ParseOptions;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// let parsing_options = ParseOptions::new().text_encoding("utf-8")?;
	/// assert!(ParseOptions::new().text_encoding("ebcdic").is_err());
	/// # Ok(()) }
	/// ```
	pub fn text_encoding(&mut self, name: &str) -> Result<Self> {
		let Some(encoding) = TextEncoding::from_name(name) else {
			err!(InvalidArgument("unknown text encoding"));
		};

		self.text_encoding = encoding;
		Ok(*self)
	}

	/// The language code written into `COMM` and `USLT` frames
	///
	/// # Errors
	///
	/// `language` is not exactly three ASCII letters
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3info::config::ParseOptions;
	///
	/// # fn main() -> mp3info::error::Result<()> {
	/// let parsing_options = ParseOptions::new().default_language("fra")?;
	/// assert!(ParseOptions::new().default_language("en").is_err());
	/// # Ok(()) }
	/// ```
	pub fn default_language(&mut self, language: &str) -> Result<Self> {
		let Ok(language) = <[u8; 3]>::try_from(language.as_bytes()) else {
			err!(InvalidArgument("language codes must be 3 characters long"));
		};

		if !language.iter().all(u8::is_ascii_alphabetic) {
			err!(InvalidArgument("language codes must be ASCII letters"));
		}

		self.language = language;
		Ok(*self)
	}
}
