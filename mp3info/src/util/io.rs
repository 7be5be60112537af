//! Various traits for reading and writing to file-like objects

use crate::error::Mp3InfoError;

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

// TODO: https://github.com/rust-lang/rust/issues/59359
pub(crate) trait SeekStreamLen: Seek {
	fn stream_len_hack(&mut self) -> crate::error::Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		self.seek(SeekFrom::Start(current_pos))?;

		Ok(len)
	}
}

impl<T> SeekStreamLen for T where T: Seek {}

/// Provides a method to truncate an object to the specified length
///
/// This is one component of the [`FileLike`] trait, which is what the ID3v1 writer operates on.
///
/// The writer assumes the object has the new length afterwards. An implementation that
/// breaks this **will** corrupt files.
///
/// # Examples
///
/// ```rust
/// use mp3info::io::Truncate;
/// use std::io::Cursor;
///
/// let mut data = Cursor::new(vec![1, 2, 3, 4, 5]);
/// Truncate::truncate(&mut data, 3).unwrap();
///
/// assert_eq!(data.into_inner(), vec![1, 2, 3]);
/// ```
pub trait Truncate {
	/// The error type of the truncation operation
	type Error: Into<Mp3InfoError>;

	/// Truncate a storage object to the specified length
	///
	/// # Errors
	///
	/// Errors depend on the object being truncated, which may not always be fallible.
	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error>;
}

impl Truncate for File {
	type Error = std::io::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.set_len(new_len)
	}
}

impl Truncate for Cursor<Vec<u8>> {
	type Error = std::convert::Infallible;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.get_mut()
			.truncate(usize::try_from(new_len).unwrap_or(usize::MAX));
		Ok(())
	}
}

/// Provides a method to get the length of a storage object
///
/// This is one component of the [`FileLike`] trait, which is what the ID3v1 writer operates on.
///
/// # Examples
///
/// ```rust
/// use mp3info::io::Length;
/// use std::io::Cursor;
///
/// let data = Cursor::new(vec![1, 2, 3, 4, 5]);
/// assert_eq!(Length::len(&data).unwrap(), 5);
/// ```
pub trait Length {
	/// The error type of the length operation
	type Error: Into<Mp3InfoError>;

	/// Get the length of a storage object
	///
	/// # Errors
	///
	/// Errors depend on the object being read, which may not always be fallible.
	fn len(&self) -> std::result::Result<u64, Self::Error>;
}

impl Length for File {
	type Error = std::io::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		self.metadata().map(|m| m.len())
	}
}

impl Length for Cursor<Vec<u8>> {
	type Error = std::convert::Infallible;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Ok(self.get_ref().len() as u64)
	}
}

/// Provides a set of methods to read and write to a file-like object
///
/// This is a combination of the [`Read`], [`Write`], [`Seek`], [`Truncate`], and [`Length`] traits.
/// Both [`File`] and `Cursor<Vec<u8>>` implement it, so the ID3v1 writer can target either.
pub trait FileLike: Read + Write + Seek + Truncate + Length
where
	<Self as Truncate>::Error: Into<Mp3InfoError>,
	<Self as Length>::Error: Into<Mp3InfoError>,
{
}

impl<T> FileLike for T
where
	T: Read + Write + Seek + Truncate + Length,
	<T as Truncate>::Error: Into<Mp3InfoError>,
	<T as Length>::Error: Into<Mp3InfoError>,
{
}

#[cfg(test)]
mod tests {
	use super::{Length, SeekStreamLen, Truncate};

	use std::io::{Cursor, Seek, SeekFrom, Write};

	#[test_log::test]
	fn cursor_capabilities() {
		let mut cursor = Cursor::new(vec![0u8; 256]);
		cursor.seek(SeekFrom::Start(10)).unwrap();

		assert_eq!(cursor.stream_len_hack().unwrap(), 256);
		// The position is restored
		assert_eq!(cursor.stream_position().unwrap(), 10);

		Truncate::truncate(&mut cursor, 128).unwrap();
		assert_eq!(Length::len(&cursor).unwrap(), 128);
	}

	#[test_log::test]
	fn file_capabilities() {
		let mut file = tempfile::tempfile().unwrap();
		file.write_all(&[1; 300]).unwrap();

		assert_eq!(Length::len(&file).unwrap(), 300);

		Truncate::truncate(&mut file, 172).unwrap();
		assert_eq!(Length::len(&file).unwrap(), 172);
		assert_eq!(file.stream_len_hack().unwrap(), 172);
	}
}
