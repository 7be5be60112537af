//! Where a [`Track`](crate::track::Track) reads its data from

use crate::error::Result;

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// The byte source of a [`Track`](crate::track::Track)
///
/// Only file sources can be written to. The source is opened for the duration of
/// each operation, and closed before it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
	/// A file on disk
	File(PathBuf),
	/// An in-memory buffer
	Buffer(Vec<u8>),
}

impl ByteSource {
	/// The path of a file source
	pub fn path(&self) -> Option<&Path> {
		match self {
			Self::File(path) => Some(path),
			Self::Buffer(_) => None,
		}
	}

	/// Opens the source for reading
	///
	/// # Errors
	///
	/// The file could not be opened
	pub(crate) fn reader(&self) -> Result<SourceReader<'_>> {
		match self {
			Self::File(path) => {
				log::debug!("Opening `{}` for reading", path.display());
				Ok(SourceReader::File(BufReader::new(File::open(path)?)))
			},
			Self::Buffer(buffer) => Ok(SourceReader::Buffer(Cursor::new(buffer.as_slice()))),
		}
	}

	/// Whether the source can be written to
	pub(crate) fn is_writable(&self) -> bool {
		match self {
			Self::File(path) => std::fs::metadata(path)
				.map(|metadata| !metadata.permissions().readonly())
				.unwrap_or(false),
			Self::Buffer(_) => false,
		}
	}
}

/// An open [`ByteSource`]
pub enum SourceReader<'a> {
	/// A buffered file handle
	File(BufReader<File>),
	/// A borrowed buffer
	Buffer(Cursor<&'a [u8]>),
}

impl Read for SourceReader<'_> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		match self {
			Self::File(reader) => reader.read(buf),
			Self::Buffer(reader) => reader.read(buf),
		}
	}
}

impl Seek for SourceReader<'_> {
	fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
		match self {
			Self::File(reader) => reader.seek(pos),
			Self::Buffer(reader) => reader.seek(pos),
		}
	}
}
