use crate::error::Result;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v1::write::write_id3v1;

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Rewrites the trailing ID3v1 tag of the file at `path` in place
pub(crate) fn write_id3v1_to_path(path: &Path, tag: &Id3v1Tag) -> Result<()> {
	let mut file = OpenOptions::new().read(true).write(true).open(path)?;
	write_id3v1(&mut file, tag)
}

/// Replaces the ID3v2 tag at the start of the file at `path` with `tag_bytes`
///
/// `old_tag_end` is where the audio begins in the current file (`None` if it has no tag).
/// The new file is assembled in a temporary file next to the original, which is then renamed
/// over it. The original is not touched until the new file is complete.
pub(crate) fn rewrite_id3v2(path: &Path, tag_bytes: &[u8], old_tag_end: Option<u64>) -> Result<()> {
	let parent = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut temp_file = NamedTempFile::new_in(parent)?;
	log::debug!(
		"ID3v2: Writing {} byte tag through `{}`",
		tag_bytes.len(),
		temp_file.path().display()
	);

	{
		let mut original = BufReader::new(File::open(path)?);
		original.seek(SeekFrom::Start(old_tag_end.unwrap_or(0)))?;

		let mut writer = BufWriter::new(temp_file.as_file_mut());
		writer.write_all(tag_bytes)?;
		std::io::copy(&mut original, &mut writer)?;
		writer.flush()?;
	}

	if let Err(e) = temp_file.persist(path) {
		log::warn!(
			"Unable to rename `{}` over `{}` ({}), copying instead",
			e.file.path().display(),
			path.display(),
			e.error
		);

		// The temporary file is deleted once `e.file` is dropped
		std::fs::copy(e.file.path(), path)?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::rewrite_id3v2;

	use std::io::Write;

	#[test_log::test]
	fn replace_tag() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("track.mp3");

		let mut contents = b"OLDTAG".to_vec();
		contents.extend([0xFF; 10]);
		std::fs::File::create(&path)
			.unwrap()
			.write_all(&contents)
			.unwrap();

		rewrite_id3v2(&path, b"NEW", Some(6)).unwrap();

		let mut expected = b"NEW".to_vec();
		expected.extend([0xFF; 10]);
		assert_eq!(std::fs::read(&path).unwrap(), expected);

		// No previous tag
		rewrite_id3v2(&path, b"ID3", None).unwrap();

		let mut expected_prefixed = b"ID3".to_vec();
		expected_prefixed.extend(expected);
		assert_eq!(std::fs::read(&path).unwrap(), expected_prefixed);

		// Only the rewritten file remains
		assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
	}
}
