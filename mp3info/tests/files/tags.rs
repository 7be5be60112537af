use crate::util::{cbr_stream, id3v1_tag, id3v23_tag, temp_track, v3_text_frame};
use mp3info::config::ParseOptions;
use mp3info::error::ErrorKind;
use mp3info::id3::v2::{FrameValue, Id3v2Version};
use mp3info::source::ByteSource;
use mp3info::track::{self, Track};

// An ID3v2.2 tag with a single `TT2` frame
fn id3v22_tag(title: &str) -> Vec<u8> {
	let mut body = vec![0];
	body.extend(title.as_bytes());

	let mut frame = b"TT2".to_vec();
	frame.extend(&(body.len() as u32).to_be_bytes()[1..]);
	frame.extend(body);

	let mut tag = b"ID3\x02\x00\x00\x00\x00\x00".to_vec();
	tag.push(frame.len() as u8);
	tag.extend(frame);
	tag
}

#[test_log::test]
fn write_universal_tag() {
	let audio = cbr_stream(10);
	let (_dir, path) = temp_track(&audio);

	let mut track = Track::open(&path).unwrap();
	assert!(!track.has_tag());

	let universal = track.universal_mut();
	universal.set_title(String::from("Foo title"));
	universal.set_artist(String::from("Foo artist"));
	universal.year = Some(2004);
	universal.track_number = Some(3);
	track.commit().unwrap();

	let committed_offset = track.summary().unwrap().first_frame_offset();

	let track = Track::open(&path).unwrap();
	assert!(track.has_id3v1());
	assert!(track.has_id3v2());
	assert_eq!(track.id3v2().version().as_deref(), Some("2.3.0"));
	assert_eq!(track.id3v2().original_version(), Some(Id3v2Version::V3));

	assert_eq!(track.id3v2().get_text("TIT2"), Some("Foo title"));
	assert_eq!(track.id3v2().get_text("TPE1"), Some("Foo artist"));
	assert_eq!(track.id3v2().get_text("TYER"), Some("2004"));
	assert_eq!(track.id3v2().get_text("TRCK"), Some("3"));

	let id3v1 = track.id3v1().unwrap();
	assert_eq!(id3v1.title(), Some("Foo title"));
	assert_eq!(id3v1.year, Some(2004));
	assert_eq!(id3v1.track_number, Some(3));

	assert_eq!(track.universal().title(), Some("Foo title"));
	assert_eq!(track.universal().track_number, Some(3));

	// The audio is untouched
	let summary = track.summary().unwrap();
	assert_eq!(summary.first_frame_offset(), committed_offset);
	assert_eq!(summary.bitrate(), 128);

	let (start, len) = track.audio_content();
	assert_eq!(start, committed_offset);
	assert_eq!(len, audio.len() as u64);

	let content = std::fs::read(&path).unwrap();
	assert_eq!(&content[start as usize..(start + len) as usize], audio.as_slice());
	assert_eq!(content.len() as u64, start + len + 128);
}

#[test_log::test]
fn commit_without_changes() {
	let mut content = id3v23_tag(&[v3_text_frame("TIT2", "Foo title")], 32);
	content.extend(cbr_stream(5));
	content.extend(id3v1_tag("Foo title", 1));
	let (_dir, path) = temp_track(&content);

	let mut track = Track::open(&path).unwrap();
	track.commit().unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), content);

	// A second commit after a change writes nothing
	track.id3v2_mut().insert("TALB", "Foo album");
	track.commit().unwrap();
	let committed = std::fs::read(&path).unwrap();

	track.commit().unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), committed);
}

#[test_log::test]
fn single_frame_tag() {
	let (_dir, path) = temp_track(&cbr_stream(5));

	let mut track = Track::open(&path).unwrap();
	track.id3v2_mut().insert("TIT2", "X");
	track.commit().unwrap();

	let track = Track::open(&path).unwrap();
	assert_eq!(track.id3v2().version().as_deref(), Some("2.3.0"));
	assert_eq!(track.id3v2().get_text("TIT2"), Some("X"));
	assert_eq!(track.universal().title(), Some("X"));

	// Only the ID3v2 tag was edited
	assert!(!track.has_id3v1());
}

#[test_log::test]
fn remove_id3v1() {
	let mut content = cbr_stream(5);
	content.extend(id3v1_tag("Foo title", 1));
	let (_dir, path) = temp_track(&content);

	let mut track = Track::open(&path).unwrap();
	assert_eq!(track.id3v1().unwrap().title(), Some("Foo title"));
	assert_eq!(track.universal().title(), Some("Foo title"));

	assert!(track.remove_id3v1().is_some());
	track.commit().unwrap();

	assert_eq!(std::fs::read(&path).unwrap().len(), content.len() - 128);
	assert!(!track::has_id3v1_tag(&path).unwrap());

	let track = Track::open(&path).unwrap();
	assert!(!track.has_id3v1());
	assert_eq!(track.audio_content(), (0, 5 * 417));
}

#[test_log::test]
fn remove_id3v2() {
	let audio = cbr_stream(5);
	let mut content = id3v23_tag(&[v3_text_frame("TIT2", "Foo title")], 100);
	content.extend(&audio);
	let (_dir, path) = temp_track(&content);

	let mut track = Track::open(&path).unwrap();
	assert!(track.has_id3v2());

	track.remove_id3v2();
	track.commit().unwrap();

	assert_eq!(std::fs::read(&path).unwrap(), audio);
	assert!(!track.has_id3v2());
	assert_eq!(track.summary().unwrap().first_frame_offset(), 0);
	assert_eq!(track.audio_content(), (0, audio.len() as u64));
}

#[test_log::test]
fn upgrade_id3v22() {
	let mut content = id3v22_tag("Foo title");
	content.extend(cbr_stream(5));
	let (_dir, path) = temp_track(&content);

	let mut track = Track::open(&path).unwrap();
	assert_eq!(track.id3v2().version().as_deref(), Some("2.2.0"));
	assert_eq!(track.id3v2().get_text("TT2"), Some("Foo title"));
	assert_eq!(track.universal().title(), Some("Foo title"));

	track.universal_mut().set_artist(String::from("Foo artist"));
	track.commit().unwrap();

	let track = Track::open(&path).unwrap();
	assert_eq!(track.id3v2().version().as_deref(), Some("2.3.0"));
	assert!(track.id3v2().get("TT2").is_none());
	assert_eq!(track.id3v2().get_text("TIT2"), Some("Foo title"));
	assert_eq!(track.id3v2().get_text("TPE1"), Some("Foo artist"));
}

#[test_log::test]
fn edited_id3v1_is_kept() {
	let (_dir, path) = temp_track(&cbr_stream(5));

	let mut track = Track::open(&path).unwrap();
	track.id3v1_mut().set_title(String::from("Foo title"));
	track.universal_mut().set_title(String::from("Bar title"));
	track.flush().unwrap();

	assert_eq!(track.id3v1().unwrap().title(), Some("Foo title"));
	assert_eq!(track.id3v2().get_text("TIT2"), Some("Bar title"));
	// Read from the ID3v2 tag
	assert_eq!(track.universal().title(), Some("Bar title"));
}

#[test_log::test]
fn multiple_values() {
	let (_dir, path) = temp_track(&cbr_stream(5));

	let mut track = Track::open(&path).unwrap();
	track.id3v2_mut().push("TPE1", "Foo artist");
	track.id3v2_mut().push("TPE1", "Bar artist");
	track.flush().unwrap();

	let values: Vec<&FrameValue> = track.id3v2().get_all("TPE1").collect();
	assert_eq!(
		values,
		[
			&FrameValue::from("Foo artist"),
			&FrameValue::from("Bar artist")
		]
	);
	assert_eq!(track.universal().artist(), Some("Foo artist"));
}

#[test_log::test]
fn leading_id3v1() {
	let mut content = id3v1_tag("Foo title", 7);
	content.extend(cbr_stream(5));

	let track = Track::from_buffer(content, ParseOptions::new()).unwrap();
	assert_eq!(track.id3v1().unwrap().title(), Some("Foo title"));
	assert_eq!(track.universal().track_number, Some(7));
	assert_eq!(track.universal().genre_name(), Some("Rock"));
	assert_eq!(track.summary().unwrap().first_frame_offset(), 128);
}

#[test_log::test]
fn buffer_not_writable() {
	let mut track = Track::from_buffer(cbr_stream(5), ParseOptions::new()).unwrap();

	// Nothing to write
	track.commit().unwrap();

	track.universal_mut().set_title(String::from("Foo title"));
	let err = track.commit().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NotWritable));
}

#[test_log::test]
fn commit_without_tag_parsing() {
	let content = cbr_stream(5);
	let (_dir, path) = temp_track(&content);

	let mut track =
		Track::open_with_options(&path, ParseOptions::new().parse_tags(false)).unwrap();
	track.universal_mut().set_title(String::from("Foo title"));
	track.commit().unwrap();

	assert_eq!(std::fs::read(&path).unwrap(), content);
}

#[test_log::test]
fn path_helpers() {
	let mut content = id3v23_tag(&[v3_text_frame("TIT2", "Foo title")], 0);
	content.extend(cbr_stream(5));
	content.extend(id3v1_tag("Foo title", 1));
	let (_dir, path) = temp_track(&content);

	assert!(track::has_id3v1_tag(&path).unwrap());
	assert!(track::has_id3v2_tag(&path).unwrap());

	track::remove_id3v1_tag(&path).unwrap();
	assert!(!track::has_id3v1_tag(&path).unwrap());
	assert!(track::has_id3v2_tag(&path).unwrap());

	track::remove_id3v2_tag(&path).unwrap();
	assert!(!track::has_id3v2_tag(&path).unwrap());
	assert_eq!(std::fs::read(&path).unwrap(), cbr_stream(5));

	// Removing a missing tag is a no-op
	track::remove_id3v1_tag(&path).unwrap();
	track::remove_id3v2_tag(&path).unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), cbr_stream(5));
}

#[test_log::test]
fn empty_id3v1_trailer() {
	let mut content = cbr_stream(10);
	content.extend(b"TAG");
	content.extend([0; 124]);
	content.push(0xFF);
	let (_dir, path) = temp_track(&content);

	let mut track = Track::open(&path).unwrap();
	assert!(!track.has_id3v1());
	assert!(!track.has_tag());
	// The block still bounds the audio
	assert_eq!(track.audio_content(), (0, 10 * 417));

	track.commit().unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), content);

	// Filling it in overwrites the block in place
	track.id3v1_mut().set_title(String::from("Foo title"));
	track.commit().unwrap();

	let written = std::fs::read(&path).unwrap();
	assert_eq!(written.len(), content.len());
	assert_eq!(&written[10 * 417 + 3..10 * 417 + 12], b"Foo title");
}

#[test_log::test]
fn rename_file() {
	let content = cbr_stream(5);
	let (dir, path) = temp_track(&content);
	let new_path = dir.path().join("renamed.mp3");

	let mut track = Track::open(&path).unwrap();
	track.universal_mut().set_title(String::from("Foo title"));
	track.rename(&new_path);
	track.commit().unwrap();

	// The original is untouched
	assert_eq!(std::fs::read(&path).unwrap(), content);
	assert!(matches!(track.source(), ByteSource::File(p) if *p == new_path));

	let renamed = Track::open(&new_path).unwrap();
	assert_eq!(renamed.id3v2().get_text("TIT2"), Some("Foo title"));
	assert_eq!(renamed.id3v1().unwrap().title(), Some("Foo title"));

	let (start, len) = renamed.audio_content();
	let written = std::fs::read(&new_path).unwrap();
	assert_eq!(&written[start as usize..(start + len) as usize], content.as_slice());

	// Later commits go to the new path
	track.universal_mut().set_artist(String::from("Foo artist"));
	track.commit().unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), content);
	assert_eq!(
		Track::open(&new_path).unwrap().id3v2().get_text("TPE1"),
		Some("Foo artist")
	);
}

#[test_log::test]
fn rename_buffer() {
	let content = cbr_stream(5);
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("from_buffer.mp3");

	let mut track = Track::from_buffer(content.clone(), ParseOptions::new()).unwrap();
	track.id3v2_mut().insert("TIT2", "Foo title");
	track.rename(&path);
	track.commit().unwrap();

	let track = Track::open(&path).unwrap();
	assert_eq!(track.id3v2().get_text("TIT2"), Some("Foo title"));
	assert_eq!(track.frames().unwrap().count(), 5);
	assert!(std::fs::read(&path).unwrap().ends_with(&content));
}
