use crate::util::{
	cbr_stream, id3v1_tag, id3v23_tag, temp_track, v3_text_frame, vbr_stream,
	xing_stream,
};
use mp3info::config::ParseOptions;
use mp3info::error::ErrorKind;
use mp3info::mpeg::{ChannelMode, Layer, MpegVersion};
use mp3info::track::Track;

fn assert_duration(actual: f64, expected: f64) {
	assert!(
		(actual - expected).abs() < 1e-9,
		"expected a duration of {expected}, got {actual}"
	);
}

#[test_log::test]
fn read_cbr() {
	let track = Track::from_buffer(cbr_stream(10), ParseOptions::new()).unwrap();
	let summary = track.summary().unwrap();

	assert_eq!(summary.mpeg_version(), MpegVersion::V1);
	assert_eq!(summary.layer(), Layer::Layer3);
	assert_eq!(summary.channel_mode(), ChannelMode::JointStereo);
	assert_eq!(summary.sample_rate(), 44100);
	assert_eq!(summary.bitrate(), 128);
	assert!(!summary.is_vbr());
	assert_eq!(summary.first_frame_offset(), 0);

	// 4170 bytes at 128 kbps
	assert_duration(summary.duration_seconds(), 4170.0 * 8.0 / 1000.0 / 128.0);
	assert_duration(track.frame_length().unwrap(), 1152.0 / 44100.0);

	assert!(!track.has_tag());
	assert_eq!(track.audio_content(), (0, 4170));
}

#[test_log::test]
fn read_vbr_by_scanning() {
	let track = Track::from_buffer(vbr_stream(20), ParseOptions::new()).unwrap();
	let summary = track.summary().unwrap();

	assert!(summary.is_vbr());
	// Average of 128 and 160
	assert_eq!(summary.bitrate(), 144);
	assert_duration(summary.duration_seconds(), 20.0 * 1152.0 / 44100.0);
}

#[test_log::test]
fn read_xing() {
	let track = Track::from_buffer(xing_stream(1000, 417_000, 2), ParseOptions::new()).unwrap();
	let summary = track.summary().unwrap();

	assert!(summary.is_vbr());
	assert_eq!(summary.bitrate(), 124);
	assert_duration(summary.duration_seconds(), 1000.0 * 1152.0 / 44100.0);
}

#[test_log::test]
fn xing_without_frame_count() {
	let err = Track::from_buffer(xing_stream(0, 417_000, 2), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::BadVbrHeader));
}

#[test_log::test]
fn junk_before_first_frame() {
	let mut content = vec![0x20; 10];
	content.extend(cbr_stream(5));

	let track = Track::from_buffer(content, ParseOptions::new()).unwrap();
	assert_eq!(track.summary().unwrap().first_frame_offset(), 10);
}

#[test_log::test]
fn first_frame_after_id3v2() {
	let tag = id3v23_tag(&[v3_text_frame("TIT2", "Foo title")], 0);
	let tag_len = tag.len() as u64;

	let mut content = tag;
	content.extend(cbr_stream(5));
	content.extend(id3v1_tag("Bar title", 1));

	let track = Track::from_buffer(content, ParseOptions::new()).unwrap();
	assert_eq!(track.summary().unwrap().first_frame_offset(), tag_len);
	assert_eq!(track.audio_content(), (tag_len, 5 * 417));
	assert_eq!(track.frames().unwrap().count(), 5);
}

#[test_log::test]
fn skip_tag_without_parsing() {
	let tag = id3v23_tag(&[v3_text_frame("TIT2", "Foo title")], 64);
	let tag_len = tag.len() as u64;

	let mut content = tag;
	content.extend(cbr_stream(5));

	let track =
		Track::from_buffer(content, ParseOptions::new().parse_tags(false)).unwrap();
	assert!(!track.has_id3v2());
	assert_eq!(track.summary().unwrap().first_frame_offset(), tag_len);
}

#[test_log::test]
fn no_audio_properties() {
	let track =
		Track::from_buffer(cbr_stream(5), ParseOptions::new().parse_audio(false)).unwrap();
	assert!(track.summary().is_none());
	assert!(track.frame_length().is_none());

	// Frames are still reachable
	assert_eq!(track.frames().unwrap().count(), 5);
}

#[test_log::test]
fn frame_iteration_stops_on_invalid_header() {
	let mut content = cbr_stream(3);
	content.extend([0; 417]);

	let track =
		Track::from_buffer(content, ParseOptions::new().parse_audio(false)).unwrap();
	let mut frames = track.frames().unwrap();

	for _ in 0..3 {
		let header = frames.next().unwrap().unwrap();
		assert_eq!(header.bitrate(), 128);
	}

	let err = frames.next().unwrap().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidFrameHeader));
	assert!(frames.next().is_none());
}

#[test_log::test]
fn no_valid_frame() {
	let err = Track::from_buffer(vec![0; 128], ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NoValidFrame));
}

#[test_log::test]
fn empty_source() {
	let err = Track::from_buffer(Vec::new(), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::EmptySource));

	let (_dir, path) = temp_track(&[]);
	let err = Track::open(&path).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::EmptySource));
}

#[test_log::test]
fn display() {
	let mut content = cbr_stream(10);
	content.extend(id3v1_tag("Foo title", 3));

	let track = Track::from_buffer(content, ParseOptions::new()).unwrap();
	let display = track.to_string();

	assert!(display.starts_with("MPEG 1 Layer 3 CBR 128 Kbps JStereo 44100 Hz length "));
	assert!(display.contains("\ntag1: "));
	assert!(!display.contains("\ntag2: "));
}
