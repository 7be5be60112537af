use std::io::Write as _;
use std::path::PathBuf;

use tempfile::TempDir;

/// MPEG-1 Layer III, 128 kbps, 44100 Hz, joint stereo (417 byte frames)
pub const HEADER_128: [u8; 4] = [0xFF, 0xFB, 0x90, 0x40];
/// MPEG-1 Layer III, 160 kbps, 44100 Hz, joint stereo (522 byte frames)
pub const HEADER_160: [u8; 4] = [0xFF, 0xFB, 0xA0, 0x40];

/// A single frame with a silent body
pub fn frame(header: [u8; 4]) -> Vec<u8> {
	let size = match header[2] >> 4 {
		0x9 => 417,
		0xA => 522,
		_ => unreachable!("unsupported test header"),
	};

	let mut frame = header.to_vec();
	frame.resize(size, 0);
	frame
}

/// `count` frames at 128 kbps
pub fn cbr_stream(count: usize) -> Vec<u8> {
	(0..count).flat_map(|_| frame(HEADER_128)).collect()
}

/// `count` frames alternating between 128 and 160 kbps
pub fn vbr_stream(count: usize) -> Vec<u8> {
	(0..count)
		.flat_map(|index| {
			if index % 2 == 0 {
				frame(HEADER_128)
			} else {
				frame(HEADER_160)
			}
		})
		.collect()
}

/// A 128 kbps frame carrying a Xing header, followed by `count` plain frames
pub fn xing_stream(frame_count: u32, stream_size: u32, count: usize) -> Vec<u8> {
	let mut xing = HEADER_128.to_vec();
	// MPEG-1 stereo side information
	xing.extend([0; 32]);
	xing.extend(b"Xing");
	xing.extend(0x6_u32.to_be_bytes());
	xing.extend(frame_count.to_be_bytes());
	xing.extend(stream_size.to_be_bytes());
	xing.resize(417, 0);

	xing.extend(cbr_stream(count));
	xing
}

/// An ID3v2.3 text frame with a Latin-1 body
pub fn v3_text_frame(id: &str, text: &str) -> Vec<u8> {
	let mut body = vec![0];
	body.extend(text.as_bytes());

	let mut frame = id.as_bytes().to_vec();
	frame.extend((body.len() as u32).to_be_bytes());
	frame.extend([0, 0]);
	frame.extend(body);
	frame
}

/// An ID3v2.3 tag holding `frames`, followed by `padding` zero bytes
pub fn id3v23_tag(frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
	let mut body = frames.concat();
	body.resize(body.len() + padding, 0);

	let size = body.len() as u32;
	let mut tag = b"ID3\x03\x00\x00".to_vec();
	tag.extend([
		((size >> 21) & 0x7F) as u8,
		((size >> 14) & 0x7F) as u8,
		((size >> 7) & 0x7F) as u8,
		(size & 0x7F) as u8,
	]);
	tag.extend(body);
	tag
}

/// An ID3v1 tag with a title and a track number
pub fn id3v1_tag(title: &str, track: u8) -> Vec<u8> {
	let mut tag = b"TAG".to_vec();
	let mut title = title.as_bytes().to_vec();
	title.resize(30, 0);
	tag.extend(title);
	// Artist, album, year
	tag.resize(3 + 30 + 30 + 30 + 4, 0);
	// ID3v1.1 comment
	tag.resize(tag.len() + 28, 0);
	tag.extend([0, track]);
	// Rock
	tag.push(17);
	tag
}

/// Writes `content` to a file in a new temporary directory
///
/// The directory is removed once the returned [`TempDir`] is dropped.
pub fn temp_track(content: &[u8]) -> (TempDir, PathBuf) {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("track.mp3");

	let mut file = std::fs::File::create(&path).unwrap();
	file.write_all(content).unwrap();

	(dir, path)
}
