#![allow(missing_docs)]

use mp3info::config::ParseOptions;
use mp3info::track::Track;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "mp3_summary", about = "Print the stream details and tags of an MP3 file")]
struct Opt {
	/// Skip reading the audio stream
	#[structopt(long)]
	tags_only: bool,

	/// Count the frames of the stream
	#[structopt(short, long)]
	count_frames: bool,

	#[structopt(short, long)]
	title: Option<String>,

	#[structopt(short, long)]
	artist: Option<String>,

	#[structopt(short = "A", long)]
	album: Option<String>,

	#[structopt(parse(from_os_str))]
	path: PathBuf,
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	let options = ParseOptions::new().parse_audio(!opt.tags_only);
	let mut track =
		Track::open_with_options(&opt.path, options).expect("ERROR: Failed to read file!");

	println!("{track}");

	if let Some(summary) = track.summary() {
		let duration = summary.duration();
		let seconds = duration.as_secs() % 60;

		println!("--- Audio Properties ---");
		println!("Bitrate: {} kbps", summary.bitrate());
		println!("Sample Rate: {} Hz", summary.sample_rate());
		println!(
			"Duration: {:02}:{:02}",
			(duration.as_secs() - seconds) / 60,
			seconds
		);
		println!("First frame: {}", summary.first_frame_offset());
	}

	if opt.count_frames {
		let frames = track.frames().expect("ERROR: Failed to locate the frames!");
		let count = frames.filter(Result::is_ok).count();
		println!("Frames: {count}");
	}

	let universal = track.universal();
	println!("--- Tag Information ---");
	println!("Title: {}", universal.title().unwrap_or("None"));
	println!("Artist: {}", universal.artist().unwrap_or("None"));
	println!("Album: {}", universal.album().unwrap_or("None"));
	println!("Genre: {}", universal.genre_name().unwrap_or("None"));

	if let Opt {
		title: None,
		artist: None,
		album: None,
		..
	} = opt
	{
		return;
	}

	let universal = track.universal_mut();
	if let Some(title) = opt.title {
		universal.set_title(title);
	}

	if let Some(artist) = opt.artist {
		universal.set_artist(artist);
	}

	if let Some(album) = opt.album {
		universal.set_album(album);
	}

	track.commit().expect("ERROR: Failed to write the tags!");
	println!("INFO: Tags successfully updated!");
}
