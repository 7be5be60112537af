//! Read MPEG audio stream details, and read and write ID3v1 and ID3v2 tags of MP3 files.
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! # fn main() -> mp3info::error::Result<()> {
//! use mp3info::track::Track;
//!
//! let track = Track::open("test.mp3")?;
//!
//! if let Some(summary) = track.summary() {
//! 	println!(
//! 		"MPEG {} Layer {}, {} kbps",
//! 		summary.mpeg_version(),
//! 		summary.layer(),
//! 		summary.bitrate()
//! 	);
//! }
//!
//! // The version independent view of the tags
//! println!("{:?}", track.universal().title());
//! # Ok(())
//! # }
//! ```
//!
//! ## Only reading the tags
//!
//! ```rust,no_run
//! # fn main() -> mp3info::error::Result<()> {
//! use mp3info::config::ParseOptions;
//! use mp3info::track::Track;
//!
//! let options = ParseOptions::new().parse_audio(false);
//! let track = Track::open_with_options("test.mp3", options)?;
//!
//! if let Some(version) = track.id3v2().version() {
//! 	println!("ID3v{version}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing tags
//!
//! ```rust,no_run
//! # fn main() -> mp3info::error::Result<()> {
//! use mp3info::track::Track;
//!
//! let mut track = Track::open("test.mp3")?;
//!
//! // Written to both the ID3v1 and ID3v2 tags
//! track.universal_mut().set_artist(String::from("Foo artist"));
//!
//! // Only written to the ID3v2 tag
//! track.id3v2_mut().insert("TCOM", "Foo composer");
//!
//! track.commit()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Important format-specific notes
//!
//! ID3v2 tags of any version are read, but they are always written as ID3v2.3.0.
//! Be sure to read the module documentation of [`id3`] for important notes and warnings.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod id3;
pub(crate) mod macros;
pub mod mpeg;
pub mod source;
pub mod track;
mod util;

pub use util::text::TextEncoding;

pub use util::{bits, io};
