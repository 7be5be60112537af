//! Various configuration options to control mp3info

mod parse_options;

pub use parse_options::ParseOptions;
