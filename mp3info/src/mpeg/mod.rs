//! MPEG audio frame parsing
//!
//! ## Stream details
//!
//! The [`StreamSummary`] of a [`Track`](crate::track::Track) is found by locating the first
//! valid [`FrameHeader`], then either reading a "Xing" header directly following it, or sampling
//! the first 100 frames. If the sampled average bitrate differs from the bitrate of the first frame,
//! the whole stream is scanned and the stream is considered VBR.

mod constants;
mod header;
mod properties;
mod scan;

pub use header::{ChannelMode, FrameHeader, Layer, MpegVersion};
pub use properties::StreamSummary;
pub use scan::{FrameIter, find_next_frame};

pub(crate) use properties::{AudioRegion, read_stream_summary};
pub(crate) use scan::locate_first_frame;
