// Indexed by [version][layer - 1][bitrate index - 1]
pub(super) const BITRATES: [[[u32; 14]; 3]; 3] = [
	// MPEG 1
	[
		[
			32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448,
		],
		[
			32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384,
		],
		[
			32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320,
		],
	],
	// MPEG 2
	[
		[
			32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256,
		],
		[8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
		[8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
	],
	// MPEG 2.5
	[
		[
			32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256,
		],
		[8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
		[8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
	],
];

// Indexed by [version][sample rate index]
pub(super) const SAMPLE_RATES: [[u32; 3]; 3] = [
	[44100, 48000, 32000],
	[22050, 24000, 16000],
	[11025, 12000, 8000],
];

// Indexed by [layer - 1][version]
pub(super) const SAMPLES_PER_FRAME: [[u16; 3]; 3] = [[384, 384, 384], [1152, 1152, 1152], [1152, 576, 576]];

// Offset of a Xing header from the end of the frame header, indexed by [version != 1][is mono]
pub(super) const XING_OFFSETS: [[i64; 2]; 2] = [[32, 17], [17, 9]];

pub(super) const MAX_SEARCH_WINDOW: u64 = 2_000_000;
pub(super) const FIRST_FRAME_ATTEMPTS: usize = 5;
pub(super) const VBR_SAMPLE_FRAMES: usize = 100;
