use std::time::Duration;

// Timer intervals
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const FADE_FRAME_INTERVAL: Duration = Duration::from_millis(16);

// Memory
pub const BYTES_PER_MIB: u64 = 1024 * 1024;
/// Added to the host-reported available memory, which consistently under-reports.
pub const AVAILABLE_OFFSET_MIB: u64 = 512;

// Alpha
pub const ALPHA_CHANNEL_COUNT: usize = 2;
/// Below this composed opacity the label hides; above it, the label shows.
pub const ALPHA_CUTOFF_THRESHOLD: f32 = 0.01;

// Default geometry, in pixels
pub const DEFAULT_GESTURE_MARGIN_PX: i32 = 48;
pub const DEFAULT_THREE_BUTTON_MARGIN_PX: i32 = 144;

// Default animation
pub const DEFAULT_FADE_MS: u64 = 250;
