//! Constants used throughout the pipeline

/// Index of the nose bridge point within the detector's nose point sequence
pub const NOSE_BRIDGE_INDEX: usize = 3;

/// Index of the nose tip point within the detector's nose point sequence
pub const NOSE_TIP_INDEX: usize = 6;

/// Minimum number of nose points required to address the nose tip
pub const MIN_NOSE_POINTS: usize = 7;

/// Scale factor applied to the normalized nose offset to produce yaw
pub const YAW_SCALE: f64 = 100.0;

/// Scale factor applied to the normalized nose drop to produce pitch
pub const PITCH_SCALE: f64 = 50.0;

/// Neutral-pose offset subtracted from the normalized nose drop
pub const PITCH_NEUTRAL_OFFSET: f64 = 1.5;

/// Yaw magnitude above which the yaw branch of the classifier engages
pub const DEFAULT_YAW_THRESHOLD: f64 = 12.0;

/// Pitch magnitude above which the pitch branch of the classifier engages
pub const DEFAULT_PITCH_THRESHOLD: f64 = 10.0;

/// Pitch values below this (with low yaw) classify as Up
pub const DEFAULT_PITCH_UPPER_BOUND: f64 = 90.0;

/// Pitch values above this (with low yaw) classify as Down
pub const DEFAULT_PITCH_LOWER_BOUND: f64 = 140.0;

/// Yaw must stay below this for the Up/Down branches to fire
pub const YAW_VERTICAL_GATE: f64 = 10.0;

/// Yaw must exceed this for the Left branch to fire
pub const YAW_LEFT_BOUND: f64 = 15.0;

/// Minimum elapsed milliseconds between two accepted captures
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u64 = 100;

/// Fixed period of the frame scheduler in milliseconds
pub const DEFAULT_TICK_PERIOD_MS: u64 = 100;

/// Side length of the square capture canvas in pixels
pub const DEFAULT_CAPTURE_SIZE: u32 = 224;

/// Pixels trimmed from the bounding box extent before cropping
pub const DEFAULT_CROP_INSET_PX: u32 = 50;

/// JPEG quality for encoded captures (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Captures collected per target direction before advancing
pub const DEFAULT_CAPTURES_PER_DIRECTION: u32 = 5;
