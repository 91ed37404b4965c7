// Shared tuning constants and element-id conventions for the bridge.

// Rotary controls
pub const ROTARY_SWEEP_DEG: f32 = 270.0; // visual sweep for a full normalized range
pub const ROTARY_AXIS_SENSITIVITY: f32 = 0.005; // value per pixel for the combined-axis gesture
pub const ROTARY_ELEMENT_PREFIX: &str = "slider-";
pub const DEFAULT_ROTARY_IDS: [&str; 4] = ["speed", "twist", "hue", "density"];

// Volume slider
pub const VOLUME_PARAM_ID: &str = "volume";
pub const VOLUME_DEFAULT: f32 = 0.8;
pub const VOLUME_TRACK_ID: &str = "volume-slider";
pub const VOLUME_THUMB_ID: &str = "volume-thumb";

// Toggle buttons: (id, off, on)
pub const DEFAULT_TOGGLES: [(&str, f32, f32); 2] = [("b1", 0.0, 1.0), ("b2", 1.0, 2.0)];
pub const TOGGLE_ON_FILL: &str = "#58e0c0";
pub const TOGGLE_OFF_FILL: &str = "#2a3140";

// Reserved visual-trigger tags from the engine's outbound stream
pub const TAG_FLASH: &str = "flash";
pub const TAG_POST_TOGGLE: &str = "post";

// Page bootstrap
pub const PATCH_EXPORT_URL: &str = "export/patch.export.json";
pub const CANVAS_ID: &str = "three-container";
pub const CONFIG_ELEMENT_ID: &str = "bridge-config";

// Analyser band layout (byte frequency data, fft size 512)
pub const ANALYSER_FFT_SIZE: u32 = 512;
pub const BASS_BINS: (usize, usize) = (0, 50);
pub const MID_BINS: (usize, usize) = (50, 200);
pub const TREBLE_BINS: (usize, usize) = (200, 512);

// Visual timing
pub const TIME_STEP_PER_SEC: f32 = 3.0; // 0.05 per frame at 60 Hz
pub const SHAKE_PER_BASS: f32 = 0.05;
pub const FLASH_DECAY_PER_SEC: f32 = 4.0;
pub const BAND_SMOOTHING_TAU_SEC: f32 = 0.08;
