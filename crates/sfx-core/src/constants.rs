// Tuning constants for the site's sound layer. Gains and boosts were set by ear.

// Global loudness boost applied to every effect and to the master bus
pub const SFX_BOOST: f32 = 1.55;
pub const SFX_CLICK_EXTRA: f32 = 1.25; // clicks only slightly louder
pub const SFX_OTHER_EXTRA: f32 = 4.0; // hover + nav
pub const SFX_WHOOSH_EXTRA: f32 = 5.0; // page transitions

pub const PEAK_CLICK_MAX: f32 = 0.75;
pub const PEAK_OTHER_MAX: f32 = 0.95;
pub const PEAK_WHOOSH_MAX: f32 = 0.98;

// Master bus
pub const MASTER_DRY_GAIN: f32 = 0.62;
pub const MASTER_DRY_MAX: f32 = 1.0;
pub const MASTER_WET_GAIN: f32 = 0.26;
pub const MASTER_WET_MAX: f32 = 0.6;

pub const COMPRESSOR_THRESHOLD_DB: f32 = -22.0;
pub const COMPRESSOR_KNEE_DB: f32 = 18.0;
pub const COMPRESSOR_RATIO: f32 = 2.7;
pub const COMPRESSOR_ATTACK_SEC: f32 = 0.008;
pub const COMPRESSOR_RELEASE_SEC: f32 = 0.22;

// Short, soft reverb tail
pub const REVERB_SECONDS: f32 = 0.9;
pub const REVERB_DECAY: f32 = 2.4;

// Envelope floor (exponential ramps cannot reach zero)
pub const ENVELOPE_FLOOR: f32 = 0.0001;
pub const ENVELOPE_MIN_PEAK: f32 = 0.0002;

// Noise colouring: one-pole smoothing coefficients
pub const NOISE_SMOOTH_KEEP: f32 = 0.93;
pub const NOISE_SMOOTH_MIX: f32 = 0.07;

// Ambience bed (dark theme only)
pub const AMBIENCE_NOISE_SECONDS: f32 = 3.0;
pub const AMBIENCE_HIGHPASS_HZ: f32 = 26.0;
pub const AMBIENCE_HIGHPASS_Q: f32 = 0.7;
pub const AMBIENCE_LOWPASS_HZ: f32 = 190.0;
pub const AMBIENCE_LOWPASS_Q: f32 = 0.6;
pub const AMBIENCE_NOISE_GAIN: f32 = 0.012;
pub const AMBIENCE_TONE_LOW_HZ: f32 = 55.0;
pub const AMBIENCE_TONE_HIGH_HZ: f32 = 110.0;
pub const AMBIENCE_TONE_DETUNE_CENTS: f32 = 3.0;
pub const AMBIENCE_TONE_LOWPASS_HZ: f32 = 160.0;
pub const AMBIENCE_TONE_LOWPASS_Q: f32 = 0.8;
pub const AMBIENCE_TONE_GAIN: f32 = 0.006;
pub const AMBIENCE_LFO_HZ: f32 = 0.08;
pub const AMBIENCE_LFO_DEPTH: f32 = 0.003;

// Gesture routing
pub const HOVER_DEBOUNCE_MS: u64 = 70;

// Preferences
pub const DEFAULT_VOLUME: f32 = 0.18;
pub const THEME_KEY: &str = "theme";
pub const VOLUME_KEY: &str = "bgmVolume";

// Background music track
pub const BGM_URL: &str = "/audio/bgm.mp3";
