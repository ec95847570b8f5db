use crate::constants::*;
use crate::dsp::clamp;
use crate::prefs::Theme;
use std::time::Duration;

/// Dynamics settings for the master compressor.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressorSettings {
    pub threshold_db: f32,
    pub knee_db: f32,
    pub ratio: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            threshold_db: COMPRESSOR_THRESHOLD_DB,
            knee_db: COMPRESSOR_KNEE_DB,
            ratio: COMPRESSOR_RATIO,
            attack_sec: COMPRESSOR_ATTACK_SEC,
            release_sec: COMPRESSOR_RELEASE_SEC,
        }
    }
}

/// Everything tunable about the sound layer, defaulting to the tuned constants.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundConfig {
    pub boost: f32,
    pub dry_gain: f32,
    pub wet_gain: f32,
    pub compressor: CompressorSettings,
    pub reverb_seconds: f32,
    pub reverb_decay: f32,
    pub default_volume: f32,
    pub default_theme: Theme,
    pub hover_debounce: Duration,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            boost: SFX_BOOST,
            dry_gain: MASTER_DRY_GAIN,
            wet_gain: MASTER_WET_GAIN,
            compressor: CompressorSettings::default(),
            reverb_seconds: REVERB_SECONDS,
            reverb_decay: REVERB_DECAY,
            default_volume: DEFAULT_VOLUME,
            default_theme: Theme::Light,
            hover_debounce: Duration::from_millis(HOVER_DEBOUNCE_MS),
        }
    }
}

impl SoundConfig {
    /// Dry master gain after the global boost.
    pub fn master_dry(&self) -> f32 {
        clamp(self.dry_gain * self.boost, 0.0, MASTER_DRY_MAX)
    }

    /// Wet master gain after the global boost.
    pub fn master_wet(&self) -> f32 {
        clamp(self.wet_gain * self.boost, 0.0, MASTER_WET_MAX)
    }
}
