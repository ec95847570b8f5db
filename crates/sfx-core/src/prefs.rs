//! User preferences: sound on/off, background volume and colour theme.
//!
//! `enabled` lives for the session only. `volume` and `theme` are persisted
//! through a `PreferenceStorage`; reads fall back to defaults on any failure
//! and failed writes leave the in-memory value in place.

use crate::config::SoundConfig;
use crate::constants::{THEME_KEY, VOLUME_KEY};
use crate::dsp::clamp;
use crate::error::{Result, SfxError};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SfxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(SfxError::Storage(format!("unknown theme {other:?}"))),
        }
    }
}

/// String key/value storage that may refuse access.
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage, used off the web and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct PreferenceStore<S> {
    storage: S,
    enabled: bool,
    volume: f32,
    theme: Theme,
}

impl<S: PreferenceStorage> PreferenceStore<S> {
    /// Load persisted values, falling back to the configured defaults.
    pub fn load(storage: S, config: &SoundConfig) -> Self {
        let volume = read_volume(&storage).unwrap_or(config.default_volume);
        let theme = read_theme(&storage).unwrap_or(config.default_theme);
        Self {
            storage,
            enabled: true,
            volume,
            theme,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Clamp into [0, 1] and persist. The in-memory value is updated even
    /// when the write fails.
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = clamp(volume, 0.0, 1.0);
        self.storage.set(VOLUME_KEY, &self.volume.to_string())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.storage.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Stored volume, or `None` when missing, unreadable, non-finite or out of range.
fn read_volume<S: PreferenceStorage>(storage: &S) -> Option<f32> {
    let raw = match storage.get(VOLUME_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            log::debug!("[prefs] volume read failed: {e}");
            return None;
        }
    };
    let v = raw.trim().parse::<f32>().ok()?;
    (v.is_finite() && (0.0..=1.0).contains(&v)).then_some(v)
}

fn read_theme<S: PreferenceStorage>(storage: &S) -> Option<Theme> {
    match storage.get(THEME_KEY) {
        Ok(raw) => raw?.parse().ok(),
        Err(e) => {
            log::debug!("[prefs] theme read failed: {e}");
            None
        }
    }
}
