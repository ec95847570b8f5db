//! Sound layer for the portfolio site: a lazily created WebAudio-style graph
//! with a shared dry/wet/compressor bus, a dark-theme ambience bed, four
//! procedural one-shot UI sounds and the gesture routing that triggers them.
//!
//! Nothing here touches the browser. `sfx-web` supplies the `AudioBackend`,
//! `PreferenceStorage`, `MusicPlayer` and `UiElement` implementations.

pub mod ambience;
pub mod bus;
pub mod config;
pub mod constants;
pub mod dsp;
pub mod effects;
pub mod error;
pub mod gesture;
pub mod graph;
pub mod music;
pub mod prefs;
pub mod system;

pub use ambience::{Ambience, AmbienceInputs};
pub use bus::{AudioBus, ContextManager, LiveContext};
pub use config::{CompressorSettings, SoundConfig};
pub use effects::{Effect, EffectVoice};
pub use error::{Result, SfxError};
pub use gesture::{is_internal_href, GestureRouter, UiElement};
pub use graph::{AudioBackend, AudioGraph, Automation, FilterKind, Param, SampleBuffer};
pub use music::{MusicPlayer, NoMusic};
pub use prefs::{MemoryStorage, PreferenceStorage, PreferenceStore, Theme};
pub use system::SoundSystem;
