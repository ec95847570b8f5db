use crate::ambience::{Ambience, AmbienceInputs};
use crate::bus::{ContextManager, LiveContext};
use crate::config::SoundConfig;
use crate::effects::{self, Effect, EffectVoice};
use crate::error::{Result, SfxError};
use crate::graph::{AudioBackend, AudioGraph};
use crate::music::MusicPlayer;
use crate::prefs::{PreferenceStorage, PreferenceStore, Theme};
use rand::rngs::StdRng;

type NodeOf<B> = <<B as AudioBackend>::Graph as AudioGraph>::Node;

/// The whole sound layer: preferences, the lazily created audio graph, the
/// ambience bed, live one-shot voices and the background track.
///
/// Every state change that can affect the ambience re-evaluates it through
/// `sync_ambience`, so the bed runs exactly while sound is enabled, the theme
/// is dark and the unlock gesture has happened.
pub struct SoundSystem<B: AudioBackend, S, M> {
    config: SoundConfig,
    prefs: PreferenceStore<S>,
    context: ContextManager<B>,
    ambience: Ambience<NodeOf<B>>,
    voices: Vec<EffectVoice<NodeOf<B>>>,
    music: M,
    unlocked: bool,
    rng: StdRng,
}

impl<B, S, M> SoundSystem<B, S, M>
where
    B: AudioBackend,
    S: PreferenceStorage,
    M: MusicPlayer,
{
    /// Load preferences and prepare the background track. No audio graph is
    /// created until the first sound is requested.
    pub fn init(backend: B, storage: S, mut music: M, config: SoundConfig, rng: StdRng) -> Self {
        let prefs = PreferenceStore::load(storage, &config);
        music.set_volume(prefs.volume());
        log::info!(
            "[sound] init volume={:.2} theme={}",
            prefs.volume(),
            prefs.theme()
        );
        Self {
            config,
            prefs,
            context: ContextManager::new(backend),
            ambience: Ambience::new(),
            voices: Vec::new(),
            music,
            unlocked: false,
            rng,
        }
    }

    /// Stop the ambience and the background track and drop live voices.
    /// One-shots already scheduled finish on their own.
    pub fn shutdown(&mut self) {
        self.music.pause();
        if let Some(live) = self.context.get() {
            self.ambience.stop(&live.graph);
        }
        self.voices.clear();
        log::info!("[sound] shutdown");
    }

    /// First user gesture: resume the graph, open the unlock gate, and start
    /// whatever was waiting on it. Repeated calls are harmless.
    pub fn resume(&mut self) {
        if let Some(live) = self.context.ensure(&self.config, &mut self.rng) {
            live.resume_if_suspended();
        }
        if !self.unlocked {
            log::debug!("[sound] unlocked");
        }
        self.unlocked = true;
        self.sync_music();
        self.sync_ambience();
    }

    /// Trigger a one-shot. A no-op while sound is disabled.
    pub fn play(&mut self, effect: Effect) -> Result<()> {
        if !self.prefs.enabled() {
            return Ok(());
        }
        let live = self
            .context
            .ensure(&self.config, &mut self.rng)
            .ok_or(SfxError::Unavailable)?;
        live.resume_if_suspended();
        let now = live.graph.current_time();
        self.voices.retain(|v| !v.is_finished(now));
        let voice = effects::build(
            effect,
            &live.graph,
            &live.bus,
            self.config.boost,
            &mut self.rng,
        )?;
        self.voices.push(voice);
        Ok(())
    }

    /// Forget voices whose scheduled end has passed.
    pub fn reap(&mut self) {
        if let Some(live) = self.context.get() {
            let now = live.graph.current_time();
            self.voices.retain(|v| !v.is_finished(now));
        }
    }

    pub fn enabled(&self) -> bool {
        self.prefs.enabled()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.prefs.set_enabled(enabled);
        self.sync_music();
        self.sync_ambience();
    }

    pub fn toggle_enabled(&mut self) -> bool {
        let next = !self.prefs.enabled();
        self.set_enabled(next);
        next
    }

    pub fn volume(&self) -> f32 {
        self.prefs.volume()
    }

    pub fn set_volume(&mut self, volume: f32) {
        if let Err(e) = self.prefs.set_volume(volume) {
            log::debug!("[sound] volume not persisted: {e}");
        }
        self.music.set_volume(self.prefs.volume());
    }

    pub fn volume_percent(&self) -> u8 {
        (self.prefs.volume() * 100.0).round() as u8
    }

    /// Label for the sound toggle button.
    pub fn sound_label(&self) -> &'static str {
        if self.prefs.enabled() {
            "MUTE"
        } else {
            "SOUND"
        }
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if let Err(e) = self.prefs.set_theme(theme) {
            log::debug!("[sound] theme not persisted: {e}");
        }
        self.sync_ambience();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.prefs.theme().toggled();
        self.set_theme(next);
        next
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_ambience_running(&self) -> bool {
        self.ambience.is_running()
    }

    pub fn voices(&self) -> &[EffectVoice<NodeOf<B>>] {
        &self.voices
    }

    pub fn live_context(&self) -> Option<&LiveContext<B::Graph>> {
        self.context.get()
    }

    pub fn preferences(&self) -> &PreferenceStore<S> {
        &self.prefs
    }

    pub fn music(&self) -> &M {
        &self.music
    }

    pub fn config(&self) -> &SoundConfig {
        &self.config
    }

    fn ambience_inputs(&self) -> AmbienceInputs {
        AmbienceInputs {
            enabled: self.prefs.enabled(),
            theme: self.prefs.theme(),
            unlocked: self.unlocked,
        }
    }

    fn sync_ambience(&mut self) {
        let inputs = self.ambience_inputs();
        let live = if inputs.should_run() {
            self.context.ensure(&self.config, &mut self.rng)
        } else {
            self.context.get()
        };
        self.ambience.sync(inputs, live, &mut self.rng);
    }

    fn sync_music(&mut self) {
        if !self.prefs.enabled() {
            self.music.pause();
            return;
        }
        if !self.unlocked {
            return;
        }
        self.music.set_volume(self.prefs.volume());
        if let Err(e) = self.music.play() {
            log::debug!("[sound] background track refused: {e}");
        }
    }
}
