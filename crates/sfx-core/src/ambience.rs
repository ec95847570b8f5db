//! Dark-theme ambience: a looping low noise bed plus a barely audible
//! two-tone drone with slow gain movement.

use crate::bus::LiveContext;
use crate::constants::*;
use crate::dsp::noise_buffer;
use crate::error::Result;
use crate::graph::{AudioGraph, FilterKind, Param};
use crate::prefs::Theme;
use rand::Rng;

/// The three inputs governing the ambience state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmbienceInputs {
    pub enabled: bool,
    pub theme: Theme,
    pub unlocked: bool,
}

impl AmbienceInputs {
    pub fn should_run(&self) -> bool {
        self.enabled && self.theme == Theme::Dark && self.unlocked
    }
}

struct AmbienceVoice<N> {
    noise: N,
    tone_low: N,
    tone_high: N,
    lfo: N,
}

pub struct Ambience<N> {
    voice: Option<AmbienceVoice<N>>,
}

impl<N> Default for Ambience<N> {
    fn default() -> Self {
        Self { voice: None }
    }
}

impl<N: Clone> Ambience<N> {
    pub fn new() -> Self {
        Self { voice: None }
    }

    pub fn is_running(&self) -> bool {
        self.voice.is_some()
    }

    /// Drive the state machine from its inputs. Only ever starts when a live
    /// context is at hand; stopping needs the graph only if a voice exists.
    pub fn sync<G, R>(&mut self, inputs: AmbienceInputs, live: Option<&LiveContext<G>>, rng: &mut R)
    where
        G: AudioGraph<Node = N>,
        R: Rng + ?Sized,
    {
        match (inputs.should_run(), live) {
            (true, Some(live)) => {
                if let Err(e) = self.start(live, rng) {
                    log::warn!("[ambience] start failed: {e}");
                }
            }
            (false, Some(live)) => self.stop(&live.graph),
            (_, None) => self.voice = None,
        }
    }

    /// Build and start a fresh bed. No-op while one is running.
    pub fn start<G, R>(&mut self, live: &LiveContext<G>, rng: &mut R) -> Result<()>
    where
        G: AudioGraph<Node = N>,
        R: Rng + ?Sized,
    {
        if self.voice.is_some() {
            return Ok(());
        }
        let graph = &live.graph;

        // Air bed
        let noise = graph.buffer_source(
            &noise_buffer(rng, graph.sample_rate(), AMBIENCE_NOISE_SECONDS),
            true,
        )?;
        let hp = graph.biquad(FilterKind::Highpass, AMBIENCE_HIGHPASS_HZ, AMBIENCE_HIGHPASS_Q)?;
        let lp = graph.biquad(FilterKind::Lowpass, AMBIENCE_LOWPASS_HZ, AMBIENCE_LOWPASS_Q)?;
        let noise_gain = graph.gain(AMBIENCE_NOISE_GAIN)?;
        graph.connect(&noise, &hp)?;
        graph.connect(&hp, &lp)?;
        graph.connect(&lp, &noise_gain)?;
        live.bus.route_wet(graph, &noise_gain)?;

        // Tonal layer
        let tone_low = graph.oscillator(AMBIENCE_TONE_LOW_HZ, 0.0)?;
        let tone_high = graph.oscillator(AMBIENCE_TONE_HIGH_HZ, AMBIENCE_TONE_DETUNE_CENTS)?;
        let tone_lp = graph.biquad(
            FilterKind::Lowpass,
            AMBIENCE_TONE_LOWPASS_HZ,
            AMBIENCE_TONE_LOWPASS_Q,
        )?;
        let tone_gain = graph.gain(AMBIENCE_TONE_GAIN)?;

        // Slow movement on the tone gain
        let lfo = graph.oscillator(AMBIENCE_LFO_HZ, 0.0)?;
        let lfo_amount = graph.gain(AMBIENCE_LFO_DEPTH)?;
        graph.connect(&lfo, &lfo_amount)?;
        graph.connect_param(&lfo_amount, &tone_gain, Param::Gain)?;

        graph.connect(&tone_low, &tone_lp)?;
        graph.connect(&tone_high, &tone_lp)?;
        graph.connect(&tone_lp, &tone_gain)?;
        live.bus.route_wet(graph, &tone_gain)?;

        let t = graph.current_time();
        let voice = self.voice.insert(AmbienceVoice {
            noise,
            tone_low,
            tone_high,
            lfo,
        });
        let started = [&voice.noise, &voice.tone_low, &voice.tone_high, &voice.lfo]
            .into_iter()
            .try_for_each(|src| graph.start(src, t));
        if let Err(e) = started {
            // Tracked before starting so a partial start can still be stopped.
            self.stop(graph);
            return Err(e);
        }
        log::debug!("[ambience] started");
        Ok(())
    }

    /// Stop every source and drop the voice. Safe to call when stopped.
    pub fn stop<G: AudioGraph<Node = N>>(&mut self, graph: &G) {
        let Some(voice) = self.voice.take() else {
            return;
        };
        for src in [&voice.noise, &voice.tone_low, &voice.tone_high, &voice.lfo] {
            if let Err(e) = graph.stop(src, None) {
                log::debug!("[ambience] stop ignored: {e}");
            }
        }
        log::debug!("[ambience] stopped");
    }
}
