//! One-shot UI sounds. Each trigger builds its own small graph, schedules its
//! own stop and is forgotten once its end time has passed.

use crate::bus::AudioBus;
use crate::dsp::{noise_buffer, peak_click, peak_other, peak_whoosh, Envelope};
use crate::error::Result;
use crate::graph::{AudioGraph, Automation, FilterKind, Param};
use rand::Rng;
use smallvec::SmallVec;

// WebAudio's default biquad Q
const DEFAULT_Q: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Hover,
    Nav,
    Click,
    Whoosh,
}

impl Effect {
    pub const ALL: [Effect; 4] = [Effect::Hover, Effect::Nav, Effect::Click, Effect::Whoosh];

    /// Offset from the trigger to the last scheduled stop.
    pub fn duration(&self) -> f64 {
        match self {
            Effect::Hover => 0.18,
            Effect::Nav => 0.07,
            Effect::Click => 0.16,
            Effect::Whoosh => 1.22,
        }
    }
}

/// A playing one-shot. Holds its own node handles until reaped.
pub struct EffectVoice<N> {
    pub effect: Effect,
    pub started_at: f64,
    pub ends_at: f64,
    nodes: SmallVec<[N; 8]>,
}

impl<N> EffectVoice<N> {
    fn new(effect: Effect, t: f64) -> Self {
        Self {
            effect,
            started_at: t,
            ends_at: t + effect.duration(),
            nodes: SmallVec::new(),
        }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.ends_at
    }
}

/// Build and schedule a voice for `effect`, starting at the graph's current time.
pub fn build<G, R>(
    effect: Effect,
    graph: &G,
    bus: &AudioBus<G::Node>,
    boost: f32,
    rng: &mut R,
) -> Result<EffectVoice<G::Node>>
where
    G: AudioGraph,
    R: Rng + ?Sized,
{
    let t = graph.current_time();
    let mut voice = EffectVoice::new(effect, t);
    let built = match effect {
        Effect::Hover => hover(graph, bus, boost, rng, t, &mut voice.nodes),
        Effect::Nav => nav(graph, bus, boost, rng, t, &mut voice.nodes),
        Effect::Click => click(graph, bus, boost, rng, t, &mut voice.nodes),
        Effect::Whoosh => whoosh(graph, bus, boost, rng, t, &mut voice.nodes),
    };
    if let Err(e) = built {
        // Silence whatever already started; non-sources and unstarted nodes refuse.
        for node in &voice.nodes {
            _ = graph.stop(node, None);
        }
        return Err(e);
    }
    Ok(voice)
}

type Nodes<N> = SmallVec<[N; 8]>;

// Soft, rising air
fn hover<G: AudioGraph, R: Rng + ?Sized>(
    graph: &G,
    bus: &AudioBus<G::Node>,
    boost: f32,
    rng: &mut R,
    t: f64,
    nodes: &mut Nodes<G::Node>,
) -> Result<()> {
    let air = graph.buffer_source(&noise_buffer(rng, graph.sample_rate(), 0.14), false)?;
    let hp = graph.biquad(FilterKind::Highpass, 680.0, DEFAULT_Q)?;
    let bp = graph.biquad(FilterKind::Bandpass, 1400.0, 0.65)?;
    graph.automate(&bp, Param::Frequency, Automation::SetAt { value: 1400.0, time: t })?;
    graph.automate(&bp, Param::Frequency, Automation::LinearTo { value: 2200.0, time: t + 0.10 })?;
    let g = Envelope::new(0.010, 0.14, peak_other(0.09, boost)).build(graph, t)?;

    graph.connect(&air, &hp)?;
    graph.connect(&hp, &bp)?;
    graph.connect(&bp, &g)?;
    bus.route_wet(graph, &g)?;

    nodes.extend([air.clone(), hp, bp, g]);
    graph.start(&air, t)?;
    graph.stop(&air, Some(t + 0.18))?;
    Ok(())
}

// Extremely subtle; page transitions carry the weight
fn nav<G: AudioGraph, R: Rng + ?Sized>(
    graph: &G,
    bus: &AudioBus<G::Node>,
    boost: f32,
    rng: &mut R,
    t: f64,
    nodes: &mut Nodes<G::Node>,
) -> Result<()> {
    let src = graph.buffer_source(&noise_buffer(rng, graph.sample_rate(), 0.05), false)?;
    let hp = graph.biquad(FilterKind::Highpass, 1800.0, DEFAULT_Q)?;
    let g = Envelope::new(0.0015, 0.06, peak_other(0.06, boost)).build(graph, t)?;

    graph.connect(&src, &hp)?;
    graph.connect(&hp, &g)?;
    bus.route_wet(graph, &g)?;

    nodes.extend([src.clone(), hp, g]);
    graph.start(&src, t)?;
    graph.stop(&src, Some(t + 0.07))?;
    Ok(())
}

// Low "felt" tap plus a tiny air transient
fn click<G: AudioGraph, R: Rng + ?Sized>(
    graph: &G,
    bus: &AudioBus<G::Node>,
    boost: f32,
    rng: &mut R,
    t: f64,
    nodes: &mut Nodes<G::Node>,
) -> Result<()> {
    let tap = graph.oscillator(92.0, 0.0)?;
    graph.automate(&tap, Param::Frequency, Automation::SetAt { value: 92.0, time: t })?;
    graph.automate(
        &tap,
        Param::Frequency,
        Automation::ExponentialTo { value: 62.0, time: t + 0.10 },
    )?;
    let g_tap = Envelope::new(0.0018, 0.12, peak_click(0.10, boost)).build(graph, t)?;
    graph.connect(&tap, &g_tap)?;
    bus.route_dry(graph, &g_tap)?;

    let src = graph.buffer_source(&noise_buffer(rng, graph.sample_rate(), 0.04), false)?;
    let bp = graph.biquad(FilterKind::Bandpass, 1100.0, 0.9)?;
    let g = Envelope::new(0.0012, 0.08, peak_click(0.035, boost)).build(graph, t)?;
    graph.connect(&src, &bp)?;
    graph.connect(&bp, &g)?;
    bus.route_wet(graph, &g)?;

    nodes.extend([tap.clone(), g_tap, src.clone(), bp, g]);
    graph.start(&tap, t)?;
    graph.stop(&tap, Some(t + 0.16))?;
    graph.start(&src, t)?;
    graph.stop(&src, Some(t + 0.06))?;
    Ok(())
}

// Smooth pass-by with a gentle stereo drift and a very soft sub swell
fn whoosh<G: AudioGraph, R: Rng + ?Sized>(
    graph: &G,
    bus: &AudioBus<G::Node>,
    boost: f32,
    rng: &mut R,
    t: f64,
    nodes: &mut Nodes<G::Node>,
) -> Result<()> {
    let src = graph.buffer_source(&noise_buffer(rng, graph.sample_rate(), 1.18), false)?;
    let bp = graph.biquad(FilterKind::Bandpass, 220.0, 0.55)?;
    graph.automate(&bp, Param::Frequency, Automation::SetAt { value: 220.0, time: t })?;
    graph.automate(&bp, Param::Frequency, Automation::LinearTo { value: 1800.0, time: t + 0.55 })?;
    graph.automate(&bp, Param::Frequency, Automation::LinearTo { value: 420.0, time: t + 1.16 })?;
    let g_w = Envelope::new(0.03, 1.10, peak_whoosh(0.12, boost)).build(graph, t)?;

    graph.connect(&src, &bp)?;
    match graph.stereo_panner(-0.12) {
        Some(panner) => {
            graph.automate(&panner, Param::Pan, Automation::SetAt { value: -0.12, time: t })?;
            let lfo = graph.oscillator(0.55, 0.0)?;
            let lfo_amount = graph.gain(0.11)?;
            graph.connect(&lfo, &lfo_amount)?;
            graph.connect_param(&lfo_amount, &panner, Param::Pan)?;
            graph.connect(&bp, &panner)?;
            graph.connect(&panner, &g_w)?;
            nodes.extend([panner, lfo.clone(), lfo_amount]);

            graph.start(&lfo, t)?;
            graph.stop(&lfo, Some(t + 1.22))?;
        }
        None => graph.connect(&bp, &g_w)?,
    }
    bus.route_wet(graph, &g_w)?;

    let sub = graph.oscillator(34.0, 0.0)?;
    graph.automate(&sub, Param::Frequency, Automation::SetAt { value: 34.0, time: t })?;
    graph.automate(&sub, Param::Frequency, Automation::LinearTo { value: 52.0, time: t + 0.50 })?;
    graph.automate(&sub, Param::Frequency, Automation::LinearTo { value: 30.0, time: t + 1.05 })?;
    let g_sub = Envelope::new(0.03, 1.05, peak_whoosh(0.035, boost)).build(graph, t)?;
    graph.connect(&sub, &g_sub)?;
    bus.route_dry(graph, &g_sub)?;

    nodes.extend([src.clone(), bp, g_w, sub.clone(), g_sub]);
    graph.start(&src, t)?;
    graph.stop(&src, Some(t + 1.22))?;
    graph.start(&sub, t)?;
    graph.stop(&sub, Some(t + 1.16))?;
    Ok(())
}
