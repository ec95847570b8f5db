//! Narrow view of a realtime audio graph.
//!
//! The sound layer only ever builds small node graphs and schedules parameter
//! automation against the graph clock. `AudioGraph` captures exactly that so
//! the bus, ambience and effects can be driven by WebAudio in the browser and
//! by a recording fake in host tests.

use crate::config::CompressorSettings;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Automatable node parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Gain,
    Frequency,
    Q,
    Detune,
    Pan,
}

/// One scheduled change on a parameter, times in graph seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Automation {
    SetAt { value: f32, time: f64 },
    LinearTo { value: f32, time: f64 },
    ExponentialTo { value: f32, time: f64 },
}

/// Sample data built on the Rust side, uploaded by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    pub sample_rate: f32,
    pub channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.channels.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration_sec(&self) -> f32 {
        self.len() as f32 / self.sample_rate
    }
}

pub trait AudioGraph {
    /// Cheap handle to a node owned by the graph.
    type Node: Clone;

    fn current_time(&self) -> f64;
    fn sample_rate(&self) -> f32;
    fn is_suspended(&self) -> bool;
    /// Ask a suspended graph to start rendering. Completion is not awaited.
    fn resume(&self) -> Result<()>;
    fn destination(&self) -> Self::Node;

    fn gain(&self, value: f32) -> Result<Self::Node>;
    fn biquad(&self, kind: FilterKind, frequency: f32, q: f32) -> Result<Self::Node>;
    /// Sine oscillator.
    fn oscillator(&self, frequency: f32, detune_cents: f32) -> Result<Self::Node>;
    fn buffer_source(&self, buffer: &SampleBuffer, looping: bool) -> Result<Self::Node>;
    fn compressor(&self, settings: &CompressorSettings) -> Result<Self::Node>;
    fn convolver(&self, impulse: &SampleBuffer) -> Result<Self::Node>;
    /// `None` when the platform has no stereo panner.
    fn stereo_panner(&self, pan: f32) -> Option<Self::Node>;

    fn connect(&self, from: &Self::Node, to: &Self::Node) -> Result<()>;
    /// Route a node's output into a parameter of another node (modulation).
    fn connect_param(&self, from: &Self::Node, to: &Self::Node, param: Param) -> Result<()>;
    fn automate(&self, node: &Self::Node, param: Param, step: Automation) -> Result<()>;

    fn start(&self, node: &Self::Node, when: f64) -> Result<()>;
    /// `None` stops immediately. Stopping a finished source is an error the
    /// caller is expected to ignore.
    fn stop(&self, node: &Self::Node, when: Option<f64>) -> Result<()>;
}

/// Produces a graph on demand; fails with `SfxError::Unavailable` when the
/// environment cannot output audio.
pub trait AudioBackend {
    type Graph: AudioGraph;

    fn create(&mut self) -> Result<Self::Graph>;
}
