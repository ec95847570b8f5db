use crate::config::SoundConfig;
use crate::dsp::impulse_response;
use crate::error::{Result, SfxError};
use crate::graph::{AudioBackend, AudioGraph};
use rand::Rng;

/// Fixed master routing: (dry + reverb -> wet) -> compressor -> output.
///
/// Voices connect into `dry` or into the reverb input, never to the output.
pub struct AudioBus<N> {
    pub dry: N,
    pub wet: N,
    pub compressor: N,
    pub reverb: N,
    pub wet_post: N,
}

impl<N: Clone> AudioBus<N> {
    pub fn build<G, R>(graph: &G, config: &SoundConfig, rng: &mut R) -> Result<Self>
    where
        G: AudioGraph<Node = N>,
        R: Rng + ?Sized,
    {
        let compressor = graph.compressor(&config.compressor)?;
        let dry = graph.gain(config.master_dry())?;
        let wet = graph.gain(config.master_wet())?;
        graph.connect(&dry, &compressor)?;
        graph.connect(&wet, &compressor)?;
        graph.connect(&compressor, &graph.destination())?;

        let impulse = impulse_response(
            rng,
            graph.sample_rate(),
            config.reverb_seconds,
            config.reverb_decay,
        );
        let reverb = graph.convolver(&impulse)?;
        let wet_post = graph.gain(1.0)?;
        graph.connect(&reverb, &wet_post)?;
        graph.connect(&wet_post, &wet)?;

        Ok(Self {
            dry,
            wet,
            compressor,
            reverb,
            wet_post,
        })
    }

    pub fn route_dry<G: AudioGraph<Node = N>>(&self, graph: &G, node: &N) -> Result<()> {
        graph.connect(node, &self.dry)
    }

    /// Wet sends go through the reverb.
    pub fn route_wet<G: AudioGraph<Node = N>>(&self, graph: &G, node: &N) -> Result<()> {
        graph.connect(node, &self.reverb)
    }
}

/// A created graph together with its master bus.
pub struct LiveContext<G: AudioGraph> {
    pub graph: G,
    pub bus: AudioBus<G::Node>,
}

impl<G: AudioGraph> LiveContext<G> {
    /// Resume if suspended; no-op otherwise.
    pub fn resume_if_suspended(&self) {
        if self.graph.is_suspended() {
            if let Err(e) = self.graph.resume() {
                log::debug!("[audio] resume failed: {e}");
            }
        }
    }
}

/// Owns the lazily created audio graph. Creation is attempted once; an
/// environment without audio output stays silent for the rest of the session.
pub struct ContextManager<B: AudioBackend> {
    backend: B,
    live: Option<LiveContext<B::Graph>>,
    unavailable: bool,
}

impl<B: AudioBackend> ContextManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: None,
            unavailable: false,
        }
    }

    /// The live context, creating graph and bus on first call.
    pub fn ensure<R: Rng + ?Sized>(
        &mut self,
        config: &SoundConfig,
        rng: &mut R,
    ) -> Option<&LiveContext<B::Graph>> {
        if self.live.is_none() && !self.unavailable {
            match self.create(config, rng) {
                Ok(live) => {
                    log::info!("[audio] context ready");
                    self.live = Some(live);
                }
                Err(e) => {
                    log::warn!("[audio] disabled: {e}");
                    self.unavailable = true;
                }
            }
        }
        self.live.as_ref()
    }

    fn create<R: Rng + ?Sized>(
        &mut self,
        config: &SoundConfig,
        rng: &mut R,
    ) -> Result<LiveContext<B::Graph>> {
        let graph = self.backend.create()?;
        let bus = AudioBus::build(&graph, config, rng)
            .map_err(|e| SfxError::Node(format!("master bus: {e}")))?;
        Ok(LiveContext { graph, bus })
    }

    /// The live context if one was already created.
    pub fn get(&self) -> Option<&LiveContext<B::Graph>> {
        self.live.as_ref()
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
