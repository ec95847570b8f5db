use sfx_core::{
    AudioBackend, AudioGraph, Automation, CompressorSettings, FilterKind, Param, Result,
    SampleBuffer, SfxError,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(what: &str, e: JsValue) -> SfxError {
    SfxError::Node(format!("{what}: {e:?}"))
}

/// Typed handle over the WebAudio nodes the sound layer creates.
#[derive(Clone, Debug)]
pub enum WebNode {
    Destination(web::AudioDestinationNode),
    Gain(web::GainNode),
    Filter(web::BiquadFilterNode),
    Oscillator(web::OscillatorNode),
    Source(web::AudioBufferSourceNode),
    Compressor(web::DynamicsCompressorNode),
    Convolver(web::ConvolverNode),
    Panner(web::StereoPannerNode),
}

impl WebNode {
    fn audio_node(&self) -> &web::AudioNode {
        match self {
            WebNode::Destination(n) => AsRef::<web::AudioNode>::as_ref(n),
            WebNode::Gain(n) => AsRef::<web::AudioNode>::as_ref(n),
            WebNode::Filter(n) => AsRef::<web::AudioNode>::as_ref(n),
            WebNode::Oscillator(n) => AsRef::<web::AudioNode>::as_ref(n),
            WebNode::Source(n) => AsRef::<web::AudioNode>::as_ref(n),
            WebNode::Compressor(n) => AsRef::<web::AudioNode>::as_ref(n),
            WebNode::Convolver(n) => AsRef::<web::AudioNode>::as_ref(n),
            WebNode::Panner(n) => AsRef::<web::AudioNode>::as_ref(n),
        }
    }

    fn scheduled(&self) -> Option<&web::AudioScheduledSourceNode> {
        match self {
            WebNode::Oscillator(n) => Some(AsRef::<web::AudioScheduledSourceNode>::as_ref(n)),
            WebNode::Source(n) => Some(AsRef::<web::AudioScheduledSourceNode>::as_ref(n)),
            _ => None,
        }
    }

    fn param(&self, param: Param) -> Option<web::AudioParam> {
        match (self, param) {
            (WebNode::Gain(n), Param::Gain) => Some(n.gain()),
            (WebNode::Filter(n), Param::Frequency) => Some(n.frequency()),
            (WebNode::Filter(n), Param::Q) => Some(n.q()),
            (WebNode::Filter(n), Param::Detune) => Some(n.detune()),
            (WebNode::Oscillator(n), Param::Frequency) => Some(n.frequency()),
            (WebNode::Oscillator(n), Param::Detune) => Some(n.detune()),
            (WebNode::Panner(n), Param::Pan) => Some(n.pan()),
            _ => None,
        }
    }

    fn require_param(&self, param: Param) -> Result<web::AudioParam> {
        self.param(param)
            .ok_or_else(|| SfxError::Node(format!("{param:?} is not a parameter of this node")))
    }
}

pub struct WebAudioGraph {
    ctx: web::AudioContext,
}

impl WebAudioGraph {
    fn upload(&self, buffer: &SampleBuffer) -> Result<web::AudioBuffer> {
        let buf = self
            .ctx
            .create_buffer(
                buffer.channels.len() as u32,
                buffer.len() as u32,
                buffer.sample_rate,
            )
            .map_err(|e| js_err("AudioBuffer", e))?;
        for (ch, data) in buffer.channels.iter().enumerate() {
            let mut samples = data.clone();
            buf.copy_to_channel(&mut samples, ch as i32)
                .map_err(|e| js_err("copy_to_channel", e))?;
        }
        Ok(buf)
    }
}

impl AudioGraph for WebAudioGraph {
    type Node = WebNode;

    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate()
    }

    fn is_suspended(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Suspended
    }

    fn resume(&self) -> Result<()> {
        let promise = self.ctx.resume().map_err(|e| js_err("resume", e))?;
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("[audio] resume rejected: {:?}", e);
            }
        });
        Ok(())
    }

    fn destination(&self) -> WebNode {
        WebNode::Destination(self.ctx.destination())
    }

    fn gain(&self, value: f32) -> Result<WebNode> {
        let g = web::GainNode::new(&self.ctx).map_err(|e| js_err("GainNode", e))?;
        g.gain().set_value(value);
        Ok(WebNode::Gain(g))
    }

    fn biquad(&self, kind: FilterKind, frequency: f32, q: f32) -> Result<WebNode> {
        let f = web::BiquadFilterNode::new(&self.ctx).map_err(|e| js_err("BiquadFilterNode", e))?;
        f.set_type(match kind {
            FilterKind::Lowpass => web::BiquadFilterType::Lowpass,
            FilterKind::Highpass => web::BiquadFilterType::Highpass,
            FilterKind::Bandpass => web::BiquadFilterType::Bandpass,
        });
        f.frequency().set_value(frequency);
        f.q().set_value(q);
        Ok(WebNode::Filter(f))
    }

    fn oscillator(&self, frequency: f32, detune_cents: f32) -> Result<WebNode> {
        let osc = web::OscillatorNode::new(&self.ctx).map_err(|e| js_err("OscillatorNode", e))?;
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(frequency);
        osc.detune().set_value(detune_cents);
        Ok(WebNode::Oscillator(osc))
    }

    fn buffer_source(&self, buffer: &SampleBuffer, looping: bool) -> Result<WebNode> {
        let data = self.upload(buffer)?;
        let src = web::AudioBufferSourceNode::new(&self.ctx)
            .map_err(|e| js_err("AudioBufferSourceNode", e))?;
        src.set_buffer(Some(&data));
        src.set_loop(looping);
        Ok(WebNode::Source(src))
    }

    fn compressor(&self, settings: &CompressorSettings) -> Result<WebNode> {
        let c = web::DynamicsCompressorNode::new(&self.ctx)
            .map_err(|e| js_err("DynamicsCompressorNode", e))?;
        c.threshold().set_value(settings.threshold_db);
        c.knee().set_value(settings.knee_db);
        c.ratio().set_value(settings.ratio);
        c.attack().set_value(settings.attack_sec);
        c.release().set_value(settings.release_sec);
        Ok(WebNode::Compressor(c))
    }

    fn convolver(&self, impulse: &SampleBuffer) -> Result<WebNode> {
        let ir = self.upload(impulse)?;
        let reverb = web::ConvolverNode::new(&self.ctx).map_err(|e| js_err("ConvolverNode", e))?;
        reverb.set_buffer(Some(&ir));
        Ok(WebNode::Convolver(reverb))
    }

    fn stereo_panner(&self, pan: f32) -> Option<WebNode> {
        let p = web::StereoPannerNode::new(&self.ctx)
            .map_err(|e| log::debug!("[audio] no StereoPannerNode: {:?}", e))
            .ok()?;
        p.pan().set_value(pan);
        Some(WebNode::Panner(p))
    }

    fn connect(&self, from: &WebNode, to: &WebNode) -> Result<()> {
        from.audio_node()
            .connect_with_audio_node(to.audio_node())
            .map(|_| ())
            .map_err(|e| js_err("connect", e))
    }

    fn connect_param(&self, from: &WebNode, to: &WebNode, param: Param) -> Result<()> {
        let target = to.require_param(param)?;
        from.audio_node()
            .connect_with_audio_param(&target)
            .map_err(|e| js_err("connect param", e))
    }

    fn automate(&self, node: &WebNode, param: Param, step: Automation) -> Result<()> {
        let p = node.require_param(param)?;
        let res = match step {
            Automation::SetAt { value, time } => p.set_value_at_time(value, time),
            Automation::LinearTo { value, time } => p.linear_ramp_to_value_at_time(value, time),
            Automation::ExponentialTo { value, time } => {
                p.exponential_ramp_to_value_at_time(value, time)
            }
        };
        res.map(|_| ()).map_err(|e| js_err("automation", e))
    }

    fn start(&self, node: &WebNode, when: f64) -> Result<()> {
        let src = node
            .scheduled()
            .ok_or_else(|| SfxError::Node("start on a non-source node".into()))?;
        src.start_with_when(when).map_err(|e| js_err("start", e))
    }

    fn stop(&self, node: &WebNode, when: Option<f64>) -> Result<()> {
        let src = node
            .scheduled()
            .ok_or_else(|| SfxError::Node("stop on a non-source node".into()))?;
        match when {
            Some(t) => src.stop_with_when(t),
            None => src.stop(),
        }
        .map_err(|e| js_err("stop", e))
    }
}

/// Creates the page's `AudioContext` on demand.
#[derive(Default)]
pub struct WebBackend;

impl AudioBackend for WebBackend {
    type Graph = WebAudioGraph;

    fn create(&mut self) -> Result<WebAudioGraph> {
        if web::window().is_none() {
            return Err(SfxError::Unavailable);
        }
        let ctx = web::AudioContext::new().map_err(|e| {
            log::warn!("[audio] AudioContext error: {:?}", e);
            SfxError::Unavailable
        })?;
        Ok(WebAudioGraph { ctx })
    }
}
