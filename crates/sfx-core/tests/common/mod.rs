// Host-side fakes for the sound layer: a recording audio graph, failing
// storage, a background track stub and a tiny element tree.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use sfx_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Destination,
    Gain(f32),
    Biquad(FilterKind, f32, f32),
    Oscillator { frequency: f32, detune: f32 },
    Source { len: usize, looping: bool },
    Compressor(CompressorSettings),
    Convolver { channels: usize, len: usize },
    Panner(f32),
}

#[derive(Debug)]
pub struct GraphLog {
    pub time: f64,
    pub sample_rate: f32,
    pub suspended: bool,
    pub resume_calls: usize,
    pub panner_supported: bool,
    pub nodes: Vec<NodeKind>,
    pub connections: Vec<(usize, usize)>,
    pub param_links: Vec<(usize, usize, Param)>,
    pub automation: Vec<(usize, Param, Automation)>,
    pub started: Vec<(usize, f64)>,
    pub stopped: Vec<(usize, Option<f64>)>,
    pub start_calls: usize,
    /// 1-based `start` call that fails.
    pub fail_start_at: Option<usize>,
}

impl Default for GraphLog {
    fn default() -> Self {
        Self {
            time: 0.0,
            sample_rate: 8_000.0,
            suspended: true,
            resume_calls: 0,
            panner_supported: true,
            nodes: vec![NodeKind::Destination],
            connections: Vec::new(),
            param_links: Vec::new(),
            automation: Vec::new(),
            started: Vec::new(),
            stopped: Vec::new(),
            start_calls: 0,
            fail_start_at: None,
        }
    }
}

impl GraphLog {
    pub fn outputs_of(&self, node: usize) -> Vec<usize> {
        self.connections
            .iter()
            .filter(|(from, _)| *from == node)
            .map(|(_, to)| *to)
            .collect()
    }

    pub fn inputs_of(&self, node: usize) -> Vec<usize> {
        self.connections
            .iter()
            .filter(|(_, to)| *to == node)
            .map(|(from, _)| *from)
            .collect()
    }

    pub fn automation_of(&self, node: usize, param: Param) -> Vec<Automation> {
        self.automation
            .iter()
            .filter(|(n, p, _)| *n == node && *p == param)
            .map(|(_, _, a)| *a)
            .collect()
    }

    pub fn stop_time(&self, node: usize) -> Option<Option<f64>> {
        self.stopped
            .iter()
            .rev()
            .find(|(n, _)| *n == node)
            .map(|(_, w)| *w)
    }

    /// Does `from` reach `to` through connections?
    pub fn reaches(&self, from: usize, to: usize) -> bool {
        let mut stack = vec![from];
        let mut seen = vec![false; self.nodes.len()];
        while let Some(n) = stack.pop() {
            if n == to {
                return true;
            }
            if std::mem::replace(&mut seen[n], true) {
                continue;
            }
            stack.extend(self.outputs_of(n));
        }
        false
    }
}

#[derive(Clone)]
pub struct FakeGraph {
    pub log: Rc<RefCell<GraphLog>>,
}

impl FakeGraph {
    fn add(&self, kind: NodeKind) -> usize {
        let mut log = self.log.borrow_mut();
        log.nodes.push(kind);
        log.nodes.len() - 1
    }
}

impl AudioGraph for FakeGraph {
    type Node = usize;

    fn current_time(&self) -> f64 {
        self.log.borrow().time
    }

    fn sample_rate(&self) -> f32 {
        self.log.borrow().sample_rate
    }

    fn is_suspended(&self) -> bool {
        self.log.borrow().suspended
    }

    fn resume(&self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.resume_calls += 1;
        log.suspended = false;
        Ok(())
    }

    fn destination(&self) -> usize {
        0
    }

    fn gain(&self, value: f32) -> Result<usize> {
        Ok(self.add(NodeKind::Gain(value)))
    }

    fn biquad(&self, kind: FilterKind, frequency: f32, q: f32) -> Result<usize> {
        Ok(self.add(NodeKind::Biquad(kind, frequency, q)))
    }

    fn oscillator(&self, frequency: f32, detune_cents: f32) -> Result<usize> {
        Ok(self.add(NodeKind::Oscillator {
            frequency,
            detune: detune_cents,
        }))
    }

    fn buffer_source(&self, buffer: &SampleBuffer, looping: bool) -> Result<usize> {
        Ok(self.add(NodeKind::Source {
            len: buffer.len(),
            looping,
        }))
    }

    fn compressor(&self, settings: &CompressorSettings) -> Result<usize> {
        Ok(self.add(NodeKind::Compressor(settings.clone())))
    }

    fn convolver(&self, impulse: &SampleBuffer) -> Result<usize> {
        Ok(self.add(NodeKind::Convolver {
            channels: impulse.channels.len(),
            len: impulse.len(),
        }))
    }

    fn stereo_panner(&self, pan: f32) -> Option<usize> {
        if !self.log.borrow().panner_supported {
            return None;
        }
        Some(self.add(NodeKind::Panner(pan)))
    }

    fn connect(&self, from: &usize, to: &usize) -> Result<()> {
        self.log.borrow_mut().connections.push((*from, *to));
        Ok(())
    }

    fn connect_param(&self, from: &usize, to: &usize, param: Param) -> Result<()> {
        self.log.borrow_mut().param_links.push((*from, *to, param));
        Ok(())
    }

    fn automate(&self, node: &usize, param: Param, step: Automation) -> Result<()> {
        self.log.borrow_mut().automation.push((*node, param, step));
        Ok(())
    }

    fn start(&self, node: &usize, when: f64) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.start_calls += 1;
        if log.fail_start_at == Some(log.start_calls) {
            return Err(SfxError::Node("start refused".into()));
        }
        log.started.push((*node, when));
        Ok(())
    }

    // Stopping a node that never started, or stopping it again after an
    // immediate stop, fails like the platform does.
    fn stop(&self, node: &usize, when: Option<f64>) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if !log.started.iter().any(|(n, _)| n == node) {
            return Err(SfxError::Node("not started".into()));
        }
        if log.stopped.iter().any(|(n, w)| n == node && w.is_none()) {
            return Err(SfxError::Node("already stopped".into()));
        }
        log.stopped.push((*node, when));
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeBackend {
    pub log: Rc<RefCell<GraphLog>>,
    pub available: bool,
    pub created: Rc<RefCell<usize>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(GraphLog::default())),
            available: true,
            created: Rc::new(RefCell::new(0)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn set_time(&self, t: f64) {
        self.log.borrow_mut().time = t;
    }

    pub fn created(&self) -> usize {
        *self.created.borrow()
    }

    pub fn node_count(&self) -> usize {
        self.log.borrow().nodes.len()
    }

    /// Make the `n`th `start` call from now on fail.
    pub fn fail_nth_start(&self, n: usize) {
        let mut log = self.log.borrow_mut();
        log.fail_start_at = Some(log.start_calls + n);
    }

    /// Sources started and not stopped immediately afterwards.
    pub fn still_running(&self) -> Vec<usize> {
        let log = self.log.borrow();
        log.started
            .iter()
            .map(|(n, _)| *n)
            .filter(|n| log.stop_time(*n) != Some(None))
            .collect()
    }
}

impl AudioBackend for FakeBackend {
    type Graph = FakeGraph;

    fn create(&mut self) -> Result<FakeGraph> {
        *self.created.borrow_mut() += 1;
        if !self.available {
            return Err(SfxError::Unavailable);
        }
        Ok(FakeGraph {
            log: self.log.clone(),
        })
    }
}

/// Storage whose every access throws.
#[derive(Clone, Debug, Default)]
pub struct FailingStorage;

impl PreferenceStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(SfxError::Storage("access denied".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(SfxError::Storage("access denied".into()))
    }
}

#[derive(Debug, Default)]
pub struct FakeMusic {
    pub volume: f32,
    pub playing: bool,
    pub play_calls: usize,
    pub refuse: bool,
}

impl MusicPlayer for FakeMusic {
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        if self.refuse {
            return Err(SfxError::Playback("NotAllowedError".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}

pub type TestSystem = SoundSystem<FakeBackend, MemoryStorage, FakeMusic>;

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn system_with(backend: FakeBackend, storage: MemoryStorage) -> TestSystem {
    SoundSystem::init(
        backend,
        storage,
        FakeMusic::default(),
        SoundConfig::default(),
        rng(),
    )
}

pub fn system() -> (TestSystem, FakeBackend) {
    let backend = FakeBackend::new();
    (system_with(backend.clone(), MemoryStorage::new()), backend)
}

/// Minimal element tree for gesture routing.
#[derive(Clone, Debug, Default)]
pub struct FakeElement {
    pub id: u32,
    pub interactive: bool,
    pub in_nav: bool,
    pub href: Option<String>,
    pub parent: Option<Box<FakeElement>>,
}

impl FakeElement {
    pub fn button(id: u32) -> Self {
        Self {
            id,
            interactive: true,
            ..Default::default()
        }
    }

    pub fn link(id: u32, href: &str) -> Self {
        Self {
            id,
            interactive: true,
            href: Some(href.to_string()),
            ..Default::default()
        }
    }

    pub fn plain(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn in_nav(mut self) -> Self {
        self.in_nav = true;
        self
    }

    pub fn child(&self, id: u32) -> Self {
        Self {
            id,
            interactive: false,
            in_nav: self.in_nav,
            href: None,
            parent: Some(Box::new(self.clone())),
        }
    }
}

impl UiElement for FakeElement {
    fn interactive_ancestor(&self) -> Option<Self> {
        if self.interactive {
            return Some(self.clone());
        }
        self.parent.as_ref().and_then(|p| p.interactive_ancestor())
    }

    fn in_navigation(&self) -> bool {
        self.in_nav
    }

    fn link_href(&self) -> Option<String> {
        self.href
            .clone()
            .or_else(|| self.parent.as_ref().and_then(|p| p.link_href()))
    }

    fn same_element(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
