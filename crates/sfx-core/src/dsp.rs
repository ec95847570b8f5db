use crate::constants::*;
use crate::error::Result;
use crate::graph::{AudioGraph, Automation, Param, SampleBuffer};
use rand::Rng;

#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.max(min).min(max)
}

#[inline]
fn buffer_len(sample_rate: f32, seconds: f32) -> usize {
    ((sample_rate * seconds).floor() as usize).max(1)
}

/// Mono, softly coloured noise that tapers linearly to silence.
pub fn noise_buffer<R: Rng + ?Sized>(rng: &mut R, sample_rate: f32, seconds: f32) -> SampleBuffer {
    let len = buffer_len(sample_rate, seconds);
    let mut data = Vec::with_capacity(len);
    let mut last = 0.0_f32;
    for i in 0..len {
        let w = rng.gen::<f32>() * 2.0 - 1.0;
        last = last * NOISE_SMOOTH_KEEP + w * NOISE_SMOOTH_MIX;
        data.push(last * (1.0 - i as f32 / len as f32));
    }
    SampleBuffer {
        sample_rate,
        channels: vec![data],
    }
}

/// Stereo decaying white noise used as the reverb impulse response.
pub fn impulse_response<R: Rng + ?Sized>(
    rng: &mut R,
    sample_rate: f32,
    seconds: f32,
    decay: f32,
) -> SampleBuffer {
    let len = buffer_len(sample_rate, seconds);
    let channels = (0..2)
        .map(|_| {
            (0..len)
                .map(|i| {
                    let t = i as f32 / len as f32;
                    (rng.gen::<f32>() * 2.0 - 1.0) * (1.0 - t).powf(decay)
                })
                .collect::<Vec<_>>()
        })
        .collect();
    SampleBuffer {
        sample_rate,
        channels,
    }
}

pub fn peak_click(v: f32, boost: f32) -> f32 {
    clamp(v * boost * SFX_CLICK_EXTRA, 0.0, PEAK_CLICK_MAX)
}

pub fn peak_other(v: f32, boost: f32) -> f32 {
    clamp(v * boost * SFX_OTHER_EXTRA, 0.0, PEAK_OTHER_MAX)
}

pub fn peak_whoosh(v: f32, boost: f32) -> f32 {
    clamp(v * boost * SFX_WHOOSH_EXTRA, 0.0, PEAK_WHOOSH_MAX)
}

/// Exponential attack/release gain curve. Never a hard on/off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub attack: f64,
    pub release: f64,
    pub peak: f32,
}

impl Envelope {
    pub fn new(attack: f64, release: f64, peak: f32) -> Self {
        Self {
            attack,
            release,
            peak,
        }
    }

    pub fn steps(&self, t: f64) -> [Automation; 3] {
        [
            Automation::SetAt {
                value: ENVELOPE_FLOOR,
                time: t,
            },
            Automation::ExponentialTo {
                value: self.peak.max(ENVELOPE_MIN_PEAK),
                time: t + self.attack,
            },
            Automation::ExponentialTo {
                value: ENVELOPE_FLOOR,
                time: t + self.attack + self.release,
            },
        ]
    }

    /// Build a gain node carrying this envelope, starting at `t`.
    pub fn build<G: AudioGraph>(&self, graph: &G, t: f64) -> Result<G::Node> {
        let g = graph.gain(ENVELOPE_FLOOR)?;
        for step in self.steps(t) {
            graph.automate(&g, Param::Gain, step)?;
        }
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn noise_buffer_length_and_taper() {
        let mut rng = StdRng::seed_from_u64(7);
        let buf = noise_buffer(&mut rng, 48_000.0, 0.14);
        assert_eq!(buf.channels.len(), 1);
        assert_eq!(buf.len(), 6720);
        assert!(buf.channels[0].iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn buffers_are_never_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(noise_buffer(&mut rng, 8_000.0, 0.0).len(), 1);
        assert_eq!(impulse_response(&mut rng, 8_000.0, 0.0, 2.4).len(), 1);
    }

    #[test]
    fn impulse_is_stereo_and_decays() {
        let mut rng = StdRng::seed_from_u64(3);
        let ir = impulse_response(&mut rng, 44_100.0, REVERB_SECONDS, REVERB_DECAY);
        assert_eq!(ir.channels.len(), 2);
        assert_eq!(ir.len(), (44_100.0_f32 * REVERB_SECONDS).floor() as usize);
        let tail = &ir.channels[0][ir.len() - 100..];
        assert!(tail.iter().all(|s| s.abs() < 0.01));
    }

    #[test]
    fn peak_policies_clamp() {
        assert!((peak_other(0.09, SFX_BOOST) - 0.558).abs() < 1e-4);
        assert_eq!(peak_other(1.0, SFX_BOOST), PEAK_OTHER_MAX);
        assert_eq!(peak_click(10.0, SFX_BOOST), PEAK_CLICK_MAX);
        assert_eq!(peak_whoosh(10.0, SFX_BOOST), PEAK_WHOOSH_MAX);
        assert_eq!(peak_click(-1.0, SFX_BOOST), 0.0);
        assert!(peak_click(0.1, 1.0) < peak_click(0.1, SFX_BOOST));
    }

    #[test]
    fn envelope_never_starts_or_ends_at_zero() {
        let env = Envelope::new(0.01, 0.14, 0.0);
        let steps = env.steps(2.0);
        match steps[1] {
            Automation::ExponentialTo { value, time } => {
                assert_eq!(value, ENVELOPE_MIN_PEAK);
                assert!((time - 2.01).abs() < 1e-9);
            }
            other => panic!("unexpected step {other:?}"),
        }
        match steps[2] {
            Automation::ExponentialTo { value, time } => {
                assert_eq!(value, ENVELOPE_FLOOR);
                assert!((time - 2.15).abs() < 1e-9);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }
}
