use crate::error::Result;

/// The looping background track, a separate media element rather than part of
/// the effect graph.
pub trait MusicPlayer {
    fn set_volume(&mut self, volume: f32);
    /// May be refused by the platform before the first user gesture.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
}

/// Used where there is no media element to drive.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMusic;

impl MusicPlayer for NoMusic {
    fn set_volume(&mut self, _volume: f32) {}

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}
}
