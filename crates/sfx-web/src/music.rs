use sfx_core::{MusicPlayer, Result, SfxError};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Looping `<audio>` element for the background track.
pub struct HtmlMusic {
    el: Option<web::HtmlAudioElement>,
}

impl HtmlMusic {
    pub fn new(url: &str) -> Self {
        let el = web::HtmlAudioElement::new_with_src(url)
            .map_err(|e| log::warn!("[music] audio element error: {:?}", e))
            .ok();
        if let Some(a) = &el {
            a.set_loop(true);
            a.set_preload("auto");
        }
        Self { el }
    }
}

impl MusicPlayer for HtmlMusic {
    fn set_volume(&mut self, volume: f32) {
        if let Some(a) = &self.el {
            a.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }

    fn play(&mut self) -> Result<()> {
        let Some(a) = &self.el else {
            return Ok(());
        };
        let promise = a
            .play()
            .map_err(|e| SfxError::Playback(format!("{e:?}")))?;
        // Autoplay refusals arrive as a rejected promise; the next gesture retries.
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("[music] play rejected: {:?}", e);
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(a) = &self.el {
            _ = a.pause();
        }
    }
}
