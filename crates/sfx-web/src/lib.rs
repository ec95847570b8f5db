#![cfg(target_arch = "wasm32")]
//! Browser side of the site's sound layer: WebAudio graph, localStorage
//! preferences, the background `<audio>` element and document listeners.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sfx_core::constants::BGM_URL;
use sfx_core::{Effect, GestureRouter, SoundConfig, SoundSystem, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod dom;
mod events;
mod graph;
mod music;
mod storage;

use graph::WebBackend;
use music::HtmlMusic;
use storage::LocalStorage;

type WebSound = SoundSystem<WebBackend, LocalStorage, HtmlMusic>;

thread_local! {
    static SOUND: RefCell<Option<WebSound>> = const { RefCell::new(None) };
}

/// Run `f` against the sound system if it is initialised and not already
/// borrowed by an outer handler.
pub(crate) fn with_sound<T>(f: impl FnOnce(&mut WebSound) -> T) -> Option<T> {
    SOUND.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            log::debug!("[sound] busy, event dropped");
            None
        }
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sfx-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = SoundConfig::default();
    let router = Rc::new(RefCell::new(GestureRouter::new(config.hover_debounce)));
    let sound = SoundSystem::init(
        WebBackend,
        LocalStorage,
        HtmlMusic::new(BGM_URL),
        config,
        StdRng::from_entropy(),
    );
    dom::reflect_theme(sound.theme());
    SOUND.with(|cell| *cell.borrow_mut() = Some(sound));

    events::wire_gestures(&document, router);
    Ok(())
}

#[wasm_bindgen]
pub fn sound_enabled() -> bool {
    with_sound(|s| s.enabled()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn set_sound_enabled(enabled: bool) {
    with_sound(|s| s.set_enabled(enabled));
}

#[wasm_bindgen]
pub fn toggle_sound() -> bool {
    with_sound(|s| s.toggle_enabled()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn sound_label() -> String {
    with_sound(|s| s.sound_label().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn volume() -> f32 {
    with_sound(|s| s.volume()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn set_volume(volume: f32) {
    with_sound(|s| s.set_volume(volume));
}

#[wasm_bindgen]
pub fn volume_percent() -> u8 {
    with_sound(|s| s.volume_percent()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn theme() -> String {
    with_sound(|s| s.theme().to_string()).unwrap_or_default()
}

/// Unknown theme names are ignored.
#[wasm_bindgen]
pub fn set_theme(theme: &str) {
    match theme.parse::<Theme>() {
        Ok(t) => {
            with_sound(|s| s.set_theme(t));
            dom::reflect_theme(t);
        }
        Err(e) => log::warn!("[theme] {}", e),
    }
}

#[wasm_bindgen]
pub fn toggle_theme() -> String {
    match with_sound(|s| s.toggle_theme()) {
        Some(t) => {
            dom::reflect_theme(t);
            t.to_string()
        }
        None => String::new(),
    }
}

/// Page-transition sound, called by the router on navigation.
#[wasm_bindgen]
pub fn play_whoosh() {
    with_sound(|s| {
        if let Err(e) = s.play(Effect::Whoosh) {
            log::debug!("[sfx] whoosh skipped: {}", e);
        }
    });
}

#[wasm_bindgen]
pub fn resume_audio() {
    with_sound(|s| s.resume());
}

#[wasm_bindgen]
pub fn shutdown() {
    with_sound(|s| s.shutdown());
}
