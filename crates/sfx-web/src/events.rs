use crate::dom::DomElement;
use crate::with_sound;
use instant::Instant;
use sfx_core::{Effect, GestureRouter};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn play(effect: Effect) {
    with_sound(|s| {
        if let Err(e) = s.play(effect) {
            log::debug!("[sfx] {:?} skipped: {}", effect, e);
        }
    });
}

fn listen(
    document: &web::Document,
    event: &str,
    options: &web::AddEventListenerOptions,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    if let Err(e) = document.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        options,
    ) {
        log::warn!("[events] {} listener error: {:?}", event, e);
    }
    closure.forget();
}

/// Document-level listeners: hover/click sounds in the capture phase, and a
/// one-time pointerdown that unlocks audio.
pub fn wire_gestures(document: &web::Document, router: Rc<RefCell<GestureRouter<DomElement>>>) {
    let capture = web::AddEventListenerOptions::new();
    capture.set_capture(true);
    capture.set_passive(true);

    let r = router.clone();
    listen(document, "pointerover", &capture, move |ev| {
        let Some(target) = DomElement::from_event(&ev) else {
            return;
        };
        let effect = r.borrow_mut().pointer_over(&target, Instant::now());
        if let Some(effect) = effect {
            play(effect);
        }
    });

    let r = router.clone();
    listen(document, "pointerout", &capture, move |ev| {
        if let Some(target) = DomElement::from_event(&ev) {
            r.borrow_mut().pointer_out(&target);
        }
    });

    listen(document, "click", &capture, move |ev| {
        let Some(target) = DomElement::from_event(&ev) else {
            return;
        };
        let effect = router.borrow().click(&target);
        if let Some(effect) = effect {
            play(effect);
        }
    });

    let once = web::AddEventListenerOptions::new();
    once.set_once(true);
    once.set_passive(true);
    listen(document, "pointerdown", &once, move |_| {
        with_sound(|s| s.resume());
    });
}
