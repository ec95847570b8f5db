use sfx_core::gesture::{INTERACTIVE_SELECTOR, NAV_REGION_SELECTOR};
use sfx_core::{Theme, UiElement};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Mirror the theme onto `<html data-theme="...">`.
pub fn reflect_theme(theme: Theme) {
    if let Some(root) = window_document().and_then(|d| d.document_element()) {
        _ = root.set_attribute("data-theme", theme.as_str());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DomElement(pub web::Element);

impl DomElement {
    pub fn from_event(ev: &web::Event) -> Option<Self> {
        ev.target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(DomElement)
    }

    fn closest(&self, selector: &str) -> Option<web::Element> {
        self.0.closest(selector).ok().flatten()
    }
}

impl UiElement for DomElement {
    fn interactive_ancestor(&self) -> Option<Self> {
        self.closest(INTERACTIVE_SELECTOR).map(DomElement)
    }

    fn in_navigation(&self) -> bool {
        self.closest(NAV_REGION_SELECTOR).is_some()
    }

    fn link_href(&self) -> Option<String> {
        let href = self.closest("a")?.get_attribute("href")?;
        let href = href.trim();
        (!href.is_empty()).then(|| href.to_string())
    }

    fn same_element(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
