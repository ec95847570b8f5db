//! Classify document pointer/click events into UI sounds.

use crate::effects::Effect;
use instant::Instant;
use std::time::Duration;

/// Elements that count as interactive for sound purposes.
pub const INTERACTIVE_SELECTOR: &str = r#"a,button,[role="button"],input[type="range"]"#;

/// Navigation/header regions, by structure and role rather than by tag alone.
pub const NAV_REGION_SELECTOR: &str =
    r#"header,nav,[role="banner"],[role="navigation"],.hdr"#;

/// The slice of a DOM element the router needs.
pub trait UiElement: Sized {
    /// Nearest ancestor-or-self matching `INTERACTIVE_SELECTOR`.
    fn interactive_ancestor(&self) -> Option<Self>;
    /// Whether the element sits inside a `NAV_REGION_SELECTOR` region.
    fn in_navigation(&self) -> bool;
    /// Trimmed `href` of the nearest enclosing link, if any.
    fn link_href(&self) -> Option<String>;
    fn same_element(&self, other: &Self) -> bool;
}

/// Route-like paths (`/projects`) are internal; protocol-relative `//` is not.
pub fn is_internal_href(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

pub struct GestureRouter<E> {
    last: Option<E>,
    last_hover: Option<Instant>,
    debounce: Duration,
}

impl<E: UiElement> GestureRouter<E> {
    pub fn new(debounce: Duration) -> Self {
        Self {
            last: None,
            last_hover: None,
            debounce,
        }
    }

    /// Pointer entered `target`. Returns `Hover` unless it is the element
    /// already tracked or the previous hover was too recent.
    pub fn pointer_over(&mut self, target: &E, now: Instant) -> Option<Effect> {
        let el = target.interactive_ancestor()?;
        if self.last.as_ref().is_some_and(|l| l.same_element(&el)) {
            return None;
        }
        if let Some(prev) = self.last_hover {
            let elapsed = if now >= prev {
                now.duration_since(prev)
            } else {
                Duration::ZERO
            };
            if elapsed < self.debounce {
                return None;
            }
        }
        self.last_hover = Some(now);
        self.last = Some(el);
        Some(Effect::Hover)
    }

    /// Pointer left `target`; forget it if it was the tracked element.
    pub fn pointer_out(&mut self, target: &E) {
        if let Some(el) = target.interactive_ancestor() {
            if self.last.as_ref().is_some_and(|l| l.same_element(&el)) {
                self.last = None;
            }
        }
    }

    pub fn click(&self, target: &E) -> Option<Effect> {
        let el = target.interactive_ancestor()?;
        if el.in_navigation() {
            return Some(Effect::Nav);
        }
        match el.link_href() {
            Some(href) if is_internal_href(&href) => Some(Effect::Nav),
            _ => Some(Effect::Click),
        }
    }

    pub fn tracked(&self) -> Option<&E> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_href_rules() {
        assert!(is_internal_href("/projects"));
        assert!(is_internal_href("/"));
        assert!(!is_internal_href("//cdn.example.com/x"));
        assert!(!is_internal_href("https://example.com"));
        assert!(!is_internal_href("mailto:hi@example.com"));
        assert!(!is_internal_href("#contact"));
        assert!(!is_internal_href(""));
    }
}
