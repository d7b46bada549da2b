use log::debug;

use crate::config::NavConfig;
use crate::dom::{Document, NavOverlay, Node};
use crate::error::Skip;

/// Burger-menu overlay. Open state lives in the nav element's class list so
/// stylesheet and script agree on it.
pub struct MobileNav<N: Node> {
    nav: N,
    toggle: N,
    body: Option<N>,
    open_class: String,
}

impl<N: Node> MobileNav<N> {
    pub fn new(nav: N, toggle: N, body: Option<N>, config: &NavConfig) -> Self {
        Self {
            nav,
            toggle,
            body,
            open_class: config.open_class.clone(),
        }
    }

    pub fn discover<D: Document<Node = N>>(doc: &D, config: &NavConfig) -> Result<Self, Skip> {
        let nav = doc
            .query(&config.nav_selector)
            .ok_or_else(|| Skip::MissingElement(config.nav_selector.clone()))?;
        let toggle = doc
            .query(&config.toggle_selector)
            .ok_or_else(|| Skip::MissingElement(config.toggle_selector.clone()))?;
        Ok(Self::new(nav, toggle, doc.body(), config))
    }

    pub fn toggle_button(&self) -> &N {
        &self.toggle
    }

    /// Flips the overlay and returns whether it is now open.
    pub fn toggle(&self) -> bool {
        let open = !self.is_open();
        self.apply(open);
        open
    }

    fn apply(&self, open: bool) {
        if open {
            self.nav.add_class(&self.open_class);
        } else {
            self.nav.remove_class(&self.open_class);
        }
        self.toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
        // Page behind the overlay must not scroll while it is open.
        if let Some(body) = &self.body {
            body.set_style("overflow", if open { "hidden" } else { "" });
        }
        debug!("mobile nav {}", if open { "opened" } else { "closed" });
    }
}

impl<N: Node> NavOverlay for MobileNav<N> {
    fn is_open(&self) -> bool {
        self.nav.has_class(&self.open_class)
    }

    fn close(&self) {
        self.apply(false);
    }
}
