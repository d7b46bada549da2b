use crate::config::HeaderConfig;
use crate::dom::{Document, Node};
use crate::error::Skip;
use crate::schedule::Throttle;

/// Drops a shadow under the sticky header once the page has scrolled.
pub struct HeaderShadow<N: Node> {
    header: N,
    threshold: f64,
    shadow: String,
    throttle: Throttle,
}

impl<N: Node> HeaderShadow<N> {
    pub fn new(header: N, config: &HeaderConfig) -> Self {
        Self {
            header,
            threshold: config.threshold_px,
            shadow: config.shadow.clone(),
            throttle: Throttle::new(config.throttle_ms),
        }
    }

    pub fn discover<D: Document<Node = N>>(doc: &D, config: &HeaderConfig) -> Result<Self, Skip> {
        doc.query(&config.selector)
            .map(|header| Self::new(header, config))
            .ok_or_else(|| Skip::MissingElement(config.selector.clone()))
    }

    /// Returns false when the event fell inside the throttle window.
    pub fn on_scroll(&mut self, scroll_y: f64, now_ms: f64) -> bool {
        if !self.throttle.ready(now_ms) {
            return false;
        }
        let shadow = if scroll_y > self.threshold {
            self.shadow.as_str()
        } else {
            "none"
        };
        self.header.set_style("box-shadow", shadow);
        true
    }
}
