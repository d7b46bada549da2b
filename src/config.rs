use log::Level;
use serde::Deserialize;

use crate::error::Skip;

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub accordion: AccordionConfig,
    pub scroll: ScrollConfig,
    pub nav: NavConfig,
    pub header: HeaderConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    pub item_selector: String,
    pub trigger_selector: String,
    pub content_selector: String,
    pub resize_debounce_ms: u32,
    /// Expand the first panel when markup marks none as expanded.
    pub open_first: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub trigger_selector: String,
    /// Wait before focusing after a smooth scroll.
    pub focus_delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub nav_selector: String,
    pub toggle_selector: String,
    pub open_class: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    pub threshold_px: f64,
    pub throttle_ms: u32,
    pub shadow: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            item_selector: ".faq-item".to_string(),
            trigger_selector: ".faq-item__trigger".to_string(),
            content_selector: ".faq-item__content".to_string(),
            resize_debounce_ms: 200,
            open_first: false,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            trigger_selector: "a[href^=\"#\"], [data-scroll-target]".to_string(),
            focus_delay_ms: 300,
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            nav_selector: "[data-nav]".to_string(),
            toggle_selector: "[data-nav-toggle]".to_string(),
            open_class: "is-open".to_string(),
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: "[data-header]".to_string(),
            threshold_px: 50.0,
            throttle_ms: 100,
            shadow: "0 2px 10px rgba(0, 0, 0, 0.05)".to_string(),
        }
    }
}

impl Config {
    /// Parses the page's JSON overrides. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, Skip> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| Skip::InvalidConfig(e.to_string()))
    }
}
