//! Page start-up: load config, find the markup, attach listeners.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Event;

use crate::accordion::{AccordionController, PanelGroup};
use crate::browser::{listen, BrowserDocument, BrowserNode, BrowserScheduler, MediaQueryMotion};
use crate::config::{Config, CONFIG_ELEMENT_ID};
use crate::dom::Document;
use crate::error::Skip;
use crate::header::HeaderShadow;
use crate::nav::MobileNav;
use crate::schedule::Scheduler;
use crate::scroll_focus::ScrollFocusCoordinator;

/// Runs `init` once the DOM is parsed, or right away if it already is.
pub fn when_ready(init: impl FnOnce() + 'static) -> Result<(), Skip> {
    let doc = BrowserDocument::current()?;
    if doc.document().ready_state() != "loading" {
        init();
        return Ok(());
    }
    let callback = Closure::once_into_js(move |_: Event| init());
    doc.document()
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|_| Skip::NoDocument)
}

pub fn run() -> Result<(), Skip> {
    let doc = BrowserDocument::current()?;
    let config = load_config(&doc);
    let scheduler = BrowserScheduler::new(doc.window().clone());

    let nav = wire_nav(&doc, &config);
    wire_accordion(&doc, &config, scheduler.clone());
    wire_scroll(&doc, &config, scheduler.clone(), nav);
    wire_header(&doc, &config, scheduler);

    info!("Site behaviors initialized");
    Ok(())
}

fn load_config(doc: &BrowserDocument) -> Config {
    let Some(raw) = doc.text_of(CONFIG_ELEMENT_ID) else {
        return Config::default();
    };
    Config::from_json(&raw).unwrap_or_else(|skip| {
        warn!("{}, falling back to defaults", skip);
        Config::default()
    })
}

fn wire_nav(doc: &BrowserDocument, config: &Config) -> Option<Rc<MobileNav<BrowserNode>>> {
    let nav = match MobileNav::discover(doc, &config.nav) {
        Ok(nav) => Rc::new(nav),
        Err(skip) => {
            debug!("Mobile nav not wired: {}", skip);
            return None;
        }
    };
    let toggled = nav.clone();
    listen(nav.toggle_button().target(), "click", move |event: Event| {
        event.prevent_default();
        toggled.toggle();
    });
    Some(nav)
}

fn wire_accordion(doc: &BrowserDocument, config: &Config, scheduler: BrowserScheduler) {
    let group = PanelGroup::discover(doc, &config.accordion);
    if group.is_empty() {
        debug!("No FAQ panels on this page");
        return;
    }
    let controller = Rc::new(AccordionController::new(group, scheduler, &config.accordion));

    for (index, trigger) in controller.triggers().into_iter().enumerate() {
        let controller = controller.clone();
        listen(trigger.target(), "click", move |_| {
            if let Err(skip) = controller.toggle(index) {
                debug!("FAQ toggle skipped: {}", skip);
            }
        });
    }

    let resized = controller.clone();
    listen(doc.window().as_ref(), "resize", move |_| resized.on_resize());

    info!(
        "FAQ accordion wired: {} panels, open: {:?}",
        controller.len(),
        controller.expanded_index()
    );
}

fn wire_scroll(
    doc: &BrowserDocument,
    config: &Config,
    scheduler: BrowserScheduler,
    nav: Option<Rc<MobileNav<BrowserNode>>>,
) {
    let triggers = doc.query_all(&config.scroll.trigger_selector);
    if triggers.is_empty() {
        return;
    }

    let motion = MediaQueryMotion::new(doc.window().clone());
    let mut coordinator =
        ScrollFocusCoordinator::new(doc.clone(), scheduler, motion, &config.scroll);
    if let Some(nav) = nav {
        coordinator = coordinator.with_overlay(nav);
    }
    let coordinator = Rc::new(coordinator);

    for trigger in &triggers {
        let coordinator = coordinator.clone();
        let node = trigger.clone();
        listen(trigger.target(), "click", move |event: Event| {
            // On skip the browser's own navigation runs untouched.
            if let Err(skip) = coordinator.activate(&node, &event) {
                debug!("Anchor left to the browser: {}", skip);
            }
        });
    }
    info!("Smooth scroll wired for {} anchors", triggers.len());
}

fn wire_header(doc: &BrowserDocument, config: &Config, scheduler: BrowserScheduler) {
    let shadow = match HeaderShadow::discover(doc, &config.header) {
        Ok(shadow) => RefCell::new(shadow),
        Err(skip) => {
            debug!("Header shadow not wired: {}", skip);
            return;
        }
    };

    let on_scroll = {
        let doc = doc.clone();
        move || {
            shadow
                .borrow_mut()
                .on_scroll(doc.scroll_y(), scheduler.now_ms());
        }
    };
    on_scroll();
    listen(doc.window().as_ref(), "scroll", move |_| on_scroll());
}
