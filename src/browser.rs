//! `web-sys` backed implementations of the DOM and scheduling traits.

use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Date, Function};
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, FocusOptions, HtmlElement, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::dom::{Activation, Document, MotionPreference, Node, ScrollBehavior};
use crate::error::Skip;
use crate::schedule::Scheduler;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Clone)]
pub struct BrowserNode(HtmlElement);

impl BrowserNode {
    fn from_element(element: web_sys::Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }

    pub fn target(&self) -> &EventTarget {
        self.0.as_ref()
    }
}

impl Node for BrowserNode {
    fn query(&self, selector: &str) -> Option<Self> {
        self.0
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(Self::from_element)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.0.remove_attribute(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn set_style(&self, property: &str, value: &str) {
        let style = self.0.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn scroll_height(&self) -> f64 {
        f64::from(self.0.scroll_height())
    }

    fn scroll_into_view(&self, behavior: ScrollBehavior) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        options.set_block(ScrollLogicalPosition::Start);
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn focus_without_scroll(&self) {
        let options = FocusOptions::new();
        options.set_prevent_scroll(true);
        let _ = self.0.focus_with_options(&options);
    }

    fn on_blur_once(&self, callback: Box<dyn FnOnce()>) {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let listener = Closure::once_into_js(move |_: Event| callback());
        let _ = self
            .0
            .add_event_listener_with_callback_and_add_event_listener_options(
                "blur",
                listener.unchecked_ref(),
                &options,
            );
    }
}

#[derive(Clone)]
pub struct BrowserDocument {
    window: Window,
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn current() -> Result<Self, Skip> {
        let window = web_sys::window().ok_or(Skip::NoWindow)?;
        let document = window.document().ok_or(Skip::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    pub fn text_of(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.text_content())
    }
}

impl Document for BrowserDocument {
    type Node = BrowserNode;

    fn query(&self, selector: &str) -> Option<BrowserNode> {
        // Invalid selectors throw; treat them like no match.
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(BrowserNode::from_element)
    }

    fn query_all(&self, selector: &str) -> Vec<BrowserNode> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|idx| list.get(idx))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(BrowserNode)
            .collect()
    }

    fn by_id(&self, id: &str) -> Option<BrowserNode> {
        self.document
            .get_element_by_id(id)
            .and_then(BrowserNode::from_element)
    }

    fn body(&self) -> Option<BrowserNode> {
        self.document.body().map(BrowserNode)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

impl Activation for Event {
    fn prevent_default(&self) {
        Event::prevent_default(self);
    }
}

/// Evaluates the media query on every call so a preference changed while
/// the page is open takes effect immediately.
pub struct MediaQueryMotion {
    window: Window,
}

impl MediaQueryMotion {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl MotionPreference for MediaQueryMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }
}

pub struct AnimationFrame {
    window: Window,
    id: i32,
}

impl Drop for AnimationFrame {
    fn drop(&mut self) {
        let _ = self.window.cancel_animation_frame(self.id);
    }
}

pub enum BrowserTask {
    Timeout(Timeout),
    Frame(AnimationFrame),
    /// Ran synchronously because no frame could be requested.
    Done,
}

#[derive(Clone)]
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTask;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> BrowserTask {
        BrowserTask::Timeout(Timeout::new(delay_ms, task))
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) -> BrowserTask {
        let callback = Closure::once_into_js(move |_: f64| task());
        match self
            .window
            .request_animation_frame(callback.unchecked_ref::<Function>())
        {
            Ok(id) => BrowserTask::Frame(AnimationFrame {
                window: self.window.clone(),
                id,
            }),
            Err(_) => {
                let _ = callback
                    .unchecked_ref::<Function>()
                    .call0(&JsValue::NULL);
                BrowserTask::Done
            }
        }
    }

    fn now_ms(&self) -> f64 {
        Date::now()
    }
}

/// Attaches a listener for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("failed to attach {} listener", event);
    }
    callback.forget();
}
