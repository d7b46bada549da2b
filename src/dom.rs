//! Minimal view of the DOM the behaviors are written against.
//!
//! The browser implementation lives in `browser.rs`; tests use the synthetic
//! nodes from `testing.rs`.

/// Motion style for `scrollIntoView`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

pub trait Node: Clone + 'static {
    /// Finds the first descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<Self>;

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Inline style write. An empty value clears the property.
    fn set_style(&self, property: &str, value: &str);

    /// Intrinsic scrollable height in CSS pixels. Forces layout.
    fn scroll_height(&self) -> f64;

    /// Brings the element's top edge into view.
    fn scroll_into_view(&self, behavior: ScrollBehavior);

    /// Focuses without the browser's own scroll-into-view jump.
    fn focus_without_scroll(&self);

    /// Runs `callback` the next time the element loses focus, then forgets it.
    fn on_blur_once(&self, callback: Box<dyn FnOnce()>);
}

pub trait Document {
    type Node: Node;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    /// Vertical page scroll offset.
    fn scroll_y(&self) -> f64;
}

/// The event that triggered an operation, reduced to what the behaviors need.
pub trait Activation {
    fn prevent_default(&self);
}

/// Live "prefers reduced motion" source.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

/// Overlay controller the scroll coordinator closes on navigation.
#[cfg_attr(test, mockall::automock)]
pub trait NavOverlay {
    fn is_open(&self) -> bool;
    fn close(&self);
}

impl<T: NavOverlay + ?Sized> NavOverlay for std::rc::Rc<T> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn close(&self) {
        (**self).close()
    }
}

/// CSS pixel length, `0` for zero so collapsed panels read cleanly in devtools.
pub fn px(value: f64) -> String {
    if value <= 0.0 {
        "0".to_string()
    } else {
        format!("{}px", value)
    }
}
