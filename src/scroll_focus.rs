//! In-page anchor navigation: smooth scroll, then move keyboard focus to the
//! destination without leaving it in the tab order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::ScrollConfig;
use crate::dom::{Activation, Document, MotionPreference, NavOverlay, Node, ScrollBehavior};
use crate::error::Skip;
use crate::schedule::Scheduler;

const TABINDEX: &str = "tabindex";
const TARGET_ATTR: &str = "data-scroll-target";

/// Remembers whether `tabindex` was added so the target can be put back the
/// way it was.
pub struct FocusMemento<N: Node> {
    target: N,
    added_tabindex: bool,
    focused: Cell<bool>,
    restored: Cell<bool>,
}

impl<N: Node> FocusMemento<N> {
    /// Makes `target` programmatically focusable if it is not already.
    pub fn grant(target: N) -> Self {
        let added_tabindex = target.attribute(TABINDEX).is_none();
        if added_tabindex {
            target.set_attribute(TABINDEX, "-1");
        }
        Self {
            target,
            added_tabindex,
            focused: Cell::new(false),
            restored: Cell::new(false),
        }
    }

    fn focus(memento: &Rc<Self>) {
        memento.focused.set(true);
        memento.target.focus_without_scroll();
        let on_blur = memento.clone();
        memento
            .target
            .on_blur_once(Box::new(move || on_blur.restore()));
    }

    pub fn restore(&self) {
        if self.added_tabindex && !self.restored.replace(true) {
            self.target.remove_attribute(TABINDEX);
        }
    }
}

struct PendingFocus<N: Node, H> {
    memento: Rc<FocusMemento<N>>,
    _task: H,
}

pub struct ScrollFocusCoordinator<D: Document, S: Scheduler> {
    doc: D,
    scheduler: S,
    motion: Box<dyn MotionPreference>,
    overlay: Option<Box<dyn NavOverlay>>,
    focus_delay_ms: u32,
    pending: RefCell<Option<PendingFocus<D::Node, S::Handle>>>,
}

impl<D: Document, S: Scheduler> ScrollFocusCoordinator<D, S> {
    pub fn new(
        doc: D,
        scheduler: S,
        motion: impl MotionPreference + 'static,
        config: &ScrollConfig,
    ) -> Self {
        Self {
            doc,
            scheduler,
            motion: Box::new(motion),
            overlay: None,
            focus_delay_ms: config.focus_delay_ms,
            pending: RefCell::new(None),
        }
    }

    /// Overlay to close whenever a navigation goes through.
    pub fn with_overlay(mut self, overlay: impl NavOverlay + 'static) -> Self {
        self.overlay = Some(Box::new(overlay));
        self
    }

    /// Selector the trigger points at: `data-scroll-target` first, then an
    /// `href` fragment. Bare `#` counts as no destination.
    pub fn destination(trigger: &D::Node) -> Result<String, Skip> {
        if let Some(selector) = trigger.attribute(TARGET_ATTR) {
            let selector = selector.trim();
            if !selector.is_empty() {
                return Ok(selector.to_string());
            }
        }
        match trigger.attribute("href") {
            Some(href) if href.starts_with('#') && href.len() > 1 => Ok(href),
            _ => Err(Skip::EmptyAnchor),
        }
    }

    /// Handles a click on `trigger`. On `Err` nothing was touched and the
    /// browser's default navigation proceeds.
    pub fn activate(&self, trigger: &D::Node, event: &dyn Activation) -> Result<(), Skip> {
        let selector = Self::destination(trigger)?;
        let target = self
            .doc
            .query(&selector)
            .ok_or(Skip::TargetNotFound(selector))?;

        event.prevent_default();

        if let Some(overlay) = &self.overlay {
            if overlay.is_open() {
                overlay.close();
            }
        }

        // A focus still waiting from an earlier click never happens now.
        if let Some(previous) = self.pending.borrow_mut().take() {
            if !previous.memento.focused.get() {
                previous.memento.restore();
            }
        }

        let reduced = self.motion.prefers_reduced_motion();
        target.scroll_into_view(if reduced {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        });

        let memento = Rc::new(FocusMemento::grant(target));
        let task: Box<dyn FnOnce()> = {
            let memento = memento.clone();
            Box::new(move || FocusMemento::focus(&memento))
        };
        let task = if reduced {
            self.scheduler.next_frame(task)
        } else {
            self.scheduler.after(self.focus_delay_ms, task)
        };
        *self.pending.borrow_mut() = Some(PendingFocus {
            memento,
            _task: task,
        });
        Ok(())
    }
}
