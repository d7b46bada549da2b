//! Single-open FAQ accordion with animated `max-height` transitions.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::config::AccordionConfig;
use crate::dom::{px, Document, Node};
use crate::error::Skip;
use crate::schedule::{Debouncer, Scheduler};

const EXPANDED_ATTR: &str = "aria-expanded";

pub struct Panel<N> {
    trigger: N,
    content: N,
    expanded: bool,
    natural_height: f64,
}

impl<N: Node> Panel<N> {
    /// Takes the initial state from the trigger's `aria-expanded`.
    pub fn new(trigger: N, content: N) -> Self {
        let expanded = trigger.attribute(EXPANDED_ATTR).as_deref() == Some("true");
        Self {
            trigger,
            content,
            expanded,
            natural_height: 0.0,
        }
    }

    pub fn trigger(&self) -> &N {
        &self.trigger
    }

    fn project(&self) {
        let height = if self.expanded { self.natural_height } else { 0.0 };
        self.content.set_style("max-height", &px(height));
        self.trigger
            .set_attribute(EXPANDED_ATTR, if self.expanded { "true" } else { "false" });
    }
}

pub struct PanelGroup<N> {
    panels: Vec<Panel<N>>,
}

impl<N: Node> PanelGroup<N> {
    pub fn new(panels: Vec<Panel<N>>) -> Self {
        Self { panels }
    }

    /// Builds a group from possibly incomplete markup. Entries missing either
    /// element are dropped.
    pub fn from_parts(parts: impl IntoIterator<Item = (Option<N>, Option<N>)>) -> Self {
        let panels = parts
            .into_iter()
            .enumerate()
            .filter_map(|(idx, parts)| match parts {
                (Some(trigger), Some(content)) => Some(Panel::new(trigger, content)),
                (None, _) => {
                    debug!("{}", Skip::MissingTrigger(idx));
                    None
                }
                (_, None) => {
                    debug!("{}", Skip::MissingContent(idx));
                    None
                }
            })
            .collect();
        Self::new(panels)
    }

    /// Collects every FAQ item on the page. Content is found through the
    /// trigger's `aria-controls` reference, falling back to the item's own
    /// content element.
    pub fn discover<D: Document<Node = N>>(doc: &D, config: &AccordionConfig) -> Self {
        let parts = doc.query_all(&config.item_selector).into_iter().map(|item| {
            let trigger = item.query(&config.trigger_selector);
            let content = trigger
                .as_ref()
                .and_then(|t| t.attribute("aria-controls"))
                .and_then(|id| doc.by_id(&id))
                .or_else(|| item.query(&config.content_selector));
            (trigger, content)
        });
        Self::from_parts(parts)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panels(&self) -> &[Panel<N>] {
        &self.panels
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.panels.iter().position(|p| p.expanded)
    }

    fn initialize(&mut self, open_first: bool) {
        // Markup may mark several panels open; only the first one counts.
        let mut seen = false;
        for panel in &mut self.panels {
            if panel.expanded {
                panel.expanded = !seen;
                seen = true;
            }
        }
        if !seen && open_first {
            if let Some(first) = self.panels.first_mut() {
                first.expanded = true;
            }
        }

        // All reads before any write.
        let heights: Vec<f64> = self
            .panels
            .iter()
            .map(|p| p.content.scroll_height())
            .collect();
        for (panel, height) in self.panels.iter_mut().zip(heights) {
            panel.natural_height = height;
            panel.project();
        }
    }

    fn toggle(&mut self, index: usize) -> Result<bool, Skip> {
        let fired = self.panels.get(index).ok_or(Skip::NoSuchPanel(index))?;
        let was_expanded = fired.expanded;
        // Content may have changed since init.
        let height = fired.content.scroll_height();

        for (idx, other) in self.panels.iter_mut().enumerate() {
            if idx != index {
                other.expanded = false;
                other.project();
            }
        }

        let fired = &mut self.panels[index];
        fired.natural_height = height;
        fired.expanded = !was_expanded;
        fired.project();
        Ok(fired.expanded)
    }

    fn reconcile(&mut self) {
        let Some(panel) = self.panels.iter_mut().find(|p| p.expanded) else {
            return;
        };
        panel.natural_height = panel.content.scroll_height();
        panel.content.set_style("max-height", &px(panel.natural_height));
        debug!("Open FAQ panel re-measured at {}px", panel.natural_height);
    }
}

pub struct AccordionController<N: Node, S: Scheduler> {
    group: Rc<RefCell<PanelGroup<N>>>,
    resize: RefCell<Debouncer<S>>,
}

impl<N: Node, S: Scheduler> AccordionController<N, S> {
    /// Applies the initial state to the markup and takes ownership of the group.
    pub fn new(mut group: PanelGroup<N>, scheduler: S, config: &AccordionConfig) -> Self {
        group.initialize(config.open_first);
        Self {
            group: Rc::new(RefCell::new(group)),
            resize: RefCell::new(Debouncer::new(scheduler, config.resize_debounce_ms)),
        }
    }

    /// Trigger activation for the panel at `index`. Returns the panel's new
    /// expanded state.
    pub fn toggle(&self, index: usize) -> Result<bool, Skip> {
        self.group.borrow_mut().toggle(index)
    }

    /// Viewport resized. The open panel is re-measured once resizing settles.
    pub fn on_resize(&self) {
        let group = self.group.clone();
        self.resize
            .borrow_mut()
            .call(move || group.borrow_mut().reconcile());
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.group.borrow().expanded_index()
    }

    pub fn len(&self) -> usize {
        self.group.borrow().len()
    }

    pub fn triggers(&self) -> Vec<N> {
        self.group
            .borrow()
            .panels()
            .iter()
            .map(|p| p.trigger().clone())
            .collect()
    }
}
