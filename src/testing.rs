//! Synthetic DOM and fake clock for native tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::dom::{Activation, Document, MotionPreference, Node, ScrollBehavior};
use crate::schedule::Scheduler;

#[derive(Default)]
struct NodeState {
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    style_writes: usize,
    children: Vec<(String, FakeNode)>,
    scroll_height: f64,
    scrolls: Vec<ScrollBehavior>,
    focused: bool,
    blur_listeners: Vec<Box<dyn FnOnce()>>,
}

#[derive(Clone, Default)]
pub struct FakeNode(Rc<RefCell<NodeState>>);

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.0.borrow_mut().classes.insert(class.to_string());
        self
    }

    pub fn with_height(self, height: f64) -> Self {
        self.0.borrow_mut().scroll_height = height;
        self
    }

    pub fn with_child(self, selector: &str, child: &FakeNode) -> Self {
        self.0
            .borrow_mut()
            .children
            .push((selector.to_string(), child.clone()));
        self
    }

    pub fn set_scroll_height(&self, height: f64) {
        self.0.borrow_mut().scroll_height = height;
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn style_writes(&self) -> usize {
        self.0.borrow().style_writes
    }

    pub fn scrolls(&self) -> Vec<ScrollBehavior> {
        self.0.borrow().scrolls.clone()
    }

    pub fn is_focused(&self) -> bool {
        self.0.borrow().focused
    }

    /// Simulates focus leaving the element.
    pub fn blur(&self) {
        let listeners = {
            let mut state = self.0.borrow_mut();
            state.focused = false;
            std::mem::take(&mut state.blur_listeners)
        };
        for listener in listeners {
            listener();
        }
    }

    pub fn blur_listener_count(&self) -> usize {
        self.0.borrow().blur_listeners.len()
    }
}

impl Node for FakeNode {
    fn query(&self, selector: &str) -> Option<Self> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|(sel, _)| sel == selector)
            .map(|(_, node)| node.clone())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attrs.remove(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut state = self.0.borrow_mut();
        state.style_writes += 1;
        if value.is_empty() {
            state.styles.remove(property);
        } else {
            state.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn scroll_height(&self) -> f64 {
        self.0.borrow().scroll_height
    }

    fn scroll_into_view(&self, behavior: ScrollBehavior) {
        self.0.borrow_mut().scrolls.push(behavior);
    }

    fn focus_without_scroll(&self) {
        self.0.borrow_mut().focused = true;
    }

    fn on_blur_once(&self, callback: Box<dyn FnOnce()>) {
        self.0.borrow_mut().blur_listeners.push(callback);
    }
}

#[derive(Default)]
pub struct FakeDocument {
    selectors: RefCell<HashMap<String, Vec<FakeNode>>>,
    ids: RefCell<HashMap<String, FakeNode>>,
    body: FakeNode,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, selector: &str, node: &FakeNode) {
        self.selectors
            .borrow_mut()
            .entry(selector.to_string())
            .or_default()
            .push(node.clone());
    }

    pub fn insert_id(&self, id: &str, node: &FakeNode) {
        self.ids.borrow_mut().insert(id.to_string(), node.clone());
        self.insert(&format!("#{}", id), node);
    }

    pub fn body_node(&self) -> FakeNode {
        self.body.clone()
    }
}

impl Document for FakeDocument {
    type Node = FakeNode;

    fn query(&self, selector: &str) -> Option<FakeNode> {
        self.selectors
            .borrow()
            .get(selector)
            .and_then(|nodes| nodes.first().cloned())
    }

    fn query_all(&self, selector: &str) -> Vec<FakeNode> {
        self.selectors
            .borrow()
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    fn by_id(&self, id: &str) -> Option<FakeNode> {
        self.ids.borrow().get(id).cloned()
    }

    fn body(&self) -> Option<FakeNode> {
        Some(self.body.clone())
    }

    fn scroll_y(&self) -> f64 {
        0.0
    }
}

struct Entry {
    due: f64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: f64,
    seq: u64,
    timers: Vec<Entry>,
    frames: Vec<Entry>,
}

impl Clock {
    fn entry(&mut self, due: f64, task: Box<dyn FnOnce()>) -> (Entry, FakeTask) {
        self.seq += 1;
        let cancelled = Rc::new(Cell::new(false));
        let entry = Entry {
            due,
            seq: self.seq,
            cancelled: cancelled.clone(),
            task,
        };
        (entry, FakeTask(cancelled))
    }
}

/// Cancels its task when dropped, like a gloo `Timeout`.
pub struct FakeTask(Rc<Cell<bool>>);

impl Drop for FakeTask {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// Manually driven clock. Timers fire in `advance`, frames in `run_frames`.
#[derive(Clone, Default)]
pub struct FakeScheduler(Rc<RefCell<Clock>>);

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u32) {
        let target = self.0.borrow().now + f64::from(ms);
        loop {
            let next = {
                let mut clock = self.0.borrow_mut();
                clock.timers.retain(|e| !e.cancelled.get());
                let due = clock
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by(|(_, a), (_, b)| {
                        a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq))
                    })
                    .map(|(idx, _)| idx);
                let task = due.map(|idx| {
                    let entry = clock.timers.remove(idx);
                    clock.now = entry.due;
                    entry.task
                });
                task
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.0.borrow_mut().now = target;
    }

    pub fn run_frames(&self) {
        let frames = std::mem::take(&mut self.0.borrow_mut().frames);
        for entry in frames {
            if !entry.cancelled.get() {
                (entry.task)();
            }
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.0
            .borrow()
            .timers
            .iter()
            .filter(|e| !e.cancelled.get())
            .count()
    }

    pub fn pending_frames(&self) -> usize {
        self.0
            .borrow()
            .frames
            .iter()
            .filter(|e| !e.cancelled.get())
            .count()
    }
}

impl Scheduler for FakeScheduler {
    type Handle = FakeTask;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> FakeTask {
        let mut clock = self.0.borrow_mut();
        let due = clock.now + f64::from(delay_ms);
        let (entry, handle) = clock.entry(due, task);
        clock.timers.push(entry);
        handle
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) -> FakeTask {
        let mut clock = self.0.borrow_mut();
        let due = clock.now;
        let (entry, handle) = clock.entry(due, task);
        clock.frames.push(entry);
        handle
    }

    fn now_ms(&self) -> f64 {
        self.0.borrow().now
    }
}

#[derive(Clone, Default)]
pub struct FakeMotion(Rc<Cell<bool>>);

impl FakeMotion {
    pub fn reduced() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn set_reduced(&self, reduced: bool) {
        self.0.set(reduced);
    }
}

impl MotionPreference for FakeMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0.get()
    }
}

#[derive(Default)]
pub struct FakeClick {
    prevented: Cell<bool>,
}

impl FakeClick {
    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl Activation for FakeClick {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}
