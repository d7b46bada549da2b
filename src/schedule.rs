//! Deferred work: timeouts, animation frames, debounce and throttle.

/// Source of deferred callbacks. Dropping a returned handle cancels the task
/// if it has not run yet.
pub trait Scheduler: 'static {
    type Handle: 'static;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
    fn next_frame(&self, task: Box<dyn FnOnce()>) -> Self::Handle;
    fn now_ms(&self) -> f64;
}

/// Runs only the most recent call once `delay_ms` have passed without a newer
/// one. Earlier pending calls are discarded.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
        }
    }

    pub fn call(&mut self, task: impl FnOnce() + 'static) {
        // Replacing the handle drops, and so cancels, the previous timer.
        self.pending = Some(self.scheduler.after(self.delay_ms, Box::new(task)));
    }
}

/// Leading-edge throttle: the first call passes, later ones are ignored until
/// `limit_ms` have elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms: f64::from(limit_ms),
            last: None,
        }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < self.limit_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}
