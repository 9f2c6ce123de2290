use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;

use crate::domain::Clock;

/// Source of delays for retry backoff and periodic refresh.
pub trait Scheduler {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Browser timers through `gloo-timers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_local()
    }
}

/// `Date.now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// Resolves every sleep immediately and records the requested delays.
#[derive(Clone, Debug, Default)]
pub struct ImmediateScheduler {
    delays: Rc<RefCell<Vec<Duration>>>,
}

impl ImmediateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

impl Scheduler for ImmediateScheduler {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        self.delays.borrow_mut().push(delay);
        futures::future::ready(()).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_scheduler_records() {
        let scheduler = ImmediateScheduler::new();
        futures::executor::block_on(scheduler.sleep(Duration::from_millis(1_000)));
        futures::executor::block_on(scheduler.clone().sleep(Duration::from_millis(2_000)));
        assert_eq!(scheduler.delays(), vec![Duration::from_millis(1_000), Duration::from_millis(2_000)]);
    }
}
