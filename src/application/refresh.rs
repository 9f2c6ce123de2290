use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::domain::{
    cancellation::CancellationToken,
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::scheduler::Scheduler;

/// Single-flight gate shared by manual and periodic refreshes.
#[derive(Clone, Debug, Default)]
pub struct CycleGate {
    busy: Rc<Cell<bool>>,
}

/// Held for the duration of a cycle; reopens the gate on drop.
#[derive(Debug)]
pub struct CycleGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

impl CycleGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// `None` while another cycle holds the gate.
    pub fn try_begin(&self) -> Option<CycleGuard> {
        if self.busy.replace(true) {
            return None;
        }
        Some(CycleGuard { busy: self.busy.clone() })
    }
}

/// Re-runs the aggregation cycle on a fixed interval until cancelled.
pub struct RefreshLoop<Sch> {
    interval: Duration,
    scheduler: Sch,
    gate: CycleGate,
}

impl<Sch: Scheduler> RefreshLoop<Sch> {
    pub fn new(interval: Duration, scheduler: Sch, gate: CycleGate) -> Self {
        Self { interval, scheduler, gate }
    }

    /// Returns the number of cycles run once `token` is cancelled.
    pub async fn run<F, Fut>(&self, token: &CancellationToken, mut cycle: F) -> u32
    where
        F: FnMut(CycleGuard) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ran = 0;
        loop {
            if token.run(self.scheduler.sleep(self.interval)).await.is_err() {
                break;
            }
            match self.gate.try_begin() {
                Some(guard) => {
                    get_logger().debug(LogComponent::Application("RefreshLoop"), "Periodic refresh");
                    if token.run(cycle(guard)).await.is_err() {
                        break;
                    }
                    ran += 1;
                }
                None => get_logger().debug(
                    LogComponent::Application("RefreshLoop"),
                    "Refresh skipped, cycle already in flight",
                ),
            }
        }
        get_logger().debug(LogComponent::Application("RefreshLoop"), "Refresh loop stopped");
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_single_flight() {
        let gate = CycleGate::new();
        let guard = gate.try_begin();
        assert!(guard.is_some());
        assert!(gate.is_busy());
        assert!(gate.try_begin().is_none());
        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.try_begin().is_some());
    }
}
