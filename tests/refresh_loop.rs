mod common;

use std::cell::Cell;
use std::time::Duration;

use futures::executor::block_on;
use intel_dashboard_wasm::application::{CycleGate, RefreshLoop};
use intel_dashboard_wasm::domain::cancellation::CancellationToken;

use common::CancellingScheduler;

const INTERVAL: Duration = Duration::from_secs(900);

#[test]
fn runs_a_cycle_per_tick_until_cancelled() {
    let token = CancellationToken::new();
    let scheduler = CancellingScheduler::new(&token, 4);
    let gate = CycleGate::new();
    let refresh = RefreshLoop::new(INTERVAL, scheduler.clone(), gate.clone());
    let seen_busy = Cell::new(0);

    let ran = block_on(refresh.run(&token, |_guard| {
        if gate.is_busy() {
            seen_busy.set(seen_busy.get() + 1);
        }
        async {}
    }));

    assert_eq!(ran, 3);
    assert_eq!(seen_busy.get(), 3);
    assert!(!gate.is_busy());
    assert!(scheduler.sleeps.borrow().iter().all(|d| *d == INTERVAL));
}

#[test]
fn skips_ticks_while_a_cycle_is_in_flight() {
    let token = CancellationToken::new();
    let scheduler = CancellingScheduler::new(&token, 3);
    let gate = CycleGate::new();
    let refresh = RefreshLoop::new(INTERVAL, scheduler.clone(), gate.clone());
    let _manual = gate.try_begin();
    let calls = Cell::new(0);

    let ran = block_on(refresh.run(&token, |_guard| {
        calls.set(calls.get() + 1);
        async {}
    }));

    assert_eq!(ran, 0);
    assert_eq!(calls.get(), 0);
    assert_eq!(scheduler.sleeps(), 3);
}

#[test]
fn cancelled_token_stops_before_first_tick() {
    let token = CancellationToken::new();
    token.cancel();
    let scheduler = CancellingScheduler::new(&token, usize::MAX);
    let refresh = RefreshLoop::new(INTERVAL, scheduler, CycleGate::new());

    let ran = block_on(refresh.run(&token, |_guard| async {}));

    assert_eq!(ran, 0);
}
