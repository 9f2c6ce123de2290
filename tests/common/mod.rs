#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};

use intel_dashboard_wasm::domain::{
    Clock,
    accessibility::MediaPreference,
    cancellation::CancellationToken,
    errors::{AppError, AppResult},
    intelligence::{CompetitiveMetrics, MarketIntelligence, MarketTrendsData},
    subscription::{PipelineRequest, SubscribeRequest, SubscriptionUpdate},
};
use intel_dashboard_wasm::infrastructure::{
    api::{
        IntelligenceSource, SubscriptionApi,
        subscriptions::{PipelineAck, SubscriptionList},
    },
    document::DocumentAdapter,
    media::EnvironmentPreferences,
    scheduler::Scheduler,
    speech::SpeechOutput,
};

/// Scripted responses per endpoint; an empty script answers with defaults.
#[derive(Default)]
pub struct FakeSource {
    pub market: RefCell<VecDeque<AppResult<MarketIntelligence>>>,
    pub competitive: RefCell<VecDeque<AppResult<CompetitiveMetrics>>>,
    pub trends: RefCell<VecDeque<AppResult<MarketTrendsData>>>,
    pub market_calls: Cell<u32>,
    pub competitive_calls: Cell<u32>,
    pub trends_calls: Cell<u32>,
}

fn next<T: Default>(script: &RefCell<VecDeque<AppResult<T>>>, calls: &Cell<u32>) -> AppResult<T> {
    calls.set(calls.get() + 1);
    script.borrow_mut().pop_front().unwrap_or_else(|| Ok(T::default()))
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_market(self, errors: impl IntoIterator<Item = AppError>) -> Self {
        self.market.borrow_mut().extend(errors.into_iter().map(Err));
        self
    }
}

impl IntelligenceSource for FakeSource {
    fn market_intelligence<'a>(
        &'a self,
        _force_refresh: bool,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<MarketIntelligence>> {
        futures::future::ready(next(&self.market, &self.market_calls)).boxed_local()
    }

    fn competitive_metrics<'a>(
        &'a self,
        _force_refresh: bool,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<CompetitiveMetrics>> {
        futures::future::ready(next(&self.competitive, &self.competitive_calls)).boxed_local()
    }

    fn market_trends<'a>(
        &'a self,
        _force_refresh: bool,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<MarketTrendsData>> {
        futures::future::ready(next(&self.trends, &self.trends_calls)).boxed_local()
    }
}

/// Cancels the token from inside the `n`th sleep (1-based).
#[derive(Clone)]
pub struct CancellingScheduler {
    pub token: CancellationToken,
    pub cancel_on: usize,
    pub sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl CancellingScheduler {
    pub fn new(token: &CancellationToken, cancel_on: usize) -> Self {
        Self { token: token.clone(), cancel_on, sleeps: Rc::default() }
    }

    pub fn sleeps(&self) -> usize {
        self.sleeps.borrow().len()
    }
}

impl Scheduler for CancellingScheduler {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(delay);
        if self.sleeps.borrow().len() >= self.cancel_on {
            self.token.cancel();
        }
        futures::future::ready(()).boxed_local()
    }
}

#[derive(Clone, Default)]
pub struct ManualClock(pub Rc<Cell<u64>>);

impl ManualClock {
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

#[derive(Clone, Default)]
pub struct RecordingDocument {
    pub classes: Rc<RefCell<BTreeMap<String, bool>>>,
    pub properties: Rc<RefCell<BTreeMap<String, String>>>,
    pub focused: Rc<RefCell<Vec<String>>>,
}

impl RecordingDocument {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().get(class).copied().unwrap_or(false)
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.properties.borrow().get(name).cloned()
    }
}

impl DocumentAdapter for RecordingDocument {
    fn set_property(&self, name: &str, value: &str) {
        self.properties.borrow_mut().insert(name.to_string(), value.to_string());
    }

    fn set_class(&self, class: &str, enabled: bool) {
        self.classes.borrow_mut().insert(class.to_string(), enabled);
    }

    fn focus_element(&self, id: &str) -> bool {
        self.focused.borrow_mut().push(id.to_string());
        true
    }
}

#[derive(Clone, Default)]
pub struct RecordingSpeech {
    pub spoken: Rc<RefCell<Vec<String>>>,
    pub cancels: Rc<Cell<u32>>,
}

impl SpeechOutput for RecordingSpeech {
    fn speak(&self, text: &str) {
        self.spoken.borrow_mut().push(text.to_string());
    }

    fn cancel(&self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}

/// Media queries that match exactly the listed preferences.
#[derive(Default)]
pub struct FixedEnvironment(pub Vec<MediaPreference>);

impl EnvironmentPreferences for FixedEnvironment {
    fn matches(&self, preference: MediaPreference) -> bool {
        self.0.contains(&preference)
    }
}

/// Counts every call; answers with fixed successes.
#[derive(Default)]
pub struct CountingSubscriptionApi {
    pub calls: Cell<u32>,
    pub last_pipeline: RefCell<Option<PipelineRequest>>,
}

impl CountingSubscriptionApi {
    fn ok<'a, T: 'a>(&'a self, value: T) -> LocalBoxFuture<'a, AppResult<T>> {
        self.calls.set(self.calls.get() + 1);
        futures::future::ready(Ok(value)).boxed_local()
    }
}

impl SubscriptionApi for CountingSubscriptionApi {
    fn subscribe<'a>(
        &'a self,
        _request: &'a SubscribeRequest,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>> {
        self.ok("Subscription created successfully".to_string())
    }

    fn list<'a>(
        &'a self,
        _email: &'a str,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<SubscriptionList>> {
        self.ok(SubscriptionList::default())
    }

    fn update<'a>(
        &'a self,
        _id: u64,
        _update: &'a SubscriptionUpdate,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>> {
        self.ok("Subscription updated".to_string())
    }

    fn unsubscribe<'a>(&'a self, _id: u64, _token: &'a CancellationToken) -> LocalBoxFuture<'a, AppResult<String>> {
        self.ok("Unsubscribed".to_string())
    }

    fn reactivate<'a>(&'a self, _id: u64, _token: &'a CancellationToken) -> LocalBoxFuture<'a, AppResult<String>> {
        self.ok("Reactivated".to_string())
    }

    fn unsubscribe_all<'a>(
        &'a self,
        _email: &'a str,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>> {
        self.ok("All subscriptions cancelled".to_string())
    }

    fn request_report<'a>(
        &'a self,
        request: &'a PipelineRequest,
        _token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<PipelineAck>> {
        *self.last_pipeline.borrow_mut() = Some(request.clone());
        self.ok(PipelineAck::default())
    }
}
