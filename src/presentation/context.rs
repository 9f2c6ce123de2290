use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::application::{
    AccessibilityStore, AppConfig, CycleGate, OverviewLoader, RefreshLoop, RetryController,
    SubscriptionService, subscriptions::Notice,
};
use crate::domain::{
    Clock,
    accessibility::{AnnouncementPriority, FontSize, MediaPreference, PreferenceKey},
    cancellation::CancellationToken,
    errors::AppResult,
    logging::{LogComponent, get_logger},
    navigation::Route,
    notifications::{ToastKind, ToastQueue},
    state::Loadable,
};
use crate::global_state::{
    announcements, banner_dismissed, current_route, fetch_phase, overview_state, preferences, toasts,
};
use crate::infrastructure::{
    api::{HttpIntelligenceSource, HttpSubscriptionApi},
    document::BrowserDocument,
    http::ApiClient,
    media::BrowserMediaQueries,
    scheduler::{BrowserClock, GlooScheduler},
    speech::BrowserSpeech,
    storage::BrowserLocalStorage,
};

struct Inner {
    config: AppConfig,
    token: CancellationToken,
    gate: CycleGate,
    loader: OverviewLoader<HttpIntelligenceSource, BrowserClock>,
    retry: RetryController<GlooScheduler>,
    subscriptions: SubscriptionService<HttpSubscriptionApi>,
    accessibility: RefCell<AccessibilityStore>,
    toasts: RefCell<ToastQueue>,
}

/// Services shared by every view through Leptos context.
#[derive(Clone)]
pub struct AppServices(Rc<Inner>);

pub fn use_services() -> AppServices {
    expect_context::<AppServices>()
}

impl AppServices {
    pub fn new(config: AppConfig) -> Self {
        let client = ApiClient::new(config.api_base_url.clone()).with_timeout(config.request_timeout_ms);
        let accessibility = AccessibilityStore::new(
            BrowserLocalStorage,
            &BrowserMediaQueries,
            BrowserDocument,
            BrowserSpeech,
            BrowserClock,
        )
        .with_announcement_ttl(config.announcement_ttl_ms);
        preferences().set(accessibility.preferences());

        Self(Rc::new(Inner {
            token: CancellationToken::new(),
            gate: CycleGate::new(),
            loader: OverviewLoader::new(HttpIntelligenceSource::new(client.clone()), BrowserClock),
            retry: RetryController::new(config.retry_policy, GlooScheduler),
            subscriptions: SubscriptionService::new(HttpSubscriptionApi::new(client)),
            accessibility: RefCell::new(accessibility),
            toasts: RefCell::new(ToastQueue::new()),
            config,
        }))
    }

    pub fn token(&self) -> &CancellationToken {
        &self.0.token
    }

    pub fn subscriptions(&self) -> &SubscriptionService<HttpSubscriptionApi> {
        &self.0.subscriptions
    }

    /// Cancels every in-flight request, retry sleep and the refresh loop.
    pub fn shutdown(&self) {
        get_logger().info(LogComponent::Presentation("AppServices"), "Shutting down");
        self.0.token.cancel();
        self.stop_speech();
    }

    // Overview

    /// Starts a cycle unless one is already running. Manual refreshes bypass caches.
    pub fn refresh_overview(&self, force_refresh: bool) {
        let Some(guard) = self.0.gate.try_begin() else {
            get_logger().debug(LogComponent::Presentation("AppServices"), "Refresh already in flight");
            return;
        };
        let services = self.clone();
        spawn_local(async move {
            services.run_cycle(force_refresh).await;
            drop(guard);
        });
    }

    async fn run_cycle(&self, force_refresh: bool) {
        banner_dismissed().set(false);
        let result = self
            .0
            .loader
            .load_with_retry(&self.0.retry, force_refresh, &self.0.token, |phase| fetch_phase().set(phase))
            .await;
        match result {
            Ok(overview) => {
                overview_state().set(Loadable::Loaded(overview));
                if force_refresh {
                    self.announce("Dashboard data refreshed", AnnouncementPriority::Polite);
                }
            }
            Err(err) if err.is_cancelled() => {}
            Err(err) => {
                // Keep stale data on screen; the banner carries the error.
                if overview_state().with_untracked(|s| s.loaded().is_none()) {
                    overview_state().set(Loadable::Failed(err.clone()));
                }
                self.announce(&err.user_message(), AnnouncementPriority::Assertive);
            }
        }
    }

    /// Periodic background refresh sharing the manual refresh's gate.
    pub fn start_refresh_loop(&self) {
        let services = self.clone();
        spawn_local(async move {
            let refresh = RefreshLoop::new(services.0.config.refresh_interval, GlooScheduler, services.0.gate.clone());
            let token = services.0.token.clone();
            refresh
                .run(&token, |guard| {
                    let services = services.clone();
                    async move {
                        services.run_cycle(false).await;
                        drop(guard);
                    }
                })
                .await;
        });
    }

    // Accessibility

    fn with_store<R>(&self, f: impl FnOnce(&mut AccessibilityStore) -> R) -> R {
        let result = f(&mut self.0.accessibility.borrow_mut());
        let store = self.0.accessibility.borrow();
        preferences().set(store.preferences());
        announcements().set(store.announcements());
        result
    }

    pub fn set_preference(&self, key: PreferenceKey, value: bool) {
        self.with_store(|store| store.set_flag(key, value));
        let state = if value { "enabled" } else { "disabled" };
        self.announce(&format!("{} {state}", key.label()), AnnouncementPriority::Polite);
    }

    pub fn set_font_size(&self, size: FontSize) {
        self.with_store(|store| store.set_font_size(size));
    }

    pub fn environment_changed(&self, media: MediaPreference, matches: bool) {
        self.with_store(|store| store.apply_environment_change(media, matches));
    }

    pub fn key_down(&self, key: &str) {
        self.with_store(|store| store.on_key_down(key));
    }

    pub fn mouse_down(&self) {
        self.with_store(|store| store.on_mouse_down());
    }

    pub fn skip_to_content(&self) {
        if self.with_store(|store| store.skip_to_content()) {
            self.schedule_expiry();
        }
    }

    pub fn stop_speech(&self) {
        self.0.accessibility.borrow().stop_speech();
    }

    pub fn trap_focus(&self, container: &web_sys::HtmlElement) -> crate::infrastructure::focus_trap::FocusTrap {
        self.0.accessibility.borrow().trap_focus(container)
    }

    /// Queues a live-region message and schedules its expiry.
    pub fn announce(&self, message: &str, priority: AnnouncementPriority) {
        self.with_store(|store| store.announce(message, priority));
        self.schedule_expiry();
    }

    fn schedule_expiry(&self) {
        let ttl = self.0.accessibility.borrow().announcement_ttl_ms();
        let services = self.clone();
        self.after(ttl, move || {
            services.with_store(|store| store.expire_due());
        });
    }

    pub fn dismiss_announcement(&self, id: u64) {
        self.with_store(|store| store.dismiss(id));
    }

    // Toasts

    pub fn toast(&self, message: impl Into<String>, kind: ToastKind) {
        self.0.toasts.borrow_mut().push(message, kind, BrowserClock.now_ms());
        self.sync_toasts();
        let services = self.clone();
        self.after(kind.lifetime_ms(), move || {
            services.0.toasts.borrow_mut().expire(BrowserClock.now_ms());
            services.sync_toasts();
        });
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.0.toasts.borrow_mut().dismiss(id);
        self.sync_toasts();
    }

    fn sync_toasts(&self) {
        toasts().set(self.0.toasts.borrow().toasts());
    }

    /// Toast plus announcement for a finished action.
    pub fn notify(&self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            self.announce(&notice.message, notice.priority);
            self.toast(notice.message, notice.kind);
        }
    }

    /// Runs an async action under the app token and reports its outcome.
    pub fn perform<T: 'static, Fut>(
        &self,
        action: Fut,
        success: impl FnOnce(&T) -> String + 'static,
        done: impl FnOnce(&AppResult<T>) + 'static,
    ) where
        Fut: Future<Output = AppResult<T>> + 'static,
    {
        let services = self.clone();
        spawn_local(async move {
            let result = action.await;
            services.notify(Notice::from_result(&result, success));
            done(&result);
        });
    }

    fn after(&self, delay_ms: u64, f: impl FnOnce() + 'static) {
        let token = self.0.token.clone();
        spawn_local(async move {
            let delay = u32::try_from(delay_ms).unwrap_or(u32::MAX);
            if token.run(TimeoutFuture::new(delay)).await.is_ok() {
                f();
            }
        });
    }

    // Navigation

    pub fn navigate(&self, route: Route) {
        if current_route().get_untracked() == route {
            return;
        }
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let pushed = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.path()));
            if let Err(e) = pushed {
                get_logger().warn(
                    LogComponent::Presentation("AppServices"),
                    &format!("pushState to {} failed: {e:?}", route.path()),
                );
            }
        }
        current_route().set(route);
        self.announce(&format!("Navigated to {}", route.title()), AnnouncementPriority::Polite);
    }
}
