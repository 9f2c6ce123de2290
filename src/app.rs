use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    application::AppConfig,
    domain::{
        accessibility::{AnnouncementPriority, MediaPreference},
        logging::LogComponent,
        navigation::Route,
    },
    event_utils::{EventListenerHandle, EventOptions, window_event_listener_with_options},
    global_state::{announcements, current_route, toasts},
    infrastructure::{document::MAIN_CONTENT_ID, media::BrowserMediaQueries},
    log_debug,
    presentation::{
        AppServices,
        accessibility_panel::AccessibilityPage,
        dashboard::DashboardPage,
        insights::{CompetitorsPage, IntelligencePage, MarketPage},
        reports::ReportsPage,
        subscriptions::SubscriptionsPage,
        use_services,
    },
};

const STYLES: &str = r#"
:root {
    --accessibility-font-scale: 1.1;
    --accessibility-font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    --bg: #f4f6fa;
    --surface: #ffffff;
    --text: #1c2430;
    --muted: #5b6573;
    --accent: #0b5cad;
    --border: #d5dbe3;
    --danger: #b3261e;
    --success: #1e7a3c;
    --warning: #8a5a00;
}

html { font-size: calc(16px * var(--accessibility-font-scale)); }

body {
    margin: 0;
    font-family: var(--accessibility-font-family);
    background: var(--bg);
    color: var(--text);
}

html.dark-mode {
    --bg: #12161c;
    --surface: #1c232d;
    --text: #e7ecf3;
    --muted: #9aa5b4;
    --accent: #6cb2ff;
    --border: #2e3947;
}

html.high-contrast {
    --bg: #000000;
    --surface: #000000;
    --text: #ffffff;
    --muted: #ffffff;
    --accent: #ffff00;
    --border: #ffffff;
}

html.large-text { font-size: calc(20px * var(--accessibility-font-scale)); }

html.reduced-motion *, html.reduced-motion *::before, html.reduced-motion *::after {
    animation-duration: 0.01ms !important;
    transition-duration: 0.01ms !important;
    scroll-behavior: auto !important;
}

html.keyboard-navigation *:focus { outline: 3px solid var(--accent); outline-offset: 2px; }

html.screen-reader-mode .decorative { display: none; }

.sr-only {
    position: absolute;
    width: 1px;
    height: 1px;
    padding: 0;
    margin: -1px;
    overflow: hidden;
    clip: rect(0, 0, 0, 0);
    border: 0;
}

.skip-link { position: absolute; left: -9999px; top: 0; }
.skip-link:focus { left: 8px; top: 8px; z-index: 100; background: var(--surface); padding: 8px 12px; }

.app-shell { display: grid; grid-template-columns: 220px 1fr; grid-template-rows: auto 1fr; min-height: 100vh; }
.app-header { grid-column: 1 / 3; display: flex; align-items: center; justify-content: space-between; padding: 12px 20px; background: var(--surface); border-bottom: 1px solid var(--border); }
.sidebar { background: var(--surface); border-right: 1px solid var(--border); padding: 16px 0; }
.sidebar ul { list-style: none; margin: 0; padding: 0; }
.sidebar a { display: block; padding: 10px 20px; color: var(--text); text-decoration: none; }
.sidebar a[aria-current="page"] { background: var(--bg); border-left: 4px solid var(--accent); font-weight: 600; }
main { padding: 24px; outline: none; }

.page-header { display: flex; align-items: center; justify-content: space-between; gap: 16px; }
.card { background: var(--surface); border: 1px solid var(--border); border-radius: 8px; padding: 16px; margin: 16px 0; }
.two-column { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; }
.muted { color: var(--muted); }

.metric-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; margin: 16px 0; }
.metric-card { background: var(--surface); border: 1px solid var(--border); border-radius: 8px; padding: 14px; }
.metric-value { font-size: 1.6rem; font-weight: 700; }
.metric-label, .metric-detail { color: var(--muted); font-size: 0.85rem; }

.bar-chart { list-style: none; padding: 0; margin: 0; }
.bar-row { display: grid; grid-template-columns: 160px 1fr 90px; align-items: center; gap: 8px; margin: 6px 0; }
.bar-track { background: var(--bg); border-radius: 4px; height: 12px; overflow: hidden; }
.bar-fill { display: block; height: 100%; background: var(--accent); transition: width 0.4s ease; }
.bar-fill.presence { background: var(--success); }

.report-list { list-style: none; padding: 0; }
.report-item { border-bottom: 1px solid var(--border); padding: 12px 0; }
.report-meta { display: flex; gap: 12px; color: var(--muted); font-size: 0.85rem; }
.priority-badge { font-size: 0.75rem; text-transform: uppercase; padding: 2px 6px; border-radius: 4px; margin-right: 8px; }
.priority-high { background: var(--danger); color: #fff; }
.priority-medium { background: var(--warning); color: #fff; }
.priority-low { background: var(--border); }

.btn { font: inherit; border-radius: 6px; padding: 6px 14px; cursor: pointer; border: 1px solid var(--border); background: var(--surface); color: var(--text); }
.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--accent); border-color: var(--accent); color: #fff; }
.btn-danger { background: var(--danger); border-color: var(--danger); color: #fff; }
.btn-link { background: none; border: none; }
.btn-chip[aria-pressed="true"] { border-color: var(--accent); font-weight: 600; }

form label { display: block; margin-top: 10px; font-weight: 600; }
form input[type="text"], form input[type="email"], form input[type="time"], form select, form textarea {
    width: 100%; box-sizing: border-box; padding: 6px 8px; font: inherit; border: 1px solid var(--border); border-radius: 4px;
}
form input[aria-invalid="true"] { border-color: var(--danger); }
.field-error { color: var(--danger); min-height: 1em; margin: 4px 0; }
.toggle-row { display: flex; align-items: center; gap: 8px; margin: 8px 0; }
.toggle-row label { margin: 0; }
.chip-list { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: 6px; }
.chip { background: var(--bg); border: 1px solid var(--border); border-radius: 12px; padding: 2px 4px 2px 10px; }
.inline-row { display: flex; gap: 8px; }

.subscription-list { list-style: none; padding: 0; }
.subscription-row { border-bottom: 1px solid var(--border); padding: 10px 0; }
.subscription-row.inactive { opacity: 0.7; }
.row-actions { display: flex; gap: 8px; margin-top: 8px; }

.retry-indicator { padding: 8px 12px; background: var(--bg); border-left: 4px solid var(--warning); margin: 8px 0; }
.error-banner { display: flex; align-items: center; gap: 12px; padding: 10px 12px; border: 1px solid var(--danger); border-radius: 6px; margin: 8px 0; }
.error-text { flex: 1; }
.loading, .empty-state { padding: 24px; text-align: center; }

.dialog-backdrop { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; justify-content: center; z-index: 50; }
.dialog-backdrop[hidden] { display: none; }
.dialog { background: var(--surface); border-radius: 8px; padding: 20px; max-width: 420px; width: 90%; }
.dialog-actions { display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px; }

.toast-host { position: fixed; right: 16px; bottom: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 60; }
.toast { display: flex; align-items: center; gap: 12px; padding: 10px 14px; border-radius: 6px; color: #fff; min-width: 240px; }
.toast-success { background: var(--success); }
.toast-info { background: var(--accent); }
.toast-warning { background: var(--warning); }
.toast-error { background: var(--danger); }
"#;

/// Root component: builds the services, wires browser listeners and routes pages.
#[component]
pub fn App() -> impl IntoView {
    let services = AppServices::new(AppConfig::from_document());
    provide_context(services.clone());

    let listeners = store_value(global_listeners(&services));
    let media = store_value(watch_environment(&services));

    services.refresh_overview(false);
    services.start_refresh_loop();

    on_cleanup(move || {
        listeners.set_value(Vec::new());
        media.set_value(Vec::new());
        services.shutdown();
    });

    view! {
        <style>{STYLES}</style>
        <SkipNavigation/>
        <div class="app-shell">
            <Header/>
            <Sidebar/>
            <main id=MAIN_CONTENT_ID tabindex="-1" aria-label=move || current_route().get().title()>
                <RoutedPage/>
            </main>
        </div>
        <LiveRegions/>
        <ToastHost/>
    }
}

/// Keyboard-mode detection and history navigation.
fn global_listeners(services: &AppServices) -> Vec<EventListenerHandle> {
    let keys = services.clone();
    let mouse = services.clone();
    let history = services.clone();
    [
        window_event_listener_with_options(ev::keydown, &EventOptions::default(), move |e| {
            keys.key_down(&e.key())
        }),
        window_event_listener_with_options(ev::mousedown, &EventOptions::default(), move |_| {
            mouse.mouse_down()
        }),
        window_event_listener_with_options(ev::popstate, &EventOptions::default(), move |_| {
            let path = web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string());
            let route = Route::from_path(&path);
            current_route().set(route);
            history.announce(&format!("Navigated to {}", route.title()), AnnouncementPriority::Polite);
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn watch_environment(services: &AppServices) -> Vec<EventListenerHandle> {
    let handles: Vec<_> = MediaPreference::iter()
        .filter_map(|preference| {
            let services = services.clone();
            BrowserMediaQueries.watch(preference, move |media, matches| {
                services.environment_changed(media, matches)
            })
        })
        .collect();
    log_debug!(LogComponent::Presentation("App"), "Watching {} media preferences", handles.len());
    handles
}

#[component]
fn SkipNavigation() -> impl IntoView {
    let services = use_services();
    view! {
        <a
            class="skip-link"
            href=format!("#{MAIN_CONTENT_ID}")
            on:click=move |ev: ev::MouseEvent| {
                ev.prevent_default();
                services.skip_to_content();
            }
        >
            "Skip to main content"
        </a>
    }
}

#[component]
fn Header() -> impl IntoView {
    let services = use_services();
    view! {
        <header class="app-header" role="banner">
            <strong>"Competitive Intelligence"</strong>
            <button
                class="btn btn-link"
                on:click=move |_| services.navigate(Route::Accessibility)
            >
                "Accessibility settings"
            </button>
        </header>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let services = use_services();
    view! {
        <nav class="sidebar" aria-label="Main navigation">
            <ul>
                {Route::iter()
                    .map(|route| {
                        let services = services.clone();
                        view! {
                            <li>
                                <a
                                    href=route.path()
                                    aria-current=move || (current_route().get() == route).then_some("page")
                                    on:click=move |ev: ev::MouseEvent| {
                                        ev.prevent_default();
                                        services.navigate(route);
                                    }
                                >
                                    {route.title()}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

#[component]
fn RoutedPage() -> impl IntoView {
    move || match current_route().get() {
        Route::Dashboard => view! { <DashboardPage/> }.into_view(),
        Route::Competitors => view! { <CompetitorsPage/> }.into_view(),
        Route::Intelligence => view! { <IntelligencePage/> }.into_view(),
        Route::Market => view! { <MarketPage/> }.into_view(),
        Route::Reports => view! { <ReportsPage/> }.into_view(),
        Route::Subscriptions => view! { <SubscriptionsPage/> }.into_view(),
        Route::Accessibility => view! { <AccessibilityPage/> }.into_view(),
    }
}

/// Polite and assertive live regions fed by the announcement queue.
#[component]
fn LiveRegions() -> impl IntoView {
    let messages = move |priority: AnnouncementPriority| {
        move || {
            announcements().with(|events| {
                events
                    .iter()
                    .filter(|e| e.priority == priority)
                    .map(|e| view! { <p>{e.message.clone()}</p> })
                    .collect_view()
            })
        }
    };
    view! {
        <div class="sr-only" role="status" aria-live="polite" aria-atomic="false">
            {messages(AnnouncementPriority::Polite)}
        </div>
        <div class="sr-only" role="alert" aria-live="assertive" aria-atomic="false">
            {messages(AnnouncementPriority::Assertive)}
        </div>
    }
}

#[component]
fn ToastHost() -> impl IntoView {
    let services = use_services();
    view! {
        <div class="toast-host">
            <For
                each=move || toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let services = services.clone();
                    let id = toast.id;
                    view! {
                        <div class=format!("toast toast-{}", toast.kind)>
                            <span>{toast.message}</span>
                            <button
                                class="btn btn-link"
                                aria-label="Dismiss notification"
                                on:click=move |_| services.dismiss_toast(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
