use leptos::*;

use crate::domain::{
    errors::AppError,
    intelligence::{CompetitivePresenceEntry, MarketTrendEntry, OverviewViewModel, RecentReport},
    notifications::ToastKind,
    state::Loadable,
    subscription::OneTimeReportForm,
};
use crate::global_state::{banner_dismissed, fetch_phase, overview_state};
use crate::presentation::context::use_services;

/// Renders `content` once the overview is loaded.
pub fn with_overview<V: IntoView>(content: impl Fn(OverviewViewModel) -> V + 'static) -> impl IntoView {
    move || match overview_state().get() {
        Loadable::Loading => view! {
            <div class="loading" role="status" aria-busy="true">"Loading intelligence data…"</div>
        }
        .into_view(),
        Loadable::Failed(err) => view! {
            <div class="empty-state">
                <p>"No data available."</p>
                <p class="muted">{err.user_message()}</p>
            </div>
        }
        .into_view(),
        Loadable::Loaded(overview) => content(overview).into_view(),
    }
}

#[component]
pub fn RefreshButton() -> impl IntoView {
    let services = use_services();
    let busy = move || fetch_phase().get().is_busy();
    view! {
        <button
            class="btn btn-secondary"
            disabled=busy
            aria-busy=move || busy().to_string()
            on:click=move |_| services.refresh_overview(true)
        >
            {move || if busy() { "Refreshing…" } else { "Refresh" }}
        </button>
    }
}

/// Retry indicator while backing off; persistent banner once retries are exhausted.
#[component]
pub fn FetchStatus() -> impl IntoView {
    let services = use_services();
    let banner = move || {
        if banner_dismissed().get() {
            return None;
        }
        fetch_phase().with(|phase| phase.banner_error().cloned())
    };

    view! {
        {move || fetch_phase().with(|p| p.retry_indicator()).map(|text| view! {
            <div class="retry-indicator" role="status" aria-live="polite">{text}</div>
        })}
        {move || banner().map(|err: AppError| {
            let services = services.clone();
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-text">{err.user_message()}</span>
                    <button class="btn btn-primary" on:click=move |_| services.refresh_overview(true)>
                        "Retry"
                    </button>
                    <button
                        class="btn btn-link"
                        aria-label="Dismiss error"
                        on:click=move |_| banner_dismissed().set(true)
                    >
                        "×"
                    </button>
                </div>
            }
        })}
    }
}

#[component]
fn MetricCard(label: &'static str, value: String, #[prop(optional)] detail: Option<String>) -> impl IntoView {
    view! {
        <div class="metric-card">
            <div class="metric-value">{value}</div>
            <div class="metric-label">{label}</div>
            {detail.map(|d| view! { <div class="metric-detail">{d}</div> })}
        </div>
    }
}

#[component]
pub fn MetricGrid(overview: OverviewViewModel) -> impl IntoView {
    view! {
        <div class="metric-grid">
            <MetricCard
                label="Threat Reports"
                value=overview.threats.threat_reports.to_string()
                detail=overview.threats.top_threat.clone().unwrap_or_default()
            />
            <MetricCard label="Active Threats" value=overview.threats.active_threats.to_string()/>
            <MetricCard label="Market Size 2025" value=format!("${}B", overview.market_size)/>
            <MetricCard label="MDO Market Share" value=format!("{}%", overview.market_share_pct)/>
            <MetricCard label="Articles Analyzed" value=overview.articles_analyzed.to_string()/>
            <MetricCard label="Defense Technologies" value=overview.defense_technologies.to_string()/>
            <MetricCard label="Market Trend Score" value=format!("{:.1}", overview.market_trend_score)/>
        </div>
    }
}

#[component]
pub fn TrendBars(trends: Vec<MarketTrendEntry>) -> impl IntoView {
    if trends.is_empty() {
        return view! { <p class="muted">"No market trend data."</p> }.into_view();
    }
    view! {
        <ul class="bar-chart" aria-label="Market trend growth">
            {trends
                .into_iter()
                .map(|trend| {
                    let label = format!("{}: {}% growth, ${:.2}B", trend.name(), trend.growth(), trend.market_value());
                    view! {
                        <li class="bar-row" aria-label=label>
                            <span class="bar-name">{trend.name().to_string()}</span>
                            <span class="bar-track">
                                <span class="bar-fill" style:width=format!("{:.0}%", trend.relative_width())></span>
                            </span>
                            <span class="bar-value">{format!("{}%", trend.growth())}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_view()
}

#[component]
pub fn PresenceBars(entries: Vec<CompetitivePresenceEntry>) -> impl IntoView {
    let max = entries.iter().map(|e| e.articles).max().unwrap_or(0).max(1);
    view! {
        <ul class="bar-chart" aria-label="Competitive presence by vendor">
            {entries
                .into_iter()
                .map(|entry| {
                    let width = entry.articles as f64 / max as f64 * 100.0;
                    view! {
                        <li class="bar-row">
                            <span class="bar-name">{entry.vendor}</span>
                            <span class="bar-track">
                                <span class="bar-fill presence" style:width=format!("{width:.0}%")></span>
                            </span>
                            <span class="bar-value">{format!("{} articles", entry.articles)}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
pub fn ReportList(reports: Vec<RecentReport>, #[prop(optional)] limit: Option<usize>) -> impl IntoView {
    let limit = limit.unwrap_or(usize::MAX);
    if reports.is_empty() {
        return view! { <p class="muted">"No recent reports."</p> }.into_view();
    }
    view! {
        <ul class="report-list">
            {reports
                .into_iter()
                .take(limit)
                .map(|report| {
                    let priority = report.priority.to_string();
                    view! {
                        <li class="report-item">
                            <div class="report-header">
                                <span class=format!("priority-badge priority-{priority}")>{priority.clone()}</span>
                                <span class="report-category">{report.category}</span>
                            </div>
                            <h3 class="report-title">
                                {match report.url {
                                    Some(url) => view! {
                                        <a href=url target="_blank" rel="noopener noreferrer">{report.title}</a>
                                    }
                                    .into_view(),
                                    None => report.title.into_view(),
                                }}
                            </h3>
                            <p class="report-summary">{report.summary}</p>
                            <div class="report-meta">
                                <span>{report.agent_name}</span>
                                {report.created_at.map(|d| view! { <span>{d}</span> })}
                                <span>{format!("Relevance {:.0}/10", report.relevance_score)}</span>
                            </div>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_view()
}

/// "Email me this dashboard".
#[component]
pub fn EmailReportForm() -> impl IntoView {
    let services = use_services();
    let (email, set_email) = create_signal(String::new());
    let (name, set_name) = create_signal(String::new());
    let (sending, set_sending) = create_signal(false);
    let (field_error, set_field_error) = create_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = OneTimeReportForm { user_email: email.get_untracked(), user_name: name.get_untracked() };
        if let Err(err) = form.validate() {
            set_field_error.set(Some(err.message.clone()));
            services.toast(err.message, ToastKind::Warning);
            return;
        }
        set_field_error.set(None);
        set_sending.set(true);
        let worker = services.clone();
        services.perform(
            async move { worker.subscriptions().email_dashboard(&form, worker.token()).await },
            |_| "Report requested. Check your inbox shortly.".to_string(),
            move |result| {
                set_sending.set(false);
                if result.is_ok() {
                    set_email.set(String::new());
                }
            },
        );
    };

    view! {
        <form class="card email-report" on:submit=submit aria-labelledby="email-report-title">
            <h2 id="email-report-title">"Email this report"</h2>
            <label for="email-report-address">"Email address"</label>
            <input
                id="email-report-address"
                type="email"
                required=true
                aria-invalid=move || field_error.get().is_some().to_string()
                aria-describedby="email-report-error"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <label for="email-report-name">"Name (optional)"</label>
            <input
                id="email-report-name"
                type="text"
                prop:value=name
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <p id="email-report-error" class="field-error" role="alert">
                {move || field_error.get().unwrap_or_default()}
            </p>
            <button class="btn btn-primary" type="submit" disabled=sending>
                {move || if sending.get() { "Sending…" } else { "Send report" }}
            </button>
        </form>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <section class="page" aria-labelledby="page-title">
            <div class="page-header">
                <h1 id="page-title">"Competitive Intelligence Dashboard"</h1>
                <RefreshButton/>
            </div>
            <FetchStatus/>
            {with_overview(|overview| {
                let updated = js_sys::Date::new(&(overview.generated_at_ms as f64).into())
                    .to_locale_time_string("en-US")
                    .as_string()
                    .unwrap_or_default();
                view! {
                    <p class="muted">{format!("Last updated {updated}")}</p>
                    <MetricGrid overview=overview.clone()/>
                    <div class="two-column">
                        <div class="card">
                            <h2>"Market Trends"</h2>
                            <TrendBars trends=overview.market_trends.clone()/>
                        </div>
                        <div class="card">
                            <h2>"Competitive Presence"</h2>
                            <PresenceBars entries=overview.competitive_presence.clone()/>
                        </div>
                    </div>
                    <div class="card">
                        <h2>"Recent Intelligence Reports"</h2>
                        <ReportList reports=overview.recent_reports limit=6/>
                    </div>
                }
            })}
            <EmailReportForm/>
        </section>
    }
}
