//! Pages rendering slices of the shared overview.

use leptos::*;

use crate::domain::intelligence::ReportPriority;
use crate::presentation::dashboard::{
    FetchStatus, PresenceBars, RefreshButton, ReportList, TrendBars, with_overview,
};

#[component]
fn PageHeader(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="page-header">
            <div>
                <h1 id="page-title">{title}</h1>
                <p class="muted">{subtitle}</p>
            </div>
            <RefreshButton/>
        </div>
        <FetchStatus/>
    }
}

#[component]
pub fn CompetitorsPage() -> impl IntoView {
    view! {
        <section class="page" aria-labelledby="page-title">
            <PageHeader title="Competitor Analysis" subtitle="Vendor coverage across tracked sources"/>
            {with_overview(|overview| {
                let leader = overview.competitive_presence.first().map(|e| e.vendor.clone());
                view! {
                    <div class="card">
                        <h2>"Market Presence"</h2>
                        {leader.map(|vendor| view! { <p>"Most covered vendor: " <strong>{vendor}</strong></p> })}
                        <PresenceBars entries=overview.competitive_presence/>
                    </div>
                    <div class="card">
                        <h2>"Defense Technologies Tracked"</h2>
                        <p class="metric-value">{overview.defense_technologies}</p>
                    </div>
                }
            })}
        </section>
    }
}

#[component]
pub fn IntelligencePage() -> impl IntoView {
    view! {
        <section class="page" aria-labelledby="page-title">
            <PageHeader title="Product Intelligence" subtitle="Threat analysis and recent coverage"/>
            {with_overview(|overview| {
                let high: Vec<_> = overview
                    .recent_reports
                    .iter()
                    .filter(|r| r.priority == ReportPriority::High)
                    .cloned()
                    .collect();
                view! {
                    <div class="card">
                        <h2>"Threat Landscape"</h2>
                        <p>{format!(
                            "{} threat reports, {} high impact",
                            overview.threats.threat_reports,
                            overview.threats.active_threats
                        )}</p>
                        {overview.threats.top_threat.clone().map(|t| view! { <p>"Top threat: " <strong>{t}</strong></p> })}
                    </div>
                    <div class="card">
                        <h2>"High Priority"</h2>
                        <ReportList reports=high/>
                    </div>
                    <div class="card">
                        <h2>"All Reports"</h2>
                        <ReportList reports=overview.recent_reports/>
                    </div>
                }
            })}
        </section>
    }
}

#[component]
pub fn MarketPage() -> impl IntoView {
    view! {
        <section class="page" aria-labelledby="page-title">
            <PageHeader title="Market Trends" subtitle="Growth of tracked market segments"/>
            {with_overview(|overview| {
                view! {
                    <div class="metric-grid">
                        <div class="metric-card">
                            <div class="metric-value">{format!("${}B", overview.market_size)}</div>
                            <div class="metric-label">"Market Size 2025"</div>
                        </div>
                        <div class="metric-card">
                            <div class="metric-value">{format!("{}%", overview.market_share_pct)}</div>
                            <div class="metric-label">"MDO Market Share"</div>
                        </div>
                    </div>
                    <div class="card">
                        <h2>"Segment Growth"</h2>
                        <TrendBars trends=overview.market_trends/>
                    </div>
                }
            })}
        </section>
    }
}
