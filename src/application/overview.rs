use crate::application::retry_controller::RetryController;
use crate::domain::{
    Clock,
    cancellation::CancellationToken,
    errors::{AppError, AppResult, Endpoint},
    intelligence::{OverviewViewModel, build_overview},
    logging::LogComponent,
    retry::FetchPhase,
};
use crate::infrastructure::{api::IntelligenceSource, scheduler::Scheduler};
use crate::{log_debug, log_info};

/// Runs one aggregation: three concurrent fetches folded into the overview.
pub struct OverviewLoader<S, C> {
    source: S,
    clock: C,
}

fn tag<T>(endpoint: Endpoint, result: AppResult<T>) -> AppResult<T> {
    result.map_err(|source| AppError::AggregationFailure { endpoint, source: Box::new(source) })
}

impl<S: IntelligenceSource, C: Clock> OverviewLoader<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self { source, clock }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Waits for all three responses; the first failure in endpoint order wins.
    pub async fn load(&self, force_refresh: bool, token: &CancellationToken) -> AppResult<OverviewViewModel> {
        log_debug!(
            LogComponent::Application("OverviewLoader"),
            "Loading overview (force_refresh={force_refresh})"
        );

        let (market, competitive, trends) = futures::join!(
            self.source.market_intelligence(force_refresh, token),
            self.source.competitive_metrics(force_refresh, token),
            self.source.market_trends(force_refresh, token),
        );

        let cancelled = [market.as_ref().err(), competitive.as_ref().err(), trends.as_ref().err()]
            .into_iter()
            .flatten()
            .any(AppError::is_cancelled);
        if cancelled || token.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        let market = tag(Endpoint::MarketIntelligence, market)?;
        let competitive = tag(Endpoint::CompetitiveMetrics, competitive)?;
        let trends = tag(Endpoint::MarketTrends, trends)?;

        let overview = build_overview(&market, &competitive, &trends, self.clock.now_ms());
        log_info!(
            LogComponent::Application("OverviewLoader"),
            "Overview ready: {} reports, {} vendors",
            overview.recent_reports.len(),
            overview.competitive_presence.len()
        );
        Ok(overview)
    }

    /// One full cycle: the aggregation wrapped in the retry controller.
    pub async fn load_with_retry<Sch: Scheduler>(
        &self,
        retry: &RetryController<Sch>,
        force_refresh: bool,
        token: &CancellationToken,
        observe: impl FnMut(FetchPhase),
    ) -> AppResult<OverviewViewModel> {
        retry.run(token, |_| self.load(force_refresh, token), observe).await
    }
}
