use futures::future::{FutureExt, LocalBoxFuture};

use crate::domain::{
    cancellation::CancellationToken,
    errors::{AppError, AppResult},
    intelligence::{CompetitiveMetrics, MarketIntelligence, MarketTrendsData},
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::http::{ApiClient, HttpUtils};

pub const MARKET_INTELLIGENCE_PATH: &str = "/api/enhanced-market-intelligence/";
pub const COMPETITIVE_METRICS_PATH: &str = "/api/competitive-metrics/";
pub const MARKET_TRENDS_PATH: &str = "/api/real-market-trends-data/";

/// Source of the three payloads the overview is built from.
pub trait IntelligenceSource {
    fn market_intelligence<'a>(
        &'a self,
        force_refresh: bool,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<MarketIntelligence>>;

    fn competitive_metrics<'a>(
        &'a self,
        force_refresh: bool,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<CompetitiveMetrics>>;

    fn market_trends<'a>(
        &'a self,
        force_refresh: bool,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<MarketTrendsData>>;
}

pub struct HttpIntelligenceSource {
    client: ApiClient,
}

impl HttpIntelligenceSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn endpoint(path: &str, force_refresh: bool) -> String {
        HttpUtils::build_url_with_params(path, &[("force_refresh", bool_param(force_refresh))])
    }
}

fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// The trends service reports its own failures inside a 200 body.
pub fn check_trends(data: MarketTrendsData) -> AppResult<MarketTrendsData> {
    if data.error {
        let message =
            data.message.clone().unwrap_or_else(|| "Market trends service reported an error".to_string());
        get_logger().warn(LogComponent::Infrastructure("IntelligenceApi"), &message);
        return Err(AppError::Rejected(message));
    }
    Ok(data)
}

impl IntelligenceSource for HttpIntelligenceSource {
    fn market_intelligence<'a>(
        &'a self,
        force_refresh: bool,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<MarketIntelligence>> {
        async move {
            self.client.get_json(&Self::endpoint(MARKET_INTELLIGENCE_PATH, force_refresh), token).await
        }
        .boxed_local()
    }

    fn competitive_metrics<'a>(
        &'a self,
        force_refresh: bool,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<CompetitiveMetrics>> {
        async move {
            self.client.get_json(&Self::endpoint(COMPETITIVE_METRICS_PATH, force_refresh), token).await
        }
        .boxed_local()
    }

    fn market_trends<'a>(
        &'a self,
        force_refresh: bool,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<MarketTrendsData>> {
        async move {
            let data: MarketTrendsData =
                self.client.get_json(&Self::endpoint(MARKET_TRENDS_PATH, force_refresh), token).await?;
            check_trends(data)
        }
        .boxed_local()
    }
}
