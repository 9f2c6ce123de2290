use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use super::dto::{
    CompetitiveMetrics, MarketIntelligence, MarketTrendsData, id_string, metric_number,
};

/// Dashboard view-model assembled from one aggregation cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewViewModel {
    pub threats: ThreatSummary,
    pub market_size: u64,
    pub market_share_pct: u64,
    pub market_trends: Vec<MarketTrendEntry>,
    pub competitive_presence: Vec<CompetitivePresenceEntry>,
    pub recent_reports: Vec<RecentReport>,
    pub articles_analyzed: usize,
    pub defense_technologies: usize,
    pub market_trend_score: f64,
    pub generated_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ThreatSummary {
    pub threat_reports: usize,
    pub active_threats: usize,
    pub top_threat: Option<String>,
}

/// One bar of the market-trends chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTrendEntry {
    name: String,
    growth: u64,
    market_value: f64,
    relative_width: f64,
}

impl MarketTrendEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn growth(&self) -> u64 {
        self.growth
    }

    pub fn market_value(&self) -> f64 {
        self.market_value
    }

    /// Bar width as a percentage of the fastest-growing trend.
    pub fn relative_width(&self) -> f64 {
        self.relative_width
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitivePresenceEntry {
    pub vendor: String,
    pub articles: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentReport {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub priority: ReportPriority,
    pub agent_name: String,
    pub created_at: Option<String>,
    pub url: Option<String>,
    pub relevance_score: f64,
}

/// Reshape the three endpoint payloads into the dashboard view-model.
///
/// Never fails: anything missing contributes zero or an empty collection.
pub fn build_overview(
    market: &MarketIntelligence,
    competitive: &CompetitiveMetrics,
    trends: &MarketTrendsData,
    generated_at_ms: u64,
) -> OverviewViewModel {
    let threats = ThreatSummary {
        threat_reports: market.trend_analysis.len(),
        active_threats: market.trend_analysis.iter().filter(|t| t.is_high_impact()).count(),
        top_threat: market
            .trend_analysis
            .first()
            .map(|t| t.trend.clone())
            .filter(|t| !t.is_empty()),
    };

    let market_trends = trend_entries(trends);
    let competitive_presence = presence_entries(competitive);
    let articles_analyzed = market.trend_analysis.len() + trends.trends.len();
    let competitor_articles = competitive_presence
        .iter()
        .map(|e| e.articles)
        .fold(0u64, u64::saturating_add);

    OverviewViewModel {
        threats,
        market_size: trends.market_size_2025.as_ref().map(|m| metric_number(&m.value)).unwrap_or(0),
        market_share_pct: trends
            .mdo_market_share
            .as_ref()
            .map(|m| metric_number(&m.value))
            .unwrap_or(0),
        market_trends,
        competitive_presence,
        recent_reports: recent_reports(market),
        articles_analyzed,
        defense_technologies: competitive.competitive_advantages.len(),
        market_trend_score: trend_score(articles_analyzed as u64, competitor_articles),
        generated_at_ms,
    }
}

fn trend_entries(trends: &MarketTrendsData) -> Vec<MarketTrendEntry> {
    let raw: Vec<(String, u64, f64)> = trends
        .trends
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let name = record
                .title
                .clone()
                .or_else(|| record.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Trend {}", index + 1));
            let market_value = metric_number(&record.market_value) as f64 / 100.0;
            (name, metric_number(&record.growth), market_value)
        })
        .collect();

    let max_growth = raw.iter().map(|(_, growth, _)| *growth).max().unwrap_or(0);
    raw.into_iter()
        .map(|(name, growth, market_value)| MarketTrendEntry {
            relative_width: if max_growth == 0 {
                0.0
            } else {
                growth as f64 / max_growth as f64 * 100.0
            },
            name,
            growth,
            market_value,
        })
        .collect()
}

fn presence_entries(competitive: &CompetitiveMetrics) -> Vec<CompetitivePresenceEntry> {
    let mut entries: Vec<CompetitivePresenceEntry> = competitive
        .market_presence
        .iter()
        .map(|(vendor, presence)| CompetitivePresenceEntry {
            vendor: vendor.clone(),
            articles: presence.articles_count,
        })
        .collect();
    entries.sort_by(|a, b| b.articles.cmp(&a.articles).then_with(|| a.vendor.cmp(&b.vendor)));
    entries
}

fn recent_reports(market: &MarketIntelligence) -> Vec<RecentReport> {
    let articles = market.news_articles.iter().enumerate().map(|(index, article)| RecentReport {
        id: id_string(&article.id).unwrap_or_else(|| format!("article-{index}")),
        title: article.title.clone(),
        summary: article.summary.clone(),
        category: article.category.clone().unwrap_or_else(|| "news".to_string()),
        priority: article
            .priority
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default(),
        agent_name: format!("{} News", article.source.as_deref().unwrap_or("Industry")),
        created_at: article.published_date.clone(),
        url: article.url.clone().filter(|u| !u.is_empty()),
        relevance_score: article.relevance_score.unwrap_or(0.0),
    });

    let analyses = market.trend_analysis.iter().enumerate().map(|(index, trend)| {
        let impact = trend.impact.as_deref().unwrap_or("Medium");
        RecentReport {
            id: format!("trend-{index}"),
            title: format!("{} Market Analysis", trend.trend),
            summary: format!(
                "{} impact trend in {} - Timeline: {} - Probability: {}",
                impact,
                trend.trend,
                trend.timeline.as_deref().unwrap_or("Current"),
                trend.probability.as_deref().unwrap_or("n/a"),
            ),
            category: "market_analysis".to_string(),
            priority: if trend.is_high_impact() {
                ReportPriority::High
            } else {
                ReportPriority::Medium
            },
            agent_name: "Market Intelligence".to_string(),
            created_at: None,
            url: None,
            relevance_score: match impact {
                "Very High" => 9.0,
                "High" => 8.0,
                _ => 7.0,
            },
        }
    });

    articles.chain(analyses).collect()
}

/// Share of own coverage against competitor coverage, capped at 100.
fn trend_score(own_articles: u64, competitor_articles: u64) -> f64 {
    if own_articles == 0 {
        return 0.0;
    }
    let total = own_articles.saturating_add(competitor_articles).max(1);
    (own_articles as f64 / total as f64 * 100.0).min(100.0)
}
