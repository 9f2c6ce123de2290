//! Wire shapes of the three intelligence endpoints.
//!
//! Every field is optional on the wire. Collections that arrive missing, null
//! or with the wrong JSON type decode as empty rather than failing the payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode `T`, substituting `T::default()` for anything that does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketIntelligence {
    #[serde(rename = "trendAnalysis", deserialize_with = "lenient")]
    pub trend_analysis: Vec<TrendInsight>,
    #[serde(deserialize_with = "lenient")]
    pub news_articles: Vec<NewsArticle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendInsight {
    pub trend: String,
    pub impact: Option<String>,
    pub timeline: Option<String>,
    pub probability: Option<String>,
}

impl TrendInsight {
    /// "High" or "Very High" impact.
    pub fn is_high_impact(&self) -> bool {
        matches!(self.impact.as_deref(), Some("High") | Some("Very High"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsArticle {
    pub id: Value,
    pub title: String,
    pub summary: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub published_date: Option<String>,
    pub url: Option<String>,
    pub relevance_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveMetrics {
    #[serde(deserialize_with = "lenient")]
    pub market_presence: BTreeMap<String, VendorPresence>,
    #[serde(rename = "competitiveAdvantages", deserialize_with = "lenient")]
    pub competitive_advantages: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorPresence {
    #[serde(deserialize_with = "lenient")]
    pub articles_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketTrendsData {
    #[serde(deserialize_with = "lenient")]
    pub trends: Vec<TrendRecord>,
    #[serde(deserialize_with = "lenient")]
    pub market_size_2025: Option<MetricValue>,
    #[serde(deserialize_with = "lenient")]
    pub mdo_market_share: Option<MetricValue>,
    #[serde(deserialize_with = "lenient")]
    pub error: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendRecord {
    pub title: Option<String>,
    pub name: Option<String>,
    pub growth: Value,
    #[serde(rename = "marketValue")]
    pub market_value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricValue {
    pub value: Value,
}

/// Digits of a display string read as one number: `"38%"` is 38, `"$4.2B"` is 42.
pub fn extract_digits(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() { None } else { digits.parse().ok() }
}

/// Numeric reading of a loosely typed metric, zero when absent or unparsable.
pub fn metric_number(value: &Value) -> u64 {
    match value {
        Value::String(text) => extract_digits(text).unwrap_or(0),
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)).unwrap_or(0),
        _ => 0,
    }
}

/// Stringified JSON id; strings are taken verbatim.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
