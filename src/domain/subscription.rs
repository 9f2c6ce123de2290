//! Report subscriptions and one-shot report delivery.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::domain::errors::ValidationError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Frequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily Reports",
            Frequency::Weekly => "Weekly Reports",
            Frequency::Monthly => "Monthly Reports",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter, EnumString,
)]
pub enum AgentType {
    #[serde(rename = "market_trends_agent")]
    #[strum(serialize = "market_trends_agent")]
    MarketTrends,
    #[serde(rename = "competitive_intelligence_agent")]
    #[strum(serialize = "competitive_intelligence_agent")]
    CompetitiveIntelligence,
    #[serde(rename = "product_intelligence_agent")]
    #[strum(serialize = "product_intelligence_agent")]
    ProductIntelligence,
    #[default]
    #[serde(rename = "comprehensive_research")]
    #[strum(serialize = "comprehensive_research")]
    ComprehensiveResearch,
}

impl AgentType {
    pub fn label(&self) -> &'static str {
        match self {
            AgentType::MarketTrends => "Market Trends",
            AgentType::CompetitiveIntelligence => "Competitive Intelligence",
            AgentType::ProductIntelligence => "Product Intelligence",
            AgentType::ComprehensiveResearch => "Comprehensive Research",
        }
    }

    /// Query used when the subscriber leaves the template blank.
    pub fn default_query(&self) -> &'static str {
        match self {
            AgentType::MarketTrends => {
                "Latest market trends and industry analysis for cybersecurity and email security"
            }
            AgentType::CompetitiveIntelligence => {
                "Competitive analysis of MDO vs major competitors in email security market"
            }
            AgentType::ProductIntelligence => {
                "Product performance metrics and feature analysis for MDO"
            }
            AgentType::ComprehensiveResearch => {
                "Comprehensive research across market trends, competition, and product intelligence"
            }
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryFormat {
    #[default]
    Email,
    Pdf,
    Both,
}

impl DeliveryFormat {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryFormat::Email => "Email Only",
            DeliveryFormat::Pdf => "PDF Attachment",
            DeliveryFormat::Both => "Email + PDF",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliverySchedule {
    #[default]
    Immediate,
    Daily,
    Weekly,
    Monthly,
}

impl DeliverySchedule {
    pub fn label(&self) -> &'static str {
        match self {
            DeliverySchedule::Immediate => "Send Immediately",
            DeliverySchedule::Daily => "Daily",
            DeliverySchedule::Weekly => "Weekly",
            DeliverySchedule::Monthly => "Monthly",
        }
    }
}

fn require(field: &'static str, value: &str, message: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(trimmed.to_string())
}

fn require_email(value: &str) -> Result<String, ValidationError> {
    let email = require("email", value, "Email address is required")?;
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ValidationError::new("email", "Please enter a valid email address")),
    }
}

/// Recurring report subscription as typed into the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionForm {
    pub user_email: String,
    pub user_name: String,
    pub frequency: Frequency,
    pub agent_type: AgentType,
    pub delivery_format: DeliveryFormat,
    pub time_zone: String,
    /// `HH:MM`
    pub preferred_time: String,
    pub query_template: String,
}

impl Default for SubscriptionForm {
    fn default() -> Self {
        Self {
            user_email: String::new(),
            user_name: String::new(),
            frequency: Frequency::default(),
            agent_type: AgentType::default(),
            delivery_format: DeliveryFormat::default(),
            time_zone: "UTC".to_string(),
            preferred_time: "09:00".to_string(),
            query_template: String::new(),
        }
    }
}

impl SubscriptionForm {
    pub fn validate(&self) -> Result<SubscribeRequest, ValidationError> {
        let user_email = require_email(&self.user_email)?;
        let user_name = require("name", &self.user_name, "Name is required")?;
        let query_template = match self.query_template.trim() {
            "" => self.agent_type.default_query().to_string(),
            custom => custom.to_string(),
        };
        Ok(SubscribeRequest {
            user_email,
            user_name,
            agent_type: self.agent_type,
            frequency: self.frequency,
            query_template,
            delivery_format: self.delivery_format,
            time_zone: self.time_zone.clone(),
            preferred_time: format!("{}:00", self.preferred_time.trim()),
            is_active: true,
        })
    }
}

/// Body of `POST /subscribe-to-reports/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeRequest {
    pub user_email: String,
    pub user_name: String,
    pub agent_type: AgentType,
    pub frequency: Frequency,
    pub query_template: String,
    pub delivery_format: DeliveryFormat,
    pub time_zone: String,
    pub preferred_time: String,
    pub is_active: bool,
}

/// Research report generated through the pipeline, optionally e-mailed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportRequestForm {
    pub query: String,
    pub agent_type: AgentType,
    pub email_delivery: bool,
    pub user_email: String,
    pub user_name: String,
    pub focus_areas: Vec<String>,
    pub delivery_format: DeliveryFormat,
    pub schedule: DeliverySchedule,
}

impl ReportRequestForm {
    /// Adds a focus area unless blank or already present.
    pub fn add_focus_area(&mut self, area: &str) -> bool {
        let area = area.trim();
        if area.is_empty() || self.focus_areas.iter().any(|a| a == area) {
            return false;
        }
        self.focus_areas.push(area.to_string());
        true
    }

    pub fn remove_focus_area(&mut self, area: &str) {
        self.focus_areas.retain(|a| a != area);
    }

    pub fn validate(&self) -> Result<PipelineRequest, ValidationError> {
        let input = require("query", &self.query, "Research query is required")?;
        let user_email = if self.email_delivery {
            Some(require("email", &self.user_email, "Email address is required when email delivery is enabled")?)
        } else {
            None
        };
        let user_name = match self.user_name.trim() {
            "" => "Research User".to_string(),
            name => name.to_string(),
        };
        Ok(PipelineRequest {
            input,
            agent_type: self.agent_type,
            user_email,
            user_name,
            focus_areas: self.focus_areas.clone(),
            delivery: Delivery { format: self.delivery_format, schedule: self.schedule },
        })
    }
}

/// "Email me this dashboard" from the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OneTimeReportForm {
    pub user_email: String,
    pub user_name: String,
}

impl OneTimeReportForm {
    pub const DASHBOARD_QUERY: &'static str =
        "Generate a comprehensive dashboard overview report with all current metrics and insights";

    pub fn validate(&self) -> Result<PipelineRequest, ValidationError> {
        let user_email = require_email(&self.user_email)?;
        let user_name = match self.user_name.trim() {
            "" => "Dashboard Subscriber".to_string(),
            name => name.to_string(),
        };
        Ok(PipelineRequest {
            input: Self::DASHBOARD_QUERY.to_string(),
            agent_type: AgentType::ComprehensiveResearch,
            user_email: Some(user_email),
            user_name,
            focus_areas: Vec::new(),
            delivery: Delivery { format: DeliveryFormat::Email, schedule: DeliverySchedule::Immediate },
        })
    }
}

/// Body of `POST /api/pipeline/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineRequest {
    pub input: String,
    pub agent_type: AgentType,
    pub user_email: Option<String>,
    pub user_name: String,
    pub focus_areas: Vec<String>,
    pub delivery: Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub format: DeliveryFormat,
    pub schedule: DeliverySchedule,
}

/// Body of `PUT /subscription/{id}/update/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionUpdate {
    pub frequency: Frequency,
    pub preferred_time: String,
    pub time_zone: String,
    pub focus_areas: Vec<String>,
}

impl SubscriptionUpdate {
    pub fn from_subscription(subscription: &Subscription) -> Self {
        Self {
            frequency: subscription.frequency,
            preferred_time: subscription.preferred_time.clone(),
            time_zone: subscription.time_zone.clone(),
            focus_areas: subscription.focus_areas.clone(),
        }
    }
}

/// Subscription record as listed by `GET /manage-subscriptions/`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub id: u64,
    pub user_email: String,
    pub user_name: String,
    pub agent_type: String,
    pub frequency: Frequency,
    pub delivery_format: DeliveryFormat,
    pub time_zone: String,
    pub preferred_time: String,
    pub focus_areas: Vec<String>,
    pub is_active: bool,
}

/// `{success, ...}` wrapper used by the subscription endpoints.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ApiEnvelope {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub subscriptions: Vec<Subscription>,
    pub total_subscriptions: Option<u64>,
}

impl ApiEnvelope {
    /// Server-side failure text when `success` is false.
    pub fn failure(&self, fallback: &str) -> Option<String> {
        if self.success {
            None
        } else {
            Some(self.error.clone().or_else(|| self.message.clone()).unwrap_or_else(|| fallback.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, name: &str) -> SubscriptionForm {
        SubscriptionForm {
            user_email: email.to_string(),
            user_name: name.to_string(),
            ..SubscriptionForm::default()
        }
    }

    #[test]
    fn empty_email_rejected() {
        let err = form("   ", "Ada").validate().unwrap_err();
        assert_eq!(err.field, "email");
        assert_eq!(err.message, "Email address is required");
    }

    #[test]
    fn malformed_email_rejected() {
        assert_eq!(form("ada.example.com", "Ada").validate().unwrap_err().field, "email");
        assert_eq!(form("@example.com", "Ada").validate().unwrap_err().field, "email");
    }

    #[test]
    fn name_required() {
        assert_eq!(form("ada@example.com", "").validate().unwrap_err().field, "name");
    }

    #[test]
    fn valid_form_builds_request() {
        let request = form(" ada@example.com ", "Ada").validate().unwrap();
        assert_eq!(request.user_email, "ada@example.com");
        assert_eq!(request.preferred_time, "09:00:00");
        assert_eq!(request.query_template, AgentType::ComprehensiveResearch.default_query());
        assert!(request.is_active);
    }

    #[test]
    fn report_email_only_required_with_delivery() {
        let mut report = ReportRequestForm { query: "phishing trends".into(), ..Default::default() };
        assert_eq!(report.validate().unwrap().user_email, None);
        report.email_delivery = true;
        assert_eq!(report.validate().unwrap_err().field, "email");
        report.query.clear();
        assert_eq!(report.validate().unwrap_err().field, "query");
    }

    #[test]
    fn focus_areas_deduplicated() {
        let mut report = ReportRequestForm::default();
        assert!(report.add_focus_area("BEC"));
        assert!(!report.add_focus_area(" BEC "));
        assert!(!report.add_focus_area(""));
        report.remove_focus_area("BEC");
        assert!(report.focus_areas.is_empty());
    }

    #[test]
    fn enums_use_wire_names() {
        assert_eq!(AgentType::MarketTrends.to_string(), "market_trends_agent");
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(
            serde_json::to_value(DeliveryFormat::Both).unwrap(),
            serde_json::json!("both")
        );
    }

    #[test]
    fn envelope_failure_text() {
        let env: ApiEnvelope = serde_json::from_str(r#"{"success": false, "error": "No such subscription"}"#).unwrap();
        assert_eq!(env.failure("x").as_deref(), Some("No such subscription"));
        let ok: ApiEnvelope = serde_json::from_str(r#"{"success": true, "subscriptions": [{"id": 4}]}"#).unwrap();
        assert_eq!(ok.failure("x"), None);
        assert_eq!(ok.subscriptions[0].frequency, Frequency::Weekly);
    }
}
