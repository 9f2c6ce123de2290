use derive_more::Display;
use strum::{AsRefStr, Display as StrumDisplay};

/// Backend resources aggregated into the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
pub enum Endpoint {
    #[strum(serialize = "market intelligence")]
    MarketIntelligence,
    #[strum(serialize = "competitive metrics")]
    CompetitiveMetrics,
    #[strum(serialize = "market trends")]
    MarketTrends,
}

/// Client-side form problem; never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}: {}", field, message)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Request timeout after {}ms", after_ms)]
    NetworkTimeout { after_ms: u32 },
    #[display(fmt = "HTTP error! status: {} - {}", status, status_text)]
    HttpStatus { status: u16, status_text: String },
    #[display(fmt = "Request cancelled")]
    Cancelled,
    #[display(fmt = "Network Error: {}", _0)]
    Transport(String),
    #[display(fmt = "Malformed response: {}", _0)]
    Decode(String),
    #[display(fmt = "{}", _0)]
    Rejected(String),
    #[display(fmt = "Failed to fetch {} data: {}", endpoint, source)]
    AggregationFailure { endpoint: Endpoint, source: Box<AppError> },
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(ValidationError),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::AggregationFailure { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation(ValidationError::new(field, message))
    }

    /// Teardown-driven cancellation. Never shown to the user.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }

    /// Whether the retry controller may try again after this failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Cancelled | AppError::Validation(_) => false,
            AppError::AggregationFailure { source, .. } => source.is_retryable(),
            _ => true,
        }
    }

    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NetworkTimeout { .. } => {
                "Connection timeout - the intelligence service did not respond in time".to_string()
            }
            AppError::HttpStatus { status, .. } if *status >= 500 => {
                format!("The intelligence service is unavailable (status {status})")
            }
            AppError::AggregationFailure { endpoint, source } => {
                format!("Failed to load {endpoint}: {}", source.user_message())
            }
            AppError::Validation(err) => err.message.clone(),
            other => other.to_string(),
        }
    }

    /// The innermost error, unwrapping aggregation context.
    pub fn root_cause(&self) -> &AppError {
        match self {
            AppError::AggregationFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_not_retryable() {
        assert!(!AppError::Cancelled.is_retryable());
        assert!(AppError::Cancelled.is_cancelled());
    }

    #[test]
    fn timeout_and_status_are_retryable() {
        assert!(AppError::NetworkTimeout { after_ms: 30_000 }.is_retryable());
        assert!(AppError::HttpStatus { status: 503, status_text: "Unavailable".into() }.is_retryable());
    }

    #[test]
    fn validation_is_not_retryable() {
        assert!(!AppError::validation("email", "Email address is required").is_retryable());
    }

    #[test]
    fn aggregation_wraps_source() {
        let err = AppError::AggregationFailure {
            endpoint: Endpoint::CompetitiveMetrics,
            source: Box::new(AppError::HttpStatus { status: 404, status_text: "Not Found".into() }),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch competitive metrics data: HTTP error! status: 404 - Not Found"
        );
        assert!(matches!(err.root_cause(), AppError::HttpStatus { status: 404, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn timeout_message_names_budget() {
        assert_eq!(
            AppError::NetworkTimeout { after_ms: 30_000 }.to_string(),
            "Request timeout after 30000ms"
        );
    }
}
