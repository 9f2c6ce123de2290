use crate::domain::{
    accessibility::AnnouncementPriority,
    cancellation::CancellationToken,
    errors::{AppError, AppResult, ValidationError},
    logging::LogComponent,
    notifications::ToastKind,
    subscription::{OneTimeReportForm, ReportRequestForm, SubscriptionForm, SubscriptionUpdate},
};
use crate::log_info;
use crate::infrastructure::api::{
    SubscriptionApi,
    subscriptions::{PipelineAck, SubscriptionList},
};

/// User feedback for a finished subscription action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: ToastKind,
    pub priority: AnnouncementPriority,
}

impl Notice {
    /// `None` for cancellation, which is never surfaced.
    pub fn from_result<T>(result: &AppResult<T>, success: impl FnOnce(&T) -> String) -> Option<Self> {
        match result {
            Ok(value) => Some(Self {
                message: success(value),
                kind: ToastKind::Success,
                priority: AnnouncementPriority::Polite,
            }),
            Err(AppError::Cancelled) => None,
            Err(AppError::Validation(err)) => Some(Self {
                message: err.message.clone(),
                kind: ToastKind::Warning,
                priority: AnnouncementPriority::Assertive,
            }),
            Err(err) => Some(Self {
                message: err.user_message(),
                kind: ToastKind::Error,
                priority: AnnouncementPriority::Assertive,
            }),
        }
    }
}

fn require_email(email: &str) -> AppResult<&str> {
    match email.trim() {
        "" => Err(ValidationError::new("email", "Email address is required").into()),
        email => Ok(email),
    }
}

/// Validates forms locally, then talks to the subscription endpoints.
pub struct SubscriptionService<A> {
    api: A,
}

impl<A: SubscriptionApi> SubscriptionService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn subscribe(&self, form: &SubscriptionForm, token: &CancellationToken) -> AppResult<String> {
        let request = form.validate()?;
        log_info!(
            LogComponent::Application("Subscriptions"),
            "Subscribing {} to {} {}",
            request.user_email,
            request.frequency,
            request.agent_type
        );
        self.api.subscribe(&request, token).await
    }

    pub async fn list(&self, email: &str, token: &CancellationToken) -> AppResult<SubscriptionList> {
        let email = require_email(email)?;
        self.api.list(email, token).await
    }

    pub async fn update(
        &self,
        id: u64,
        update: &SubscriptionUpdate,
        token: &CancellationToken,
    ) -> AppResult<String> {
        if update.preferred_time.trim().is_empty() {
            return Err(AppError::validation("preferred_time", "Preferred time is required"));
        }
        self.api.update(id, update, token).await
    }

    pub async fn unsubscribe(&self, id: u64, token: &CancellationToken) -> AppResult<String> {
        self.api.unsubscribe(id, token).await
    }

    pub async fn reactivate(&self, id: u64, token: &CancellationToken) -> AppResult<String> {
        self.api.reactivate(id, token).await
    }

    pub async fn unsubscribe_all(&self, email: &str, token: &CancellationToken) -> AppResult<String> {
        let email = require_email(email)?;
        self.api.unsubscribe_all(email, token).await
    }

    pub async fn request_report(
        &self,
        form: &ReportRequestForm,
        token: &CancellationToken,
    ) -> AppResult<PipelineAck> {
        let request = form.validate()?;
        log_info!(LogComponent::Application("Subscriptions"), "Requesting {} report", request.agent_type);
        self.api.request_report(&request, token).await
    }

    pub async fn email_dashboard(
        &self,
        form: &OneTimeReportForm,
        token: &CancellationToken,
    ) -> AppResult<PipelineAck> {
        let request = form.validate()?;
        self.api.request_report(&request, token).await
    }
}
