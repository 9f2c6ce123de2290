use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};

use crate::domain::{
    cancellation::CancellationToken,
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    subscription::{ApiEnvelope, PipelineRequest, SubscribeRequest, Subscription, SubscriptionUpdate},
};
use crate::infrastructure::http::{ApiClient, HttpMethod, HttpUtils};

pub const SUBSCRIBE_PATH: &str = "/subscribe-to-reports/";
pub const MANAGE_PATH: &str = "/manage-subscriptions/";
pub const UNSUBSCRIBE_ALL_PATH: &str = "/unsubscribe-all/";
pub const PIPELINE_PATH: &str = "/api/pipeline/";

pub fn subscription_path(id: u64, action: &str) -> String {
    format!("/subscription/{id}/{action}/")
}

/// Subscription listing returned by `list`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubscriptionList {
    pub subscriptions: Vec<Subscription>,
    pub total: u64,
}

/// Response of the report pipeline; only the human-readable parts are kept.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PipelineAck {
    pub message: Option<String>,
    pub error: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

/// Subscription management and on-demand report delivery.
pub trait SubscriptionApi {
    fn subscribe<'a>(
        &'a self,
        request: &'a SubscribeRequest,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>>;

    fn list<'a>(
        &'a self,
        email: &'a str,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<SubscriptionList>>;

    fn update<'a>(
        &'a self,
        id: u64,
        update: &'a SubscriptionUpdate,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>>;

    fn unsubscribe<'a>(&'a self, id: u64, token: &'a CancellationToken) -> LocalBoxFuture<'a, AppResult<String>>;

    fn reactivate<'a>(&'a self, id: u64, token: &'a CancellationToken) -> LocalBoxFuture<'a, AppResult<String>>;

    fn unsubscribe_all<'a>(
        &'a self,
        email: &'a str,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>>;

    fn request_report<'a>(
        &'a self,
        request: &'a PipelineRequest,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<PipelineAck>>;
}

pub struct HttpSubscriptionApi {
    client: ApiClient,
}

impl HttpSubscriptionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn envelope<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&T>,
        fallback: &str,
        token: &CancellationToken,
    ) -> AppResult<ApiEnvelope> {
        let envelope: ApiEnvelope = self.client.request_json(method, path, body, token).await?;
        accept(envelope, fallback)
    }
}

/// `success: false` envelopes become [`AppError::Rejected`].
pub fn accept(envelope: ApiEnvelope, fallback: &str) -> AppResult<ApiEnvelope> {
    match envelope.failure(fallback) {
        Some(reason) => {
            get_logger().warn(LogComponent::Infrastructure("SubscriptionApi"), &reason);
            Err(AppError::Rejected(reason))
        }
        None => Ok(envelope),
    }
}

fn message_or(envelope: ApiEnvelope, default: &str) -> String {
    envelope.message.unwrap_or_else(|| default.to_string())
}

impl SubscriptionApi for HttpSubscriptionApi {
    fn subscribe<'a>(
        &'a self,
        request: &'a SubscribeRequest,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>> {
        async move {
            let env = self
                .envelope(HttpMethod::Post, SUBSCRIBE_PATH, Some(request), "Failed to create subscription", token)
                .await?;
            Ok(message_or(env, "Subscription created successfully"))
        }
        .boxed_local()
    }

    fn list<'a>(
        &'a self,
        email: &'a str,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<SubscriptionList>> {
        async move {
            let path = HttpUtils::build_url_with_params(MANAGE_PATH, &[("email", email)]);
            let env = self
                .envelope::<()>(HttpMethod::Get, &path, None, "Failed to fetch subscriptions", token)
                .await?;
            let total = env.total_subscriptions.unwrap_or(env.subscriptions.len() as u64);
            Ok(SubscriptionList { subscriptions: env.subscriptions, total })
        }
        .boxed_local()
    }

    fn update<'a>(
        &'a self,
        id: u64,
        update: &'a SubscriptionUpdate,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>> {
        async move {
            let path = subscription_path(id, "update");
            let env = self
                .envelope(HttpMethod::Put, &path, Some(update), "Failed to update subscription", token)
                .await?;
            Ok(message_or(env, "Subscription updated successfully"))
        }
        .boxed_local()
    }

    fn unsubscribe<'a>(&'a self, id: u64, token: &'a CancellationToken) -> LocalBoxFuture<'a, AppResult<String>> {
        async move {
            let path = subscription_path(id, "unsubscribe");
            let env = self.envelope::<()>(HttpMethod::Delete, &path, None, "Failed to unsubscribe", token).await?;
            Ok(message_or(env, "Unsubscribed successfully"))
        }
        .boxed_local()
    }

    fn reactivate<'a>(&'a self, id: u64, token: &'a CancellationToken) -> LocalBoxFuture<'a, AppResult<String>> {
        async move {
            let path = subscription_path(id, "reactivate");
            let env = self
                .envelope::<()>(HttpMethod::Post, &path, None, "Failed to reactivate subscription", token)
                .await?;
            Ok(message_or(env, "Subscription reactivated successfully"))
        }
        .boxed_local()
    }

    fn unsubscribe_all<'a>(
        &'a self,
        email: &'a str,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<String>> {
        async move {
            let body = EmailBody { email };
            let env = self
                .envelope(HttpMethod::Delete, UNSUBSCRIBE_ALL_PATH, Some(&body), "Failed to unsubscribe from all", token)
                .await?;
            Ok(message_or(env, "Unsubscribed from all reports"))
        }
        .boxed_local()
    }

    fn request_report<'a>(
        &'a self,
        request: &'a PipelineRequest,
        token: &'a CancellationToken,
    ) -> LocalBoxFuture<'a, AppResult<PipelineAck>> {
        async move {
            let ack: PipelineAck = self.client.post_json(PIPELINE_PATH, request, token).await?;
            match ack.error.clone() {
                Some(error) => Err(AppError::Rejected(error)),
                None => Ok(ack),
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_subscription_paths() {
        assert_eq!(subscription_path(42, "update"), "/subscription/42/update/");
        assert_eq!(subscription_path(7, "reactivate"), "/subscription/7/reactivate/");
    }

    #[test]
    fn rejected_envelope() {
        let env: ApiEnvelope = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(
            accept(env, "Failed to unsubscribe"),
            Err(AppError::Rejected("Failed to unsubscribe".into()))
        );
    }

    #[test]
    fn pipeline_ack_tolerates_extra_fields() {
        let ack: PipelineAck =
            serde_json::from_str(r#"{"message": "Report queued", "report_id": 9, "status": "processing"}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("Report queued"));
        assert_eq!(ack.status.as_deref(), Some("processing"));
    }
}
