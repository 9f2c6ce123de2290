use std::collections::BTreeMap;

use futures::future::{Either, select};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display};

use crate::domain::{
    cancellation::CancellationToken,
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
};

pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// JSON REST client for the intelligence backend, built on gloo-net.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    default_headers: BTreeMap<String, String>,
    timeout_ms: u32,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self { base_url: base_url.into(), default_headers, timeout_ms: DEFAULT_TIMEOUT_MS }
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn add_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
        }
    }

    pub async fn get_json<R>(&self, endpoint: &str, token: &CancellationToken) -> AppResult<R>
    where
        R: DeserializeOwned,
    {
        self.request_json::<(), R>(HttpMethod::Get, endpoint, None, token).await
    }

    pub async fn post_json<T, R>(
        &self,
        endpoint: &str,
        body: &T,
        token: &CancellationToken,
    ) -> AppResult<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        self.request_json(HttpMethod::Post, endpoint, Some(body), token).await
    }

    /// Issue one request bounded by the client timeout and `token`.
    pub async fn request_json<T, R>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<&T>,
        token: &CancellationToken,
    ) -> AppResult<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.url_for(endpoint);
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 {method}: {url}"));

        let controller = web_sys::AbortController::new()
            .map_err(|e| AppError::Transport(format!("AbortController unavailable: {e:?}")))?;
        let signal = controller.signal();

        let request = self.build_request(method, &url, body, &signal)?;
        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| AppError::Transport(format!("Request failed: {e:?}")))?;
            Self::parse_response::<R>(response).await
        };

        let timed = async {
            match select(Box::pin(exchange), Box::pin(TimeoutFuture::new(self.timeout_ms))).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => {
                    controller.abort();
                    Err(AppError::NetworkTimeout { after_ms: self.timeout_ms })
                }
            }
        };

        let result = match token.run(timed).await {
            Ok(result) => result,
            Err(cancelled) => {
                controller.abort();
                Err(cancelled)
            }
        };

        match &result {
            Ok(_) => get_logger()
                .debug(LogComponent::Infrastructure("HTTP"), &format!("✅ {method} {url}")),
            Err(AppError::Cancelled) => get_logger()
                .trace(LogComponent::Infrastructure("HTTP"), &format!("{method} {url} cancelled")),
            Err(e) => get_logger()
                .error(LogComponent::Infrastructure("HTTP"), &format!("❌ {method} {url}: {e}")),
        }
        result
    }

    fn build_request<T: Serialize>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&T>,
        signal: &web_sys::AbortSignal,
    ) -> AppResult<Request> {
        let mut builder: RequestBuilder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        };
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        builder = builder.abort_signal(Some(signal));

        match body {
            Some(body) => {
                let json = serde_json::to_string(body)
                    .map_err(|e| AppError::Decode(format!("Failed to serialize body: {e}")))?;
                builder
                    .body(json)
                    .map_err(|e| AppError::Transport(format!("Failed to create request body: {e:?}")))
            }
            None => builder
                .build()
                .map_err(|e| AppError::Transport(format!("Failed to build request: {e:?}"))),
        }
    }

    async fn parse_response<R: DeserializeOwned>(response: Response) -> AppResult<R> {
        HttpUtils::check_status(response.status(), &response.status_text())?;
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response: {e:?}")))?;
        HttpUtils::decode_json(&text)
    }
}

/// URL and payload helpers shared by the endpoint clients.
pub struct HttpUtils;

impl HttpUtils {
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Map a non-2xx status line to `AppError::HttpStatus`.
    pub fn check_status(status: u16, status_text: &str) -> AppResult<()> {
        if Self::is_success_status(status) {
            Ok(())
        } else {
            Err(AppError::HttpStatus { status, status_text: status_text.to_string() })
        }
    }

    /// Empty bodies decode as JSON `null`, so `()`/`Option` responses work.
    pub fn decode_json<R: DeserializeOwned>(text: &str) -> AppResult<R> {
        let text = if text.trim().is_empty() { "null" } else { text };
        serde_json::from_str(text).map_err(|e| AppError::Decode(format!("Failed to parse JSON: {e}")))
    }

    pub fn build_url_with_params(base_url: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return base_url.to_string();
        }

        let query_string = params
            .iter()
            .map(|(key, value)| format!("{}={}", Self::url_encode(key), Self::url_encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", base_url, query_string)
    }

    /// Percent-encode a query component (RFC 3986 unreserved set passes through).
    pub fn url_encode(input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for byte in input.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    out.push(byte as char)
                }
                _ => out.push_str(&format!("%{byte:02X}")),
            }
        }
        out
    }
}
