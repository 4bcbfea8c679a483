//! Request client: the single point of contact with the remote service.
//!
//! Every call targets `<base_url><path>`, sends and expects JSON, and
//! normalizes failures into [`ApiError`]. No retries, timeouts or cancellation.

mod error;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::{ApiError, ApiErrorKind, ApiResult, classify_reqwest_error};

use crate::messages;

/// Standard User-Agent header for Taller requests.
pub const USER_AGENT_VALUE: &str = concat!("taller/", env!("CARGO_PKG_VERSION"));

/// Remote service endpoints.
pub mod endpoints {
    pub const REGISTER: &str = "/api/auth/register";
    pub const LOGIN: &str = "/api/auth/login";
    pub const USERS: &str = "/api/users";
}

/// JSON client bound to one base address.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Full address for a service path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET path`, resolving to the parsed JSON body.
    ///
    /// # Errors
    /// `RequestFailed` on a non-success status or unusable body,
    /// `ConnectivityFailed` when the service cannot be reached.
    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.request::<()>(Method::GET, path, None).await
    }

    /// `POST path` with a JSON body, resolving to the parsed JSON body.
    ///
    /// # Errors
    /// Same as [`ApiClient::get`].
    pub async fn post<B>(&self, path: &str, body: &B) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Typed `GET`.
    ///
    /// # Errors
    /// Same as [`ApiClient::get`], plus `RequestFailed` if the body has the wrong shape.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let value = self.get(path).await?;
        decode(path, value)
    }

    /// Typed `POST`.
    ///
    /// # Errors
    /// Same as [`ApiClient::get_json`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.post(path, body).await?;
        decode(path, value)
    }

    async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path);
        tracing::info!(%method, %url, "API request");

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .headers(build_json_headers());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = classify_reqwest_error(&e);
            tracing::error!(
                %method,
                %url,
                details = err.details.as_deref().unwrap_or(""),
                "API transport error"
            );
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let err = classify_reqwest_error(&e);
            tracing::error!(%method, %url, error = %e, "Failed to read response body");
            err
        })?;

        if !status.is_success() {
            let err = ApiError::http_status(status.as_u16(), &text);
            tracing::warn!(
                %method,
                %url,
                status = status.as_u16(),
                message = %err.message,
                "API request failed"
            );
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "API response is not valid JSON");
            let mut err =
                ApiError::request_failed(Some(status.as_u16()), messages::INVALID_RESPONSE);
            err.details = Some(text);
            err
        })
    }
}

fn build_json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(path, error = %e, "Unexpected response shape");
        let mut err = ApiError::request_failed(None, messages::INVALID_RESPONSE);
        err.details = Some(e.to_string());
        err
    })
}
