//! HTTP client for the identity backend. Every request goes through `send`, which
//! applies the content negotiation defaults, keeps the session cookies in a
//! shared jar and maps failures into `ApiError`. The client never logs request
//! bodies; callers must not put secrets in log fields either.

use super::{config::AppConfig, errors::ApiError, headers};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(Vec<u8>),
    Form(String),
    Text(String),
}

/// A backend request before header augmentation.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// JSON `POST`; the content type is left to the augmenter.
    ///
    /// # Errors
    /// Returns `ApiError::Serialization` if the body cannot be encoded.
    pub fn post_json<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<Self, ApiError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| ApiError::Serialization(format!("Failed to encode request: {err}")))?;
        Ok(Self {
            method: Method::POST,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: RequestBody::Json(payload),
        })
    }

    /// `POST` of a bare string body, as `api/forgot_password` expects. The
    /// content type is left to the augmenter.
    #[must_use]
    pub fn post_text(path: &str, body: &str) -> Self {
        Self {
            method: Method::POST,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: RequestBody::Text(body.to_string()),
        }
    }

    /// Form-encoded `POST` with an explicit `application/x-www-form-urlencoded` type.
    #[must_use]
    pub fn post_form(path: &str, fields: &[(&str, &str)]) -> Self {
        let payload = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish();
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(headers::APPLICATION_FORM),
        );
        Self {
            method: Method::POST,
            path: path.to_string(),
            headers,
            body: RequestBody::Form(payload),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: AppConfig,
}

impl ApiClient {
    /// Builds a cookie-aware client bound to the configured backend.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Sends a request and returns the response when the status is 2xx.
    ///
    /// # Errors
    /// Returns `ApiError::Http` for non-2xx answers and transport variants otherwise.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let ApiRequest {
            method,
            path,
            mut headers,
            body,
        } = request;

        headers::augment(&mut headers);

        let url = self.config.build_url(&path);
        let builder = self.http.request(method, &url).headers(headers);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(payload) => builder.body(payload),
            RequestBody::Form(payload) | RequestBody::Text(payload) => builder.body(payload),
        };

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "backend responded");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::http(status.as_u16(), &body))
        }
    }

    /// Fetches and decodes a JSON document.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport, status or decode failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(ApiRequest::get(path)).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    }

    /// Posts JSON and ignores the response body.
    ///
    /// # Errors
    /// Returns an `ApiError` for encode, transport or status failures.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(ApiRequest::post_json(path, body)?).await?;
        Ok(())
    }

    /// Posts a bare string and ignores the response body.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport or status failures.
    pub async fn post_text(&self, path: &str, body: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::post_text(path, body)).await?;
        Ok(())
    }

    /// Posts form fields and ignores the response body.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport or status failures.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<(), ApiError> {
        self.send(ApiRequest::post_form(path, fields)).await?;
        Ok(())
    }
}
