//! HTTP transport for the IonQ REST API.

use std::fmt;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::{IonqError, IonqResult};
use crate::response::ApiResponse;

/// IonQ REST API client.
///
/// Holds the endpoint, the API key and a pooled HTTP client. Nothing is
/// mutated per call, so one instance can serve concurrent operations
/// (clone it freely, clones share the connection pool).
#[derive(Clone)]
pub struct IonqClient {
    /// HTTP client with timeouts configured.
    http: Client,
    /// Versioned API base URL (without trailing slash).
    endpoint: String,
    /// Precomputed `apiKey <key>` header value.
    auth: HeaderValue,
}

impl fmt::Debug for IonqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IonqClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl IonqClient {
    /// Create a client for `endpoint` (e.g. `https://api.ionq.co/v0.3`).
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> IonqResult<Self> {
        Self::with_config(ClientConfig::new(api_key).with_endpoint(endpoint))
    }

    /// Create a client from `IONQ_API_KEY` / `IONQ_ENDPOINT`.
    pub fn from_env() -> IonqResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> IonqResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("apiKey {}", config.api_key))
            .map_err(|_| IonqError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(IonqError::Http)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// The API base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Join a relative path onto the endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    /// Attach the JSON content type and the API key.
    fn set_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, self.auth.clone())
    }

    /// Start a request to `path` with the standard headers set.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.set_headers(self.http.request(method, self.url(path)))
    }

    /// Send a request and decode the JSON body, whatever the status.
    ///
    /// The request is built (and its query encoded) before the context is
    /// consulted, so an expired context never reaches the network.
    pub(crate) async fn execute<T>(
        &self,
        ctx: &Context,
        builder: RequestBuilder,
    ) -> IonqResult<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
    {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("{} {}", method, url);

        ctx.run(async {
            let response = self.http.execute(request).await?;
            let status = response.status();
            let body = response.bytes().await?;

            if status.is_success() {
                debug!("{} {} -> {}", method, url.path(), status.as_u16());
            } else {
                warn!("{} {} -> {}", method, url.path(), status.as_u16());
            }

            ApiResponse::decode(status.as_u16(), &body)
        })
        .await
    }
}
