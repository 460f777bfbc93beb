use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::error::{ApiErrorBody, ClientError, Result};
use crate::storage::{SharedStorage, ACCESS_TOKEN_KEY};

/// HTTP client for the storefront API.
///
/// Targets one fixed origin and reads the session token from local storage at
/// send time, so a login or logout takes effect on the very next request.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    storage: SharedStorage,
}

impl ApiClient {
    /// Creates a client that keeps the transport's default timeouts.
    pub fn new(base_url: Url, storage: SharedStorage) -> Self {
        Self::with_timeout(base_url, storage, None)
    }

    pub fn with_timeout(base_url: Url, storage: SharedStorage, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_default();

        ApiClient {
            client,
            base_url,
            storage,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// The stored session token, or [`ClientError::Unauthenticated`] when there is none.
    pub fn require_token(&self) -> Result<String> {
        match self.storage.get_item(ACCESS_TOKEN_KEY)? {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ClientError::Unauthenticated),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Builds a request and attaches the bearer token when one is stored.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);

        match self.storage.get_item(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => builder.bearer_auth(token),
            Ok(_) => builder,
            Err(e) => {
                tracing::warn!("Could not read session token, sending unauthenticated: {}", e);
                builder
            }
        }
    }

    /// Sends a request, turning non-success statuses into [`ClientError::Api`].
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("{} {} failed before a response: {}", method, path, e);
                return Err(ClientError::Transport(e));
            }
        };

        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status.as_u16());

        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        tracing::warn!("{} {} responded with {}", method, path, status.as_u16());

        Err(ClientError::Api {
            status,
            body: ApiErrorBody::parse(&raw),
        })
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        decode(response).await
    }

    /// Sends a request whose response body is not needed.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<StatusCode> {
        let response = self.send(builder).await?;
        Ok(response.status())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let raw = response.text().await?;
    Ok(serde_json::from_str(&raw)?)
}
