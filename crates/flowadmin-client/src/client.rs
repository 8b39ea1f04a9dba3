//! HTTP client for the catalog admin REST API.
//!
//! Wraps `reqwest` with bearer-token auth and the API's error conventions:
//! a `401` anywhere becomes [`ClientError::Unauthorized`], any other non-2xx
//! becomes [`ClientError::Api`] carrying the server's message. No timeouts
//! and no retries are configured; each call is attempted exactly once.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use flowadmin_core::{AdminProfile, Endpoints};

use crate::error::ClientError;
use crate::types::{DataEnvelope, ErrorBody};

/// Characters left alone by `encodeURIComponent`-style path encoding.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the admin API.
///
/// Holds the HTTP client, the three base URLs, and the bearer token. Use
/// [`AdminClient::set_token`] once a session token is known.
#[derive(Clone)]
pub struct AdminClient {
    pub(crate) http: Client,
    pub(crate) endpoints: Endpoints,
    token: Option<String>,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("endpoints", &self.endpoints)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl AdminClient {
    /// Creates a client for the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if a base URL does not parse,
    /// or [`ClientError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(endpoints: Endpoints, user_agent: &str) -> Result<Self, ClientError> {
        for base in [
            &endpoints.api_base,
            &endpoints.auth_base,
            &endpoints.upload_base,
        ] {
            Url::parse(base).map_err(|e| ClientError::InvalidBaseUrl {
                url: base.clone(),
                reason: e.to_string(),
            })?;
        }

        let http = Client::builder().user_agent(user_agent).build()?;
        let endpoints = Endpoints {
            api_base: endpoints.api_base.trim_end_matches('/').to_string(),
            auth_base: endpoints.auth_base.trim_end_matches('/').to_string(),
            upload_base: endpoints.upload_base.trim_end_matches('/').to_string(),
        };

        Ok(Self {
            http,
            endpoints,
            token: None,
        })
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches the profile of the admin owning the current token.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] if the token is rejected.
    /// - [`ClientError::Api`] / [`ClientError::Http`] on any other failure.
    /// - [`ClientError::Deserialize`] if the body is not `{ data: profile }`.
    pub async fn me(&self) -> Result<AdminProfile, ClientError> {
        let url = format!("{}/me", self.endpoints.auth_base);
        let envelope: DataEnvelope<AdminProfile> =
            self.send_json(self.http.get(&url), "GET /me").await?;
        Ok(envelope.data)
    }

    /// Attaches the bearer token, when one is set.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends an authorized request and parses a 2xx body as `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ClientError> {
        let body = self.send_checked(request, context).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Sends an authorized request and discards a 2xx body.
    pub(crate) async fn send_unit(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<(), ClientError> {
        self.send_checked(request, context).await.map(|_| ())
    }

    /// Sends the request and maps the status: `401` to
    /// [`ClientError::Unauthorized`], other non-2xx to [`ClientError::Api`].
    /// Returns the raw body on success.
    async fn send_checked(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<String, ClientError> {
        tracing::debug!(context, "sending admin API request");
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(context, "admin API rejected the session token");
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.or(b.message))
                .filter(|m| !m.trim().is_empty());
            tracing::error!(context, status = status.as_u16(), ?message, "admin API call failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}

/// Percent-encodes one URL path segment the way browsers'
/// `encodeURIComponent` does.
pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
