// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for NETIO devices.

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::command::ControlRequest;
use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Protocol};

/// Path of the JSON API endpoint.
pub const JSON_PATH: &str = "/netio.json";

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for an HTTP connection to a NETIO device.
///
/// HTTP is stateless - each call is an independent request.
///
/// # Examples
///
/// ```
/// use netio_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.11.250")
///     .with_credentials("netio", "netio")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.url(), "http://192.168.11.250/netio.json");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// The host may carry an `http://` or `https://` prefix and a `:port`
    /// suffix.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let (use_https, host) = if let Some(rest) = host.strip_prefix("https://") {
            (true, rest.to_string())
        } else if let Some(rest) = host.strip_prefix("http://") {
            (false, rest.to_string())
        } else {
            (false, host)
        };

        let host = host.trim_end_matches('/');
        let default_port = if use_https {
            Self::DEFAULT_HTTPS_PORT
        } else {
            Self::DEFAULT_PORT
        };
        let (host, port) = split_port(host).unwrap_or((host, default_port));

        Self {
            host: host.to_string(),
            port,
            use_https,
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port, replacing any `:port` given with the host.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the JSON API credentials sent as HTTP basic auth.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let default_port = if self.use_https {
            Self::DEFAULT_HTTPS_PORT
        } else {
            Self::DEFAULT_PORT
        };
        if self.port == default_port {
            format!("{scheme}://{}", self.host)
        } else {
            format!("{scheme}://{}:{}", self.host, self.port)
        }
    }

    /// Returns the full URL of the JSON endpoint.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{JSON_PATH}", self.base_url())
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` for an empty host, or
    /// `ProtocolError::Http` if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            url: self.url(),
            client,
            credentials: self.credentials,
            timeout: self.timeout,
        })
    }
}

/// JSON API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the `/netio.json` endpoint.
///
/// # Examples
///
/// ```no_run
/// use netio_lib::protocol::{HttpConfig, Protocol};
///
/// # async fn example() -> netio_lib::Result<()> {
/// let client = HttpConfig::new("192.168.11.250")
///     .with_credentials("netio", "netio")
///     .into_client()?;
/// let response = client.fetch_status().await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    url: String,
    client: Client,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl HttpClient {
    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let request = self
            .client
            .request(method, &self.url)
            .header(CONTENT_TYPE, "application/json");
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ProtocolError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        tracing::debug!(url = %self.url, status = status.as_u16(), "Received HTTP response");

        match status {
            StatusCode::OK => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ProtocolError::AuthenticationFailed),
            other => Err(ProtocolError::UnexpectedStatus {
                status: other.as_u16(),
                reason: other.canonical_reason().unwrap_or("Unknown").to_string(),
            }),
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(err.to_string())
        } else {
            ProtocolError::Http(err)
        }
    }
}

impl Protocol for HttpClient {
    async fn fetch_status(&self) -> Result<CommandResponse, ProtocolError> {
        tracing::debug!(url = %self.url, "Sending status request");

        let response = self.execute(self.request(Method::GET)).await?;
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        tracing::trace!(body = %body, "Received status body");

        Ok(CommandResponse::new(body))
    }

    async fn send_control(&self, request: &ControlRequest) -> Result<(), ProtocolError> {
        tracing::debug!(
            url = %self.url,
            outputs = request.outputs().len(),
            "Sending control request"
        );

        self.execute(self.request(Method::POST).json(request))
            .await
            .map(|_| ())
    }
}

/// Splits a trailing `:port` off `host`. Bare IPv6 addresses are left whole.
fn split_port(host: &str) -> Option<(&str, u16)> {
    let (name, port) = host.rsplit_once(':')?;
    if name.contains(':') && !name.ends_with(']') {
        return None;
    }
    Some((name, port.parse().ok()?))
}
