// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Ariston NET cloud API.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Method, StatusCode};
use serde_json::{Map, Value, json};

use crate::error::ApiError;
use crate::protocol::{VelisApi, VelisPlantInfo, plant_setting_body};
use crate::types::{PlantData, UnitSystem};

const LOGIN_PATH: &str = "accounts/login";
const VELIS_PATH: &str = "velis";
const PLANTS_PATH: &str = "plants";
const AUTH_TOKEN_HEADER: &str = "ar.authToken";

// ============================================================================
// ApiConfig - Configuration for the cloud client
// ============================================================================

/// Configuration for the Ariston NET cloud client.
///
/// # Examples
///
/// ```
/// use velis_lib::protocol::ApiConfig;
/// use std::time::Duration;
///
/// // Defaults point at the public cloud
/// let config = ApiConfig::new("user@example.com", "secret");
///
/// // With all options
/// let config = ApiConfig::new("user@example.com", "secret")
///     .with_api_url("https://staging.example.com/api/v2/")
///     .with_user_agent("velis_lib")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct ApiConfig {
    username: String,
    password: String,
    api_url: String,
    user_agent: String,
    timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("username", &self.username)
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    /// Default cloud API base URL.
    pub const DEFAULT_API_URL: &'static str = "https://www.ariston-net.remotethermo.com/api/v2/";
    /// Default `User-Agent` header, the one the vendor app sends.
    pub const DEFAULT_USER_AGENT: &'static str = "RestSharp/106.11.7.0";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new configuration for the given account.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_url: Self::DEFAULT_API_URL.to_string(),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets a custom `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `AristonClient` from this configuration.
    ///
    /// The client starts without a token; call
    /// [`AristonClient::connect`] before the first request.
    ///
    /// # Errors
    ///
    /// Returns error if the API URL is not HTTP(S) or the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> Result<AristonClient, ApiError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ApiError::InvalidAddress(self.api_url));
        }

        let mut api_url = self.api_url;
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(AristonClient {
            api_url,
            client,
            username: self.username,
            password: self.password,
            user_agent: self.user_agent,
            token: RwLock::new(String::new()),
        })
    }
}

// ============================================================================
// AristonClient - HTTP implementation of VelisApi
// ============================================================================

/// HTTP client for the Ariston NET cloud.
///
/// Every request carries the session token in the `ar.authToken` header. When
/// the cloud answers `405 Method Not Allowed` the token has expired: the
/// client logs in again once and replays the request.
///
/// # Examples
///
/// ```no_run
/// use velis_lib::protocol::ApiConfig;
///
/// # async fn example() -> velis_lib::Result<()> {
/// let client = ApiConfig::new("user@example.com", "secret").into_client()?;
/// client.connect().await?;
///
/// for plant in client.get_detailed_velis_devices().await? {
///     println!("{} ({:?})", plant.gw, plant.whe_type);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AristonClient {
    api_url: String,
    client: Client,
    username: String,
    password: String,
    user_agent: String,
    token: RwLock<String>,
}

impl std::fmt::Debug for AristonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AristonClient")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Outcome of a single HTTP exchange.
enum Reply {
    /// The server rejected the session token.
    TokenExpired,
    /// The request succeeded, with an optional JSON body.
    Body(Option<Value>),
}

impl AristonClient {
    /// Returns the API base URL, always ending with `/`.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns whether a session token is held.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        !self.token.read().is_empty()
    }

    /// Logs in and stores the session token.
    ///
    /// Returns `false` if the server answered without a body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the credentials are
    /// rejected or the response carries no token.
    pub async fn connect(&self) -> Result<bool, ApiError> {
        let url = format!("{}{LOGIN_PATH}", self.api_url);
        let body = json!({ "usr": self.username, "pwd": self.password });

        let reply = match self.send(Method::POST, &url, Some(&body)).await? {
            Reply::TokenExpired => return Err(ApiError::AuthenticationFailed),
            Reply::Body(None) => return Ok(false),
            Reply::Body(Some(reply)) => reply,
        };

        let token = reply
            .get("token")
            .and_then(Value::as_str)
            .ok_or(ApiError::AuthenticationFailed)?;
        *self.token.write() = token.to_string();

        tracing::debug!(username = %self.username, "Logged in to Ariston cloud");
        Ok(true)
    }

    /// Lists the Velis plants of the account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the list cannot be decoded.
    pub async fn get_detailed_velis_devices(&self) -> Result<Vec<VelisPlantInfo>, ApiError> {
        let url = format!("{}{VELIS_PATH}/{PLANTS_PATH}", self.api_url);
        match self.request(Method::GET, &url, None).await? {
            Some(body) => Ok(serde_json::from_value(body)?),
            None => Ok(Vec::new()),
        }
    }

    /// Builds the URL of a plant endpoint.
    fn plant_url(&self, plant_data: PlantData, gw: &str, suffix: &str, umsys: UnitSystem) -> String {
        format!(
            "{}{VELIS_PATH}/{plant_data}/{}{suffix}?umsys={umsys}",
            self.api_url,
            urlencoding::encode(gw),
        )
    }

    /// Sends a request, logging in again once if the token has expired.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        match self.send(method.clone(), url, body).await? {
            Reply::Body(reply) => Ok(reply),
            Reply::TokenExpired => {
                tracing::warn!(url = %url, "Session token rejected, logging in again");
                if !self.connect().await? {
                    return Err(ApiError::AuthenticationFailed);
                }
                match self.send(method, url, body).await? {
                    Reply::Body(reply) => Ok(reply),
                    Reply::TokenExpired => Err(ApiError::AuthenticationFailed),
                }
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Reply, ApiError> {
        tracing::debug!(method = %method, url = %url, "Sending API request");

        let token = self.token.read().clone();
        let mut request = self
            .client
            .request(method, url)
            .header(USER_AGENT, &self.user_agent)
            .header(AUTH_TOKEN_HEADER, token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::Http)?;
        let status = response.status();

        match status {
            StatusCode::METHOD_NOT_ALLOWED => return Ok(Reply::TokenExpired),
            StatusCode::NOT_FOUND => return Ok(Reply::Body(None)),
            StatusCode::TOO_MANY_REQUESTS => {
                let text = response.text().await.map_err(ApiError::Http)?;
                return Err(ApiError::RateLimited(text));
            }
            status if !status.is_success() => {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                });
            }
            _ => {}
        }

        let bytes = response.bytes().await.map_err(ApiError::Http)?;
        tracing::debug!(status = status.as_u16(), len = bytes.len(), "Received API response");

        if bytes.is_empty() {
            return Ok(Reply::Body(None));
        }
        Ok(Reply::Body(Some(serde_json::from_slice(&bytes)?)))
    }

    async fn get_object(&self, url: &str) -> Result<Option<Map<String, Value>>, ApiError> {
        match self.request(Method::GET, url, None).await? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }
}

impl VelisApi for AristonClient {
    async fn set_velis_plant_setting(
        &self,
        plant_data: PlantData,
        gw: &str,
        setting: &str,
        value: f64,
        old_value: f64,
        umsys: UnitSystem,
    ) -> Result<(), ApiError> {
        let url = self.plant_url(plant_data, gw, "/plantSettings", umsys);
        let body = plant_setting_body(setting, value, old_value);
        self.request(Method::POST, &url, Some(&body)).await?;
        Ok(())
    }

    async fn get_velis_plant_data(
        &self,
        plant_data: PlantData,
        gw: &str,
        umsys: UnitSystem,
    ) -> Result<Option<Map<String, Value>>, ApiError> {
        let url = self.plant_url(plant_data, gw, "", umsys);
        self.get_object(&url).await
    }

    async fn get_velis_plant_settings(
        &self,
        plant_data: PlantData,
        gw: &str,
        umsys: UnitSystem,
    ) -> Result<Option<Map<String, Value>>, ApiError> {
        let url = self.plant_url(plant_data, gw, "/plantSettings", umsys);
        self.get_object(&url).await
    }
}
