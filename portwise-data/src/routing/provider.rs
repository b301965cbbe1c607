//! HTTP [`LegRouter`] backed by a maritime-routing service.
//!
//! [`LegRouter`] is synchronous so the core stays embeddable in synchronous
//! code and usable from `rayon` workers. This router bridges to async
//! `reqwest` by blocking on a Tokio runtime it owns.

use std::time::Duration;

use geo::Coord;
use portwise_core::geodesy::straight_line;
use portwise_core::{Leg, LegRouter, LegSource, RoutingError};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::searoute::RouteResponse;

/// Reasons an [`HttpMaritimeRouter`] cannot be built.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The HTTP client rejected its configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The router's Tokio runtime could not start.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "portwise-routing/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpMaritimeRouter`].
#[derive(Debug, Clone)]
pub struct HttpMaritimeRouterConfig {
    /// Base URL of the routing service, e.g. `"http://localhost:8080"`.
    pub base_url: String,
    /// Per-request timeout, covering connect and body.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpMaritimeRouterConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpMaritimeRouterConfig {
    /// Configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Maritime router that queries `GET {base}/route` for every leg.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime, requests block on the router's own
/// multi-threaded runtime, so several `rayon` workers may route at once.
/// Inside a multi-threaded runtime the ambient handle is used through
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime the
/// router falls back to its own runtime, which blocks the caller's executor
/// for the duration of the request.
///
/// # Examples
///
/// ```no_run
/// use geo::Coord;
/// use portwise_core::LegRouter;
/// use portwise_data::routing::HttpMaritimeRouter;
///
/// let router = HttpMaritimeRouter::new("http://localhost:8080")?;
/// let leg = router.route_leg(Coord { x: 4.4, y: 51.9 }, Coord { x: 103.85, y: 1.29 })?;
/// println!("{:.0} km", leg.distance_km);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct HttpMaritimeRouter {
    client: Client,
    config: HttpMaritimeRouterConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpMaritimeRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMaritimeRouter")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpMaritimeRouter {
    /// Create a router with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpMaritimeRouterConfig::new(base_url))
    }

    /// Create a router with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpMaritimeRouterConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("portwise-routing")
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &HttpMaritimeRouterConfig {
        &self.config
    }

    /// Build the route URL; positions are written `lon,lat`.
    fn build_route_url(&self, from: Coord<f64>, to: Coord<f64>) -> String {
        format!(
            "{}/route?origin={},{}&destination={},{}",
            self.config.base_url.trim_end_matches('/'),
            from.x,
            from.y,
            to.x,
            to.y
        )
    }

    async fn fetch_leg_async(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        let url = self.build_route_url(from, to);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        parse_route_body(&body, from, to)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Turn a `route` response body into a leg.
///
/// A feature without geometry still yields a leg, drawn as a straight line
/// between the endpoints.
pub(crate) fn parse_route_body(
    body: &str,
    from: Coord<f64>,
    to: Coord<f64>,
) -> Result<Leg, RoutingError> {
    let response: RouteResponse =
        serde_json::from_str(body).map_err(|err| RoutingError::ParseError {
            message: err.to_string(),
        })?;

    if !response.is_feature() {
        let message = response.error_message().map_or_else(
            || {
                format!(
                    "expected a GeoJSON Feature, got {}",
                    response.kind.as_deref().unwrap_or("an untyped object")
                )
            },
            str::to_owned,
        );
        return Err(RoutingError::ServiceError { message });
    }

    let distance_km = response
        .properties
        .as_ref()
        .and_then(|properties| properties.length_km())
        .ok_or(RoutingError::MissingLength)?;

    let geometry = response
        .geometry
        .map(|geometry| geometry.into_coords())
        .filter(|coords| coords.len() >= 2)
        .unwrap_or_else(|| straight_line(from, to));

    Ok(Leg::new(distance_km, geometry, LegSource::Maritime))
}

impl LegRouter for HttpMaritimeRouter {
    fn route_leg(&self, from: Coord<f64>, to: Coord<f64>) -> Result<Leg, RoutingError> {
        let future = self.fetch_leg_async(from, to);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
