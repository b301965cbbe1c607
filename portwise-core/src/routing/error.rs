use geo::Coord;
use thiserror::Error;

/// Reasons a [`LegRouter`](super::LegRouter) could not produce a leg.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// The routing service did not answer within the configured timeout.
    #[error("routing request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The request could not reach the service.
    #[error("network error calling {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success status.
    #[error("routing service at {url} returned HTTP {status}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },
    /// The service answered but reported that it could not route.
    #[error("routing service error: {message}")]
    ServiceError {
        /// Message reported by the service.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The response carried no usable route length.
    #[error("routing response did not include a route length")]
    MissingLength,
    /// The router's network has no path between the two points.
    #[error("no path between ({}, {}) and ({}, {})", from.y, from.x, to.y, to.x)]
    NoPath {
        /// Leg start, `x = longitude`.
        from: Coord<f64>,
        /// Leg end, `x = longitude`.
        to: Coord<f64>,
    },
}
