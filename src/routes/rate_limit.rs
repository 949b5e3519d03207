use axum::{
    extract::ConnectInfo,
    http::{Extensions, HeaderMap, Request},
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_governor::{key_extractor::KeyExtractor, GovernorError};

/// Best-effort caller address.
///
/// Tries X-Forwarded-For (first hop), X-Real-IP, then the TCP peer address
/// recorded by `into_make_service_with_connect_info`.
pub fn peer_ip(headers: &HeaderMap, extensions: &Extensions) -> Option<IpAddr> {
    // Reverse proxies put the original client first
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    let connected = || {
        extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip())
    };

    forwarded.or_else(real_ip).or_else(connected)
}

/// IP key extractor with fallback for Docker/local development.
///
/// Requests without an identifiable address share the localhost bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackIpKeyExtractor;

impl KeyExtractor for FallbackIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        Ok(peer_ip(req.headers(), req.extensions())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)))
    }
}
