use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use std::convert::Infallible;

use crate::routes::rate_limit::peer_ip;
use crate::services::history::DEFAULT_CLIENT_ID;

#[derive(Debug, Deserialize)]
struct IpParam {
    ip: Option<String>,
}

/// Identity that search history is keyed by.
///
/// Resolution order: the `ip` query parameter, the caller's network
/// address, then [`DEFAULT_CLIENT_ID`]. The parameter is unauthenticated,
/// so any caller can read or extend another client's history with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl ClientId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let explicit = Query::<IpParam>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(param)| param.ip)
            .filter(|ip| !ip.trim().is_empty());

        let id = explicit
            .or_else(|| peer_ip(&parts.headers, &parts.extensions).map(|ip| ip.to_string()))
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());

        Ok(Self(id))
    }
}
