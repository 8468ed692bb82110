//! Request provenance for activity logging.
//!
//! The admin panel sits behind an authenticating proxy that forwards the
//! acting admin's ID in `x-admin-user-id`. Client IP comes from the
//! Cloudflare and Fly.io proxy headers.

use std::convert::Infallible;
use std::net::IpAddr;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::USER_AGENT, request::Parts},
};

use ansania_core::{ActivityData, UserId};

use super::RequestId;

/// Header carrying the authenticated admin user's ID.
pub const ADMIN_USER_HEADER: &str = "x-admin-user-id";

/// Proxy headers checked for the client IP, most trusted first.
const IP_HEADERS: &[&str] = &[
    "cf-connecting-ip",
    "x-forwarded-for",
    "x-real-ip",
    "fly-client-ip",
];

/// Who made the request and from where.
///
/// Never rejects; missing or malformed headers leave the field `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Option<UserId>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Read provenance from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let user_id = header_str(headers, ADMIN_USER_HEADER)
            .and_then(|v| v.trim().parse::<i32>().ok())
            .map(UserId::new);

        Self {
            user_id,
            ip_address: client_ip(headers).map(|ip| ip.to_string()),
            user_agent: header_str(headers, USER_AGENT.as_str()).map(String::from),
            request_id: None,
        }
    }

    /// Activity fields carrying this request's provenance.
    ///
    /// The request ID goes into `metadata` so log rows can be matched to
    /// traces.
    #[must_use]
    pub fn activity_data(&self) -> ActivityData {
        ActivityData {
            user_id: self.user_id,
            ip_address: self.ip_address.clone(),
            user_agent: self.user_agent.clone(),
            metadata: self
                .request_id
                .as_ref()
                .map(|id| serde_json::json!({ "request_id": id })),
            ..Default::default()
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut context = Self::from_headers(&parts.headers);
        context.request_id = parts
            .extensions
            .get::<RequestId>()
            .map(|id| id.as_str().to_string());
        Ok(context)
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// First parseable client IP from the proxy headers.
///
/// `x-forwarded-for` contributes only its first (client) entry.
fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    IP_HEADERS.iter().find_map(|name| {
        header_str(headers, name)
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    })
}
