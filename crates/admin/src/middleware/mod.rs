//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! [`RequestContext`] is an extractor rather than a layer; handlers that
//! write activity logs ask for it directly.

pub mod context;
pub mod request_id;

pub use context::{ADMIN_USER_HEADER, RequestContext};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
