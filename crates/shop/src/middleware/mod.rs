//! HTTP middleware stack for the shop.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (recorded into the span above)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
