//! HTTP middleware stages of the request pipeline.
//!
//! - **Exception normalization**: panic boundary producing a uniform 500
//! - **Logging**: method/path on entry, status on exit
//! - **Authentication**: shared bearer token check
//!
//! # Architecture
//!
//! ```text
//! Request → Exception → Logging → Auth → Handler → Response
//!              ↓                    ↓
//!          500 JSON            401 Unauthorized
//! ```
//!
//! The order is fixed in [`crate::routes::build_router`].

pub mod auth;
pub mod exception;
pub mod logging;

pub use auth::{BEARER_PREFIX, BearerAuth};
pub use exception::{ExceptionLayer, exception_layer};
pub use logging::{REQUEST_ID_HEADER, RequestLoggingLayer};
