//! # Users API
//!
//! An in-memory CRUD service for a single `User` resource on Axum, behind a
//! fixed request pipeline:
//!
//! - **Exception normalization**: any panic becomes a bounded 500 JSON body
//! - **Logging**: method/path on entry, status and latency on exit
//! - **Authentication**: shared bearer token on every request
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Exception → Logging → Auth)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (users, exception-test)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  UserStore (RwLock-guarded, in memory)                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use users_api::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!     let app = build_router(AppState::new(config));
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ```bash
//! curl -H "Authorization: Bearer TestToken" \
//!      -H "Content-Type: application/json" \
//!      -d '{"userName":"Alice","userAge":30}' \
//!      http://localhost:3000/users
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use state::AppState;
pub use store::UserStore;
