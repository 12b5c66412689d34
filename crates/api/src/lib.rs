//! # Questlink API
//!
//! Axum HTTP surface: OAuth login endpoints, the Telegram widget login,
//! and the cache-fronted engagement check endpoints.

pub mod context;
pub mod error;
pub mod routes;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;
