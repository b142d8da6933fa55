//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, reload loop)
//!     → request.rs (request ID)
//!     → handlers.rs (page, map document, classification, styles, data file)
//!     → MapState (current config + classifier + page, behind ArcSwap)
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer, MapState};
