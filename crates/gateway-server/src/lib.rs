//! # Gateway Server
//!
//! HTTP surface of the assistant gateway: `POST /chat` answers a message,
//! `POST /test-provider` checks a credential end to end, and `/health` and
//! `/metrics` serve operators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assistant;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod state;

pub use assistant::{Assistant, PROBE_PROMPT, PROBE_SUCCESS_MESSAGE};
pub use error::{ApiError, ServerError};
pub use routes::create_router;
pub use server::{Server, ServerConfig};
pub use shutdown::shutdown_signal;
pub use state::AppState;
