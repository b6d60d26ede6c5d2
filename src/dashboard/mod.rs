//! JSON dashboard over the pipeline tracker and the store.
//!
//! | Module    | Responsibility                                        |
//! |-----------|-------------------------------------------------------|
//! | `api`     | Shared state, error mapping, routes and handlers      |
//! | `server`  | Router assembly, bind and graceful shutdown           |
//! | `metrics` | Candidate and open-opening counters                   |

pub mod api;
pub mod metrics;
pub mod server;

pub use api::{AppState, SharedState, api_router};
pub use metrics::DashboardMetrics;
pub use server::{ServerConfig, build_router, start_server};
