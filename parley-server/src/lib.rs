//! HTTP API server for parley
//!
//! Thin glue over `parley_core::SessionManager`: JSON in, JSON out.

pub mod handlers;
pub mod server;
pub mod state;

pub use server::{router, run_server};
pub use state::AppState;
