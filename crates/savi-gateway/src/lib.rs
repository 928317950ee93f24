//! # Savi Gateway
//!
//! Thin HTTP host over the chatbot engine: one query endpoint plus a
//! health check. The storefront frontend is the only intended caller,
//! so CORS is permissive.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, serve};
