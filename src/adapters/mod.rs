//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Form generators (OpenAI, mock)
//! - `auth` - Session validators (OIDC, mock)
//! - `http` - Axum routers and handlers
//! - `memory` - In-memory repositories
//! - `postgres` - sqlx repositories

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
