//! Gateway API access
//!
//! - `client`: the preconfigured HTTP client every service goes through
//! - `error`: `ApiError` and message extraction from error bodies
//! - `sms`, `mail`, `messages`, `clients`: one module per backend resource

pub mod client;
pub mod clients;
pub mod error;
pub mod mail;
pub mod messages;
pub mod sms;

pub use client::GatewayClient;
pub use error::ApiError;
