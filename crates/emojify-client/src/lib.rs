//! Client for the emoji generation service.
//!
//! Provides the `EmojiService` trait, the reqwest-backed `HttpEmojiService`,
//! and `ClientConfig` for pointing it at a deployment.

mod config;
mod http;
mod service;

pub use config::*;
pub use http::HttpEmojiService;
pub use service::*;
