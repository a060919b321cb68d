//! OAuth access-token acquisition.

pub mod client;
pub mod gateway;

pub use client::{HttpOAuthClient, OAuthClient};
pub use gateway::{ClientOAuthGateway, OAuthError, OAuthGateway};
