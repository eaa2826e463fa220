//! # Storefront Core
//!
//! Client-side logic with no HTTP dependency.
//!
//! This crate contains:
//! - Port interfaces for credential storage, anti-forgery tokens, and token
//!   renewal
//! - The single-flight [`RefreshGate`] that serialises access-token renewal
//! - The session check built on those ports
//!
//! ## Architecture Principles
//! - Only depends on `storefront-domain`
//! - All I/O goes through traits implemented in `storefront-infra`

pub mod auth;

pub use auth::credentials::{bearer_value, usable_token};
pub use auth::ports::{AccessTokenRefresher, AntiForgeryTokenProvider, CredentialStore};
pub use auth::refresh::{
    PendingRequest, RefreshError, RefreshGate, RefreshLeader, RefreshResult, RefreshTicket,
    RefreshWaiter,
};
pub use auth::session::SessionGuard;
