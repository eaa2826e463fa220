//! # Storefront Domain
//!
//! Domain types shared by the storefront client crates.
//!
//! This crate contains:
//! - The storefront error type and `Result` alias
//! - Configuration structures
//! - Wire types for backend request bodies and the token renewal response
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other storefront crates
//! - No I/O; pure data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
