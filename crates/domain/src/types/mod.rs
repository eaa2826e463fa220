//! Wire types exchanged with the storefront backend

pub mod auth;
pub mod cart;
pub mod order;

pub use auth::*;
pub use cart::*;
pub use order::*;
