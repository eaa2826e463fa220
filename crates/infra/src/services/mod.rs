//! Resource services
//!
//! One thin wrapper per backend area. Every call goes through the shared
//! [`ApiClient`](crate::api::ApiClient), so all of them get the same token
//! renewal behavior.

pub mod account;
pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

pub use account::{AccountError, AccountService};
pub use addresses::AddressService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use orders::OrderService;
