//! Credential handling and access-token renewal

pub mod credentials;
pub mod ports;
pub mod refresh;
pub mod session;

pub use credentials::*;
pub use ports::*;
pub use refresh::*;
pub use session::*;
