//! Acting identities, signing credentials, and per-call bearer tokens.

pub mod credentials;
pub mod identity;
pub mod token;

pub use credentials::*;
pub use identity::*;
pub use token::*;
