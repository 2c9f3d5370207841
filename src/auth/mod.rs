//! Authentication module
//!
//! The Eventbrite API authenticates with a static bearer token. There is no
//! refresh, scope or expiry handling: the token is attached to every request
//! as-is.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;

#[cfg(test)]
mod tests;
