//! Token codec module
//!
//! Issues and verifies HMAC-signed credentials. The signing secret belongs to
//! a tenant and is passed explicitly on every call; the codec holds no keys.

mod codec;

#[cfg(test)]
mod tests;

pub use codec::{strip_bearer, TokenCodec, BEARER_PREFIX};
