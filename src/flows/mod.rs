//! OAuth2 Flows
//!
//! Only the Authorization Code grant (RFC 6749 Section 4.1) lives here. The
//! token refresh operation shares its endpoint and wire codec.

pub mod authorization_code;

pub use authorization_code::AuthorizationCodeFlow;
