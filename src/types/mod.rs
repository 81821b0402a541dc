//! OAuth2 Types
//!
//! Core type definitions for the Authorization Code grant client.

pub mod auth;
pub mod config;
pub mod token;

pub use auth::*;
pub use config::*;
pub use token::*;
