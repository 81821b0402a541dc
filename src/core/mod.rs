//! OAuth2 Core Components
//!
//! Parameter codec and the HTTP transport seam.

pub mod codec;
pub mod transport;

pub use codec::{form_encode, query_string};
pub use transport::*;
