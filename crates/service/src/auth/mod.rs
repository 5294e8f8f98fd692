//! Bearer-token verification for the HTTP surface.
//!
//! Tokens are HS256 JWTs signed with the configured secret. Issuing tokens is
//! owned by an external identity service; `issue_token` exists for tooling and tests.

pub mod errors;
pub mod token;

pub use errors::AuthError;
pub use token::{bearer_token, issue_token, verify_token, Claims};
