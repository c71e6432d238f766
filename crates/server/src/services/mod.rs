//! Services for the CMS backend.

pub mod auth;

pub use auth::{AuthError, AuthService};
