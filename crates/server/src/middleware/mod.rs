//! Middleware and extractors.

pub mod auth;

pub use auth::{RequireAuth, forbid_escalation, forbid_self_target, require_capability};
