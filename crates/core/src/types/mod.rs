//! Core types for NepaliStar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod capability;
pub mod email;
pub mod id;
pub mod role;
pub mod status;
pub mod username;

pub use capability::{Capability, CapabilityCategory, permissions_for};
pub use email::{Email, EmailError};
pub use id::*;
pub use role::AdminRole;
pub use status::*;
pub use username::{Username, UsernameError};
