//! `userdesk-core`: shared building blocks for the user-management client.
//!
//! This crate holds the boundary error model and the strongly-typed identifiers
//! the backend hands out. It does no IO.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ContactMechId, PartyId, UserLoginId};
