//! Parties: request and response records for the party services.
//!
//! Each request type serializes to the exact body the backend service expects
//! and can be checked with `validate()` before it is sent.

pub mod contact_mech;
pub mod party;
pub mod user_login;

pub use contact_mech::{
    ContactMechPurpose, ContactMechResult, DeletePartyContactMech, PartyEmailAddress,
    PartyTelecomNumber,
};
pub use party::{UpdatePartyGroup, UpdatePerson};
pub use user_login::{ResetPassword, SetUserTimeZone, UpdateUserLoginStatus, YesNo};
