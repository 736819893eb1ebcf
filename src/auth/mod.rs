//! Token issuance and the bearer guard.

pub mod guard;
pub mod token;
