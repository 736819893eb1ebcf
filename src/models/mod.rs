//! Core data models for the movie catalogue service.
//!
//! `Movie` maps to the `movies` table via `sqlx::FromRow` and serializes
//! naturally as JSON via `serde`. Request payloads are checked with the
//! explicit rules in [`validation`] before they reach storage.

pub mod credentials;
pub mod movie;
pub mod validation;
