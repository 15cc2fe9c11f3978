//! Domain model for pets, adopters and their addresses.
//!
//! # Invariants
//! - Every persisted pet/adopter is identified by a store-generated integer id.
//! - An address has no identity of its own; it lives and dies with its adopter.
//! - `Pet::adopted` is meant to be true iff `Pet::adopter_id` is set. Only the
//!   adoption use-case writes both together.

pub mod adopter;
pub mod key;
pub mod pet;
