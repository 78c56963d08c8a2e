//! Domain model for the employee store.
//!
//! # Invariants
//! - A single entity (`Employee`) maps to a single table (`employees`).
//! - `name` is the lookup key for get/update/delete.

pub mod employee;
