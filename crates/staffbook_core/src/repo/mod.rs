//! Repository layer: the only code allowed to issue SQL against
//! application tables.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod employee_repo;
