//! Domain model for the employee directory.
//!
//! # Invariants
//! - Every persisted employee carries a storage-assigned `EmployeeId`.
//! - Email addresses are unique across all employees.

pub mod employee;
