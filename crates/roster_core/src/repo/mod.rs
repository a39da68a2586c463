//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for employee records.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Records are persisted and read back as given, without field checks.
//! - Storage-level conflicts are reported as semantic errors
//!   (`DuplicateEmail`, `NotFound`) rather than raw SQLite failures.

pub mod employee_repo;
