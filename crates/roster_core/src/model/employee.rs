//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record shared by storage and HTTP layers.
//! - Field contents are free-form; storage only requires them to be present.
//!
//! # Invariants
//! - `id` is `None` until storage assigns one, and never changes afterwards.
//! - `email` is unique across all employees (enforced by storage).

use serde::{Deserialize, Serialize};

/// Storage-assigned employee identifier.
pub type EmployeeId = i64;

/// Canonical employee record.
///
/// Serialized with camelCase field names to match the public JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// `None` for records that were never persisted.
    #[serde(default)]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    /// Creates an unsaved employee.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Returns a copy of this record carrying the given id.
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrites the mutable fields with values from `patch`.
    ///
    /// `id` is left untouched.
    pub fn apply_patch(&mut self, patch: &Employee) {
        self.first_name.clone_from(&patch.first_name);
        self.last_name.clone_from(&patch.last_name);
        self.email.clone_from(&patch.email);
    }
}
