//! Employee use-case service.
//!
//! # Responsibility
//! - Enforce the no-duplicate-email rule on create and update.
//! - Apply update-by-id semantics (mutable fields only, id preserved).
//!
//! # Invariants
//! - `save_employee` never reaches repository insert when the email is taken.
//! - Storage-level email conflicts are reported as `DuplicateResource` too.
//! - Service layer remains storage-agnostic.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, EmployeeServiceError>;

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// An employee with this email already exists.
    DuplicateResource(String),
    /// Target employee does not exist.
    NotFound(EmployeeId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateResource(email) => {
                write!(f, "Employee already exists with given email: {email}")
            }
            Self::NotFound(id) => write!(f, "Employee does not exist with id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::DuplicateResource(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateEmail(email) => Self::DuplicateResource(email),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for employee CRUD operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new employee.
    ///
    /// # Contract
    /// - Any caller-provided `id` is ignored; storage assigns a fresh one.
    /// - Fails with `DuplicateResource` when the email is already taken.
    /// - Names and email are stored as given, without format checks.
    pub fn save_employee(&self, employee: &Employee) -> ServiceResult<Employee> {
        if self.repo.find_by_email(&employee.email)?.is_some() {
            warn!("event=employee_create module=service status=error error_code=duplicate_email");
            return Err(EmployeeServiceError::DuplicateResource(
                employee.email.clone(),
            ));
        }

        let new_employee = Employee {
            id: None,
            ..employee.clone()
        };
        let saved = self.repo.save(&new_employee)?;
        info!(
            "event=employee_create module=service status=ok id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Lists every stored employee.
    pub fn get_all_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.repo.find_all()?)
    }

    /// Gets one employee by id. Absence is `Ok(None)`, not an error.
    pub fn get_employee(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Overwrites first name, last name and email of an existing employee.
    ///
    /// # Contract
    /// - Fails with `NotFound(id)` when no employee has this id.
    /// - The returned record keeps `id`, regardless of `patch.id`.
    pub fn update_employee(&self, id: EmployeeId, patch: &Employee) -> ServiceResult<Employee> {
        let Some(mut stored) = self.repo.find_by_id(id)? else {
            warn!("event=employee_update module=service status=error error_code=not_found id={id}");
            return Err(EmployeeServiceError::NotFound(id));
        };

        stored.apply_patch(patch);
        let saved = self.repo.save(&stored)?;
        info!("event=employee_update module=service status=ok id={id}");
        Ok(saved)
    }

    /// Deletes an employee by id. Deleting an absent id is a no-op.
    pub fn delete_employee(&self, id: EmployeeId) -> ServiceResult<()> {
        self.repo.delete_by_id(id)?;
        info!("event=employee_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Exact-match lookup on the first/last name pair.
    pub fn find_employee(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ServiceResult<Option<Employee>> {
        Ok(self.repo.find_employee(first_name, last_name)?)
    }

    /// Exact-match lookup on the first name/email pair.
    pub fn find_employee_by_first_name_and_email(
        &self,
        first_name: &str,
        email: &str,
    ) -> ServiceResult<Option<Employee>> {
        Ok(self
            .repo
            .find_employee_by_first_name_and_email(first_name, email)?)
    }
}
