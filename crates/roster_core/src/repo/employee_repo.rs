//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert-or-update, lookup and delete APIs over `employees`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Field contents are stored as given; the schema only requires them
//!   to be non-null.
//! - Email uniqueness is enforced by the table's `UNIQUE` constraint and
//!   surfaced as `RepoError::DuplicateEmail`.
//! - Two-field lookups return the lowest-id match when several rows match.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId};
use log::debug;
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email
FROM employees";

const REQUIRED_COLUMNS: &[&str] = &["id", "first_name", "last_name", "email"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Update targeted an id with no stored row.
    NotFound(EmployeeId),
    /// Another row already holds this email.
    DuplicateEmail(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::DuplicateEmail(email) => {
                write!(f, "employee already exists with given email: {email}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for employee storage.
pub trait EmployeeRepository {
    /// Inserts when `employee.id` is `None`, otherwise updates that row.
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>>;
    fn find_employee(&self, first_name: &str, last_name: &str) -> RepoResult<Option<Employee>>;
    fn find_employee_by_first_name_and_email(
        &self,
        first_name: &str,
        email: &str,
    ) -> RepoResult<Option<Employee>>;
    /// Removes the row if present. Absent ids are not an error.
    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection previously returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps an arbitrary connection after checking its schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema
    ///   does not carry the `employees` shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'employees'
            );",
            [],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(RepoError::MissingRequiredTable("employees"));
        }

        let mut stmt = conn.prepare("PRAGMA table_info(employees);")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>("name"))?
            .collect::<Result<Vec<_>, _>>()?;
        for column in REQUIRED_COLUMNS {
            if !columns.iter().any(|name| name.as_str() == *column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "employees",
                    column: *column,
                });
            }
        }

        Ok(Self { conn })
    }

    fn insert(&self, employee: &Employee) -> RepoResult<Employee> {
        self.conn
            .execute(
                "INSERT INTO employees (first_name, last_name, email) VALUES (?1, ?2, ?3);",
                params![
                    employee.first_name.as_str(),
                    employee.last_name.as_str(),
                    employee.email.as_str(),
                ],
            )
            .map_err(|err| map_write_error(err, &employee.email))?;

        let id = self.conn.last_insert_rowid();
        debug!("event=employee_insert module=repo status=ok id={id}");
        Ok(employee.clone().with_id(id))
    }

    fn update(&self, id: EmployeeId, employee: &Employee) -> RepoResult<Employee> {
        let changed = self
            .conn
            .execute(
                "UPDATE employees
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    email = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?4;",
                params![
                    employee.first_name.as_str(),
                    employee.last_name.as_str(),
                    employee.email.as_str(),
                    id,
                ],
            )
            .map_err(|err| map_write_error(err, &employee.email))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!("event=employee_update module=repo status=ok id={id}");
        Ok(employee.clone().with_id(id))
    }

    fn query_one(
        &self,
        filter: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE {filter} ORDER BY id ASC LIMIT 1;"))?;
        Ok(stmt.query_row(params, read_employee_row).optional()?)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        match employee.id {
            None => self.insert(employee),
            Some(id) => self.update(id, employee),
        }
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(read_employee_row(row)?);
        }

        Ok(employees)
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.query_one("id = ?1", params![id])
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        self.query_one("email = ?1", params![email])
    }

    fn find_employee(&self, first_name: &str, last_name: &str) -> RepoResult<Option<Employee>> {
        self.query_one(
            "first_name = ?1 AND last_name = ?2",
            params![first_name, last_name],
        )
    }

    fn find_employee_by_first_name_and_email(
        &self,
        first_name: &str,
        email: &str,
    ) -> RepoResult<Option<Employee>> {
        self.query_one("first_name = ?1 AND email = ?2", params![first_name, email])
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![id])?;
        debug!("event=employee_delete module=repo status=ok id={id} removed={changed}");
        Ok(())
    }
}

fn read_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    })
}

fn map_write_error(err: rusqlite::Error, email: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
            return RepoError::DuplicateEmail(email.to_string());
        }
    }
    err.into()
}
