//! Domain models for the HR directory.
//!
//! This module contains the core domain types: employees and their pay terms,
//! departments, roles, and configuration.

mod compensation;
pub use compensation::{Compensation, EmploymentKind, SALARIED_UPLIFT};

mod config;
pub use config::Config;

/// Departments and the fixed department registry.
pub mod department;
pub use department::{Department, DepartmentRegistry};

/// Employee records and their validating factory.
pub mod employee;
pub use employee::{ConstructionError, Employee, NewEmployee};

mod employee_id;
pub use employee_id::{EmployeeId, EmptyIdError};

mod role;
pub use role::{Role, UnknownRoleError};
