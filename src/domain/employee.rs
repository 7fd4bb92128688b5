use serde::Serialize;

use crate::domain::{Compensation, Department, EmployeeId, EmploymentKind, Role};

/// A person employed by the organization.
///
/// An employee is created through [`NewEmployee`], which validates the
/// variant-specific pay terms. The compensation variant is fixed for the
/// lifetime of the record; names, department, role and manager may be changed
/// through [`Directory::update`](crate::Directory::update).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    id: EmployeeId,
    first_name: String,
    last_name: String,
    department: Department,
    role: Role,
    /// The manager's ID. Resolved through the directory, never owned.
    manager: Option<EmployeeId>,
    compensation: Compensation,
}

impl Employee {
    /// The unique identifier.
    #[must_use]
    pub const fn id(&self) -> &EmployeeId {
        &self.id
    }

    /// First name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The department the employee belongs to.
    #[must_use]
    pub const fn department(&self) -> &Department {
        &self.department
    }

    /// The employee's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The ID of the employee's manager, if any.
    #[must_use]
    pub const fn manager(&self) -> Option<&EmployeeId> {
        self.manager.as_ref()
    }

    /// Whether this employee reports to the given manager.
    #[must_use]
    pub fn reports_to(&self, manager: &EmployeeId) -> bool {
        self.manager.as_ref() == Some(manager)
    }

    /// The pay terms.
    #[must_use]
    pub const fn compensation(&self) -> &Compensation {
        &self.compensation
    }

    /// Effective pay for the period. See [`Compensation::pay`].
    #[must_use]
    pub fn pay(&self) -> f64 {
        self.compensation.pay()
    }

    pub(crate) fn set_first_name(&mut self, first_name: String) {
        self.first_name = first_name;
    }

    pub(crate) fn set_last_name(&mut self, last_name: String) {
        self.last_name = last_name;
    }

    pub(crate) fn set_department(&mut self, department: Department) {
        self.department = department;
    }

    pub(crate) const fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub(crate) fn set_manager(&mut self, manager: Option<EmployeeId>) {
        self.manager = manager;
    }
}

/// The fields shared by every employee, prior to validation.
///
/// Call [`NewEmployee::salaried`], [`NewEmployee::hourly`] or
/// [`NewEmployee::with_employment_type`] to validate the fields together with
/// the pay terms and produce an [`Employee`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// The unique identifier. Must not be empty.
    pub id: String,
    /// First name. Must not be empty.
    pub first_name: String,
    /// Last name. Must not be empty.
    pub last_name: String,
    /// Department, usually taken from the
    /// [`DepartmentRegistry`](crate::domain::DepartmentRegistry).
    pub department: Department,
    /// Job role.
    pub role: Role,
    /// ID of the manager. An empty string means "no manager".
    pub manager: Option<String>,
}

impl NewEmployee {
    /// Creates a draft with no manager.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        department: Department,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            department,
            role,
            manager: None,
        }
    }

    /// Sets the manager ID.
    #[must_use]
    pub fn reporting_to(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Builds a salaried (full-time) employee.
    ///
    /// # Errors
    ///
    /// Fails if a required field is empty, or if the base salary is not a
    /// positive, finite amount.
    pub fn salaried(self, base_salary: f64) -> Result<Employee, ConstructionError> {
        if !(base_salary.is_finite() && base_salary > 0.0) {
            return Err(ConstructionError::InvalidAmount {
                field: "base salary",
                value: base_salary,
                expected: "positive",
            });
        }
        self.finish(Compensation::Salaried { base_salary })
    }

    /// Builds an hourly (part-time) employee.
    ///
    /// # Errors
    ///
    /// Fails if a required field is empty, or if either the rate or the hours
    /// are negative or not finite.
    pub fn hourly(self, hourly_rate: f64, hours_worked: f64) -> Result<Employee, ConstructionError> {
        for (field, value) in [("hourly rate", hourly_rate), ("hours worked", hours_worked)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConstructionError::InvalidAmount {
                    field,
                    value,
                    expected: "non-negative",
                });
            }
        }
        self.finish(Compensation::Hourly {
            hourly_rate,
            hours_worked,
        })
    }

    /// Builds an employee from an employment type name and its pay
    /// parameters.
    ///
    /// `FULLTIME` takes the base salary as its first parameter; `PARTTIME`
    /// takes the hourly rate and the hours worked. Extra parameters are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`ConstructionError::UnknownEmploymentType`] for an
    /// unrecognised type, [`ConstructionError::MissingBaseSalary`] or
    /// [`ConstructionError::MissingHourlyTerms`] when too few parameters are
    /// supplied, and otherwise as [`Self::salaried`] / [`Self::hourly`].
    pub fn with_employment_type(
        self,
        employment_type: &str,
        params: &[f64],
    ) -> Result<Employee, ConstructionError> {
        let kind = EmploymentKind::parse(employment_type)
            .ok_or_else(|| ConstructionError::UnknownEmploymentType(employment_type.to_string()))?;

        match (kind, params) {
            (EmploymentKind::FullTime, [base_salary, ..]) => self.salaried(*base_salary),
            (EmploymentKind::FullTime, []) => Err(ConstructionError::MissingBaseSalary),
            (EmploymentKind::PartTime, [rate, hours, ..]) => self.hourly(*rate, *hours),
            (EmploymentKind::PartTime, _) => Err(ConstructionError::MissingHourlyTerms),
        }
    }

    fn finish(self, compensation: Compensation) -> Result<Employee, ConstructionError> {
        let id = EmployeeId::new(self.id).map_err(|_| ConstructionError::EmptyField("id"))?;
        let first_name = required(self.first_name, "first name")?;
        let last_name = required(self.last_name, "last name")?;
        let manager = self
            .manager
            .and_then(|manager| EmployeeId::new(manager).ok());

        Ok(Employee {
            id,
            first_name,
            last_name,
            department: self.department,
            role: self.role,
            manager,
            compensation,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ConstructionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConstructionError::EmptyField(field))
    } else if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Errors that can occur when constructing an [`Employee`].
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ConstructionError {
    /// A required text field was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    /// A full-time employee was requested without a base salary.
    #[error("a full-time employee requires a base salary")]
    MissingBaseSalary,
    /// A part-time employee was requested without both hourly terms.
    #[error("a part-time employee requires an hourly rate and hours worked")]
    MissingHourlyTerms,
    /// A pay amount was out of range.
    #[error("{field} must be {expected}, got {value}")]
    InvalidAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Description of the accepted range.
        expected: &'static str,
    },
    /// The employment type was not recognised.
    #[error("unknown employment type '{0}' (expected FULLTIME or PARTTIME)")]
    UnknownEmploymentType(String),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn draft() -> NewEmployee {
        NewEmployee::new(
            "E001",
            "Alice",
            "Smith",
            Department::new("Information Technology", "IT-001"),
            Role::Developer,
        )
    }

    #[test]
    fn builds_salaried_employee() {
        let employee = draft().reporting_to("E000").salaried(75_000.0).unwrap();

        assert_eq!(employee.id().as_str(), "E001");
        assert_eq!(employee.full_name(), "Alice Smith");
        assert_eq!(employee.manager().map(EmployeeId::as_str), Some("E000"));
        assert_eq!(
            employee.compensation(),
            &Compensation::Salaried {
                base_salary: 75_000.0
            }
        );
    }

    #[test]
    fn empty_manager_means_no_manager() {
        let employee = draft().reporting_to("  ").hourly(20.0, 10.0).unwrap();
        assert!(employee.manager().is_none());
    }

    #[test]
    fn trims_names() {
        let mut new = draft();
        new.first_name = "  Alice ".to_string();
        let employee = new.salaried(1.0).unwrap();
        assert_eq!(employee.first_name(), "Alice");
    }

    #[test_case("", "Alice", "Smith", "id")]
    #[test_case("E001", " ", "Smith", "first name")]
    #[test_case("E001", "Alice", "", "last name")]
    fn rejects_empty_fields(id: &str, first: &str, last: &str, field: &str) {
        let mut new = draft();
        new.id = id.to_string();
        new.first_name = first.to_string();
        new.last_name = last.to_string();

        let err = new.salaried(50_000.0).unwrap_err();
        assert!(matches!(err, ConstructionError::EmptyField(f) if f == field));
    }

    #[test_case(0.0; "zero")]
    #[test_case(-10.0; "negative")]
    #[test_case(f64::NAN; "nan")]
    fn rejects_non_positive_salary(base: f64) {
        let err = draft().salaried(base).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::InvalidAmount {
                field: "base salary",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_hours() {
        let err = draft().hourly(25.0, -1.0).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::InvalidAmount {
                field: "hours worked",
                ..
            }
        ));
    }

    #[test]
    fn factory_dispatches_on_employment_type() {
        let full = draft().with_employment_type("FULLTIME", &[60_000.0]).unwrap();
        assert!(matches!(full.compensation(), Compensation::Salaried { .. }));

        let part = draft()
            .with_employment_type("parttime", &[25.0, 120.0])
            .unwrap();
        assert_eq!(part.pay(), 3_000.0);
    }

    #[test]
    fn factory_requires_variant_parameters() {
        assert_eq!(
            draft().with_employment_type("FULLTIME", &[]).unwrap_err(),
            ConstructionError::MissingBaseSalary
        );
        assert_eq!(
            draft().with_employment_type("PARTTIME", &[25.0]).unwrap_err(),
            ConstructionError::MissingHourlyTerms
        );
    }

    #[test]
    fn factory_rejects_unknown_type() {
        assert_eq!(
            draft().with_employment_type("INTERN", &[1.0]).unwrap_err(),
            ConstructionError::UnknownEmploymentType("INTERN".to_string())
        );
    }
}
