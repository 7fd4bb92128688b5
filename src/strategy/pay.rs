use crate::domain::{Compensation, Employee, EmployeeId, EmploymentKind};

/// A rule for computing an employee's pay.
pub trait PayStrategy {
    /// A short name used in error messages.
    fn name(&self) -> &'static str;

    /// The employment kind this strategy applies to.
    fn accepts(&self) -> EmploymentKind;

    /// Computes pay for the employee.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyMismatch`] if the employee is not of the kind this
    /// strategy accepts.
    fn calculate(&self, employee: &Employee) -> Result<f64, StrategyMismatch>;
}

/// Pay for salaried (full-time) employees: base salary with a 10% uplift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalariedPay;

impl PayStrategy for SalariedPay {
    fn name(&self) -> &'static str {
        "salaried"
    }

    fn accepts(&self) -> EmploymentKind {
        EmploymentKind::FullTime
    }

    fn calculate(&self, employee: &Employee) -> Result<f64, StrategyMismatch> {
        match employee.compensation() {
            salaried @ Compensation::Salaried { .. } => Ok(salaried.pay()),
            Compensation::Hourly { .. } => Err(StrategyMismatch::new(self, employee)),
        }
    }
}

/// Pay for hourly (part-time) employees: rate × hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourlyPay;

impl PayStrategy for HourlyPay {
    fn name(&self) -> &'static str {
        "hourly"
    }

    fn accepts(&self) -> EmploymentKind {
        EmploymentKind::PartTime
    }

    fn calculate(&self, employee: &Employee) -> Result<f64, StrategyMismatch> {
        match employee.compensation() {
            hourly @ Compensation::Hourly { .. } => Ok(hourly.pay()),
            Compensation::Salaried { .. } => Err(StrategyMismatch::new(self, employee)),
        }
    }
}

/// Returns the strategy matching the given compensation variant.
#[must_use]
pub fn strategy_for(compensation: &Compensation) -> &'static dyn PayStrategy {
    match compensation {
        Compensation::Salaried { .. } => &SalariedPay,
        Compensation::Hourly { .. } => &HourlyPay,
    }
}

/// A pay strategy was applied to an employee of the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("the {strategy} strategy only applies to {expected} employees, but {employee} is {actual}")]
pub struct StrategyMismatch {
    /// Name of the strategy.
    pub strategy: &'static str,
    /// The employee it was applied to.
    pub employee: EmployeeId,
    /// The kind the strategy accepts.
    pub expected: EmploymentKind,
    /// The employee's actual kind.
    pub actual: EmploymentKind,
}

impl StrategyMismatch {
    fn new(strategy: &dyn PayStrategy, employee: &Employee) -> Self {
        Self {
            strategy: strategy.name(),
            employee: employee.id().clone(),
            expected: strategy.accepts(),
            actual: employee.compensation().kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, NewEmployee, Role};

    fn draft(id: &str) -> NewEmployee {
        NewEmployee::new(id, "Pat", "Doe", Department::new("Sales", "SALES-001"), Role::QaEngineer)
    }

    #[test]
    fn salaried_strategy_applies_uplift() {
        let alice = draft("E001").salaried(75_000.0).unwrap();
        assert_eq!(SalariedPay.calculate(&alice).unwrap(), 82_500.0);
    }

    #[test]
    fn hourly_strategy_multiplies_rate_and_hours() {
        let bob = draft("E002").hourly(25.0, 120.0).unwrap();
        assert_eq!(HourlyPay.calculate(&bob).unwrap(), 3_000.0);
    }

    #[test]
    fn salaried_strategy_rejects_hourly_employee() {
        let bob = draft("E002").hourly(25.0, 120.0).unwrap();
        let err = SalariedPay.calculate(&bob).unwrap_err();

        assert_eq!(err.strategy, "salaried");
        assert_eq!(err.employee.as_str(), "E002");
        assert_eq!(err.expected, EmploymentKind::FullTime);
        assert_eq!(err.actual, EmploymentKind::PartTime);
    }

    #[test]
    fn hourly_strategy_rejects_salaried_employee() {
        let alice = draft("E001").salaried(75_000.0).unwrap();
        let err = HourlyPay.calculate(&alice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the hourly strategy only applies to part-time employees, but E001 is full-time"
        );
    }

    #[test]
    fn strategy_for_matches_variant() {
        let alice = draft("E001").salaried(60_000.0).unwrap();
        let bob = draft("E002").hourly(10.0, 8.0).unwrap();

        assert_eq!(strategy_for(alice.compensation()).name(), "salaried");
        assert_eq!(strategy_for(bob.compensation()).calculate(&bob).unwrap(), 80.0);
    }
}
