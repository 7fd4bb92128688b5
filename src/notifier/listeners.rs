use std::io::{self, Write};

use crate::{
    domain::Employee,
    notifier::{LifecycleListener, ListenerError},
};

/// Creates and revokes IT accounts as people join and leave.
#[derive(Debug)]
pub struct ItProvisioning<W> {
    out: W,
}

impl ItProvisioning<io::Stdout> {
    /// Writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ItProvisioning<W> {
    /// Writes one line per event to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LifecycleListener for ItProvisioning<W> {
    fn name(&self) -> &str {
        "IT Dept"
    }

    fn on_hire(&mut self, employee: &Employee) -> Result<(), ListenerError> {
        writeln!(
            self.out,
            "[IT Dept] New employee hired: {}. Creating IT accounts...",
            employee.full_name()
        )
        .map_err(|e| ListenerError::new(self.name(), e))
    }

    fn on_terminate(&mut self, employee: &Employee) -> Result<(), ListenerError> {
        writeln!(
            self.out,
            "[IT Dept] Employee terminated: {}. Revoking IT access...",
            employee.full_name()
        )
        .map_err(|e| ListenerError::new(self.name(), e))
    }
}

/// Adds people to payroll when hired and removes them when terminated.
#[derive(Debug)]
pub struct Payroll<W> {
    out: W,
}

impl Payroll<io::Stdout> {
    /// Writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Payroll<W> {
    /// Writes one line per event to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LifecycleListener for Payroll<W> {
    fn name(&self) -> &str {
        "Finance Dept"
    }

    fn on_hire(&mut self, employee: &Employee) -> Result<(), ListenerError> {
        writeln!(
            self.out,
            "[Finance Dept] New employee hired: {}. Adding to payroll...",
            employee.full_name()
        )
        .map_err(|e| ListenerError::new(self.name(), e))
    }

    fn on_terminate(&mut self, employee: &Employee) -> Result<(), ListenerError> {
        writeln!(
            self.out,
            "[Finance Dept] Employee terminated: {}. Removing from payroll...",
            employee.full_name()
        )
        .map_err(|e| ListenerError::new(self.name(), e))
    }
}
