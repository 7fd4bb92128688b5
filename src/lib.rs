//! In-memory HR directory
//!
//! Employees, departments and the reporting hierarchy live in a single
//! [`Directory`]. Pay is computed per employment type, listings can be sorted
//! with interchangeable strategies, and the hierarchy renders as an
//! [`OrgChart`]. Hires and terminations are broadcast to subscribed
//! [`LifecycleListener`]s.

pub mod domain;
pub use domain::{Config, Department, Employee, EmployeeId, NewEmployee, Role};

/// The employee registry and its invariants.
pub mod directory;
pub use directory::{Directory, DirectoryError, EmployeeUpdate, ManagerUpdate, PayrollSummary};

pub mod notifier;
pub use notifier::{DispatchReport, LifecycleListener, LifecycleNotifier, ListenerError};

pub mod strategy;

pub mod chart;
pub use chart::OrgChart;
