//! The authoritative in-memory set of employees.
//!
//! The [`Directory`] exclusively owns every [`Employee`]. Manager references
//! are stored as IDs and resolved through the directory on demand, so removing
//! an employee never leaves a dangling reference behind: removal is refused
//! while anyone still reports to them.

use std::fmt;

use nonempty::NonEmpty;
use petgraph::{
    algo::{has_path_connecting, is_cyclic_directed, tarjan_scc},
    graphmap::DiGraphMap,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    domain::{
        Config, ConstructionError, Department, DepartmentRegistry, Employee, EmployeeId,
        EmploymentKind, Role,
    },
    notifier::{DispatchReport, LifecycleListener, LifecycleNotifier, ListenerId},
    strategy::{pay::strategy_for, SortStrategy, StrategyMismatch},
};

/// The single authoritative registry of employees.
///
/// Employees are kept in insertion order. Lookups are linear scans, which is
/// fine for the small rosters this is designed for.
pub struct Directory {
    employees: Vec<Employee>,
    departments: DepartmentRegistry,
    notifier: LifecycleNotifier,
    sort_strategy: Option<Box<dyn SortStrategy>>,
    require_known_manager: bool,
}

impl Default for Directory {
    fn default() -> Self {
        Self::with_config(&Config::default())
    }
}

impl fmt::Debug for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory")
            .field("employees", &self.employees)
            .field("notifier", &self.notifier)
            .field("sort_strategy", &self.sort_strategy_name())
            .field("require_known_manager", &self.require_known_manager)
            .finish_non_exhaustive()
    }
}

/// Errors returned by [`Directory`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectoryError {
    /// An employee with this ID already exists.
    #[error("employee {0} already exists")]
    DuplicateId(EmployeeId),

    /// No employee has this ID.
    #[error("employee {0} not found")]
    NotFound(String),

    /// No department has this code.
    #[error("department '{0}' not found")]
    DepartmentNotFound(String),

    /// The employee still has direct reports and cannot be removed.
    #[error("cannot remove {id}: {count} employee(s) still report to them", count = .subordinates.len())]
    HasSubordinates {
        /// The employee that was to be removed.
        id: EmployeeId,
        /// IDs of the direct reports, in directory order.
        subordinates: NonEmpty<EmployeeId>,
    },

    /// The named manager is not in the directory.
    #[error("manager {manager} of employee {id} not found")]
    ManagerNotFound {
        /// The employee being added or updated.
        id: EmployeeId,
        /// The unknown manager ID.
        manager: EmployeeId,
    },

    /// An employee was named as their own manager.
    #[error("employee {0} cannot be their own manager")]
    SelfManaged(EmployeeId),

    /// Assigning the manager would create a reporting cycle.
    #[error("making {manager} the manager of {id} would create a reporting cycle")]
    ManagerCycle {
        /// The employee being added or updated.
        id: EmployeeId,
        /// The proposed manager.
        manager: EmployeeId,
    },

    /// An update supplied an invalid value.
    #[error(transparent)]
    Invalid(#[from] ConstructionError),
}

/// The outcome of a successful [`Directory::remove`].
#[derive(Debug, Clone, PartialEq)]
pub struct Termination {
    /// The employee that was removed.
    pub employee: Employee,
    /// The result of notifying listeners.
    pub report: DispatchReport,
}

/// How [`Directory::update`] should treat the manager reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ManagerUpdate {
    /// Leave the manager unchanged.
    #[default]
    Keep,
    /// Remove the manager, making the employee a root of the org chart.
    Clear,
    /// Report to the given manager.
    Set(EmployeeId),
}

/// Changes to apply with [`Directory::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New department.
    pub department: Option<Department>,
    /// New role.
    pub role: Option<Role>,
    /// Manager change.
    pub manager: ManagerUpdate,
}

impl EmployeeUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One employee's line in a [`PayrollSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayLine {
    /// The employee's ID.
    pub id: EmployeeId,
    /// "First Last".
    pub name: String,
    /// Salaried or hourly.
    pub kind: EmploymentKind,
    /// Calculated pay.
    pub pay: f64,
}

/// Pay for every employee, in directory order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayrollSummary {
    /// Individual pay lines.
    pub lines: Vec<PayLine>,
    /// Sum of all pay lines.
    pub total: f64,
}

impl Directory {
    /// Creates an empty directory with the default department registry and no
    /// listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty directory, applying the given configuration.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self {
            employees: Vec::new(),
            departments: DepartmentRegistry::default(),
            notifier: LifecycleNotifier::default(),
            sort_strategy: None,
            require_known_manager: config.require_known_manager,
        }
    }

    /// Adds an employee and notifies listeners of the hire.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::DuplicateId`] if the ID is already taken
    /// - [`DirectoryError::SelfManaged`] if the employee names themself as
    ///   manager
    /// - [`DirectoryError::ManagerNotFound`] if the manager is not in the
    ///   directory and manager validation is enabled
    /// - [`DirectoryError::ManagerCycle`] if the manager already reports,
    ///   directly or indirectly, to the new employee
    ///
    /// The directory is unchanged when an error is returned.
    #[instrument(skip(self, employee), fields(employee = %employee.id()))]
    pub fn add(&mut self, employee: Employee) -> Result<DispatchReport, DirectoryError> {
        if self.contains(employee.id()) {
            return Err(DirectoryError::DuplicateId(employee.id().clone()));
        }

        if let Some(manager) = employee.manager() {
            self.check_manager(employee.id(), manager, self.require_known_manager)?;
        }

        tracing::info!("Added employee: {}", employee.full_name());

        let index = self.employees.len();
        self.employees.push(employee);
        Ok(self.notifier.notify_hire(&self.employees[index]))
    }

    /// Removes an employee and notifies listeners of the termination.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::NotFound`] if no employee has this ID
    /// - [`DirectoryError::HasSubordinates`] if anyone reports to the
    ///   employee; nothing is removed
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> Result<Termination, DirectoryError> {
        let position = self
            .position(id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        let subordinates: Vec<EmployeeId> = self
            .subordinates(id)
            .map(|employee| employee.id().clone())
            .collect();
        if let Some(subordinates) = NonEmpty::from_vec(subordinates) {
            return Err(DirectoryError::HasSubordinates {
                id: self.employees[position].id().clone(),
                subordinates,
            });
        }

        let employee = self.employees.remove(position);
        tracing::info!("Removed employee with ID: {}", employee.id());

        let report = self.notifier.notify_termination(&employee);
        Ok(Termination { employee, report })
    }

    /// Applies changes to an employee in place.
    ///
    /// The update is all-or-nothing: if any change is rejected, none are
    /// applied.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::NotFound`] if no employee has this ID
    /// - [`DirectoryError::Invalid`] if a new name is empty
    /// - [`DirectoryError::ManagerNotFound`], [`DirectoryError::SelfManaged`]
    ///   or [`DirectoryError::ManagerCycle`] if the new manager is not
    ///   acceptable
    #[instrument(skip(self, changes))]
    pub fn update(&mut self, id: &str, changes: EmployeeUpdate) -> Result<&Employee, DirectoryError> {
        let position = self
            .position(id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        let employee_id = self.employees[position].id().clone();

        let first_name = changes
            .first_name
            .map(|name| non_empty(name, "first name"))
            .transpose()?;
        let last_name = changes
            .last_name
            .map(|name| non_empty(name, "last name"))
            .transpose()?;
        let manager = match changes.manager {
            ManagerUpdate::Keep => None,
            ManagerUpdate::Clear => Some(None),
            ManagerUpdate::Set(manager) => {
                self.check_manager(&employee_id, &manager, true)?;
                Some(Some(manager))
            }
        };

        let employee = &mut self.employees[position];
        if let Some(first_name) = first_name {
            employee.set_first_name(first_name);
        }
        if let Some(last_name) = last_name {
            employee.set_last_name(last_name);
        }
        if let Some(department) = changes.department {
            employee.set_department(department);
        }
        if let Some(role) = changes.role {
            employee.set_role(role);
        }
        if let Some(manager) = manager {
            employee.set_manager(manager);
        }

        tracing::info!("Updated employee: {}", employee.id());
        Ok(employee)
    }

    /// Finds an employee by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id() == id)
    }

    /// Whether an employee with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Resolves an employee's manager.
    ///
    /// Returns `None` if the employee is unknown, has no manager, or names a
    /// manager that is not in the directory.
    #[must_use]
    pub fn manager_of(&self, id: &str) -> Option<&Employee> {
        let manager = self.find_by_id(id)?.manager()?;
        self.find_by_id(manager)
    }

    /// The employees reporting directly to `id`, in directory order.
    pub fn subordinates<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Employee> + 'a {
        self.employees
            .iter()
            .filter(move |employee| employee.manager().is_some_and(|manager| manager == id))
    }

    /// Employees with no manager, in directory order.
    pub fn roots(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.employees
            .iter()
            .filter(|employee| employee.manager().is_none())
    }

    /// Iterates over all employees in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.employees.iter()
    }

    /// The number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Returns a copy of every employee, in insertion order.
    ///
    /// The copy is independent: sorting or modifying it does not affect the
    /// directory.
    #[must_use]
    pub fn list_all(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    /// Sets the strategy used by [`Self::list_sorted`].
    pub fn set_sort_strategy(&mut self, strategy: Box<dyn SortStrategy>) {
        tracing::debug!("Sort strategy set to {}", strategy.name());
        self.sort_strategy = Some(strategy);
    }

    /// Clears the sort strategy; [`Self::list_sorted`] returns insertion order.
    pub fn clear_sort_strategy(&mut self) {
        self.sort_strategy = None;
    }

    /// The name of the active sort strategy, if any.
    #[must_use]
    pub fn sort_strategy_name(&self) -> Option<&'static str> {
        self.sort_strategy.as_ref().map(|strategy| strategy.name())
    }

    /// Returns a copy of every employee, ordered by the active sort strategy.
    #[must_use]
    pub fn list_sorted(&self) -> Vec<Employee> {
        let mut employees = self.list_all();
        if let Some(strategy) = &self.sort_strategy {
            strategy.sort(&mut employees);
        }
        employees
    }

    /// Looks up a department by code, ignoring case.
    #[must_use]
    pub fn find_department(&self, code: &str) -> Option<&Department> {
        self.departments.find(code)
    }

    /// Looks up a department by code, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DepartmentNotFound`] for an unknown code.
    pub fn department(&self, code: &str) -> Result<&Department, DirectoryError> {
        self.find_department(code)
            .ok_or_else(|| DirectoryError::DepartmentNotFound(code.trim().to_string()))
    }

    /// The department registry.
    #[must_use]
    pub const fn departments(&self) -> &DepartmentRegistry {
        &self.departments
    }

    /// Calculates pay for every employee using the strategy matching their
    /// compensation.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyMismatch`] if a selected strategy rejects an employee.
    /// The built-in strategies never do.
    pub fn payroll(&self) -> Result<PayrollSummary, StrategyMismatch> {
        let lines = self
            .employees
            .iter()
            .map(|employee| {
                let pay = strategy_for(employee.compensation()).calculate(employee)?;
                Ok(PayLine {
                    id: employee.id().clone(),
                    name: employee.full_name(),
                    kind: employee.compensation().kind(),
                    pay,
                })
            })
            .collect::<Result<Vec<_>, StrategyMismatch>>()?;
        let total = lines.iter().map(|line| line.pay).sum();

        Ok(PayrollSummary { lines, total })
    }

    /// Subscribes a lifecycle listener.
    pub fn subscribe(&mut self, listener: impl LifecycleListener + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// The lifecycle notifier.
    #[must_use]
    pub const fn notifier(&self) -> &LifecycleNotifier {
        &self.notifier
    }

    /// The lifecycle notifier, for subscribing and unsubscribing listeners.
    pub const fn notifier_mut(&mut self) -> &mut LifecycleNotifier {
        &mut self.notifier
    }

    /// Whether the manager relation contains a cycle.
    ///
    /// Cycles are rejected by [`Self::add`] and [`Self::update`], so this is a
    /// consistency check that should always return `false`.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.reporting_graph())
    }

    /// Returns every reporting cycle as a sorted list of IDs.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<EmployeeId>> {
        let graph = self.reporting_graph();
        let mut cycles: Vec<Vec<EmployeeId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&node| graph.contains_edge(node, node))
            })
            .map(|component| {
                let mut ids: Vec<EmployeeId> = component
                    .into_iter()
                    .filter_map(|id| self.find_by_id(id).map(|e| e.id().clone()))
                    .collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }
}

impl Directory {
    fn position(&self, id: &str) -> Option<usize> {
        self.employees.iter().position(|employee| employee.id() == id)
    }

    /// The manager relation as a graph. Edges point from employee to manager.
    ///
    /// Managers that are not in the directory still appear as nodes.
    fn reporting_graph(&self) -> DiGraphMap<&str, ()> {
        let mut graph = DiGraphMap::with_capacity(self.employees.len(), self.employees.len());
        for employee in &self.employees {
            graph.add_node(employee.id().as_str());
            if let Some(manager) = employee.manager() {
                graph.add_edge(employee.id().as_str(), manager.as_str(), ());
            }
        }
        graph
    }

    fn check_manager(
        &self,
        id: &EmployeeId,
        manager: &EmployeeId,
        require_known: bool,
    ) -> Result<(), DirectoryError> {
        if manager == id {
            return Err(DirectoryError::SelfManaged(id.clone()));
        }

        if require_known && !self.contains(manager) {
            return Err(DirectoryError::ManagerNotFound {
                id: id.clone(),
                manager: manager.clone(),
            });
        }

        if self.manager_would_create_cycle(id, manager) {
            return Err(DirectoryError::ManagerCycle {
                id: id.clone(),
                manager: manager.clone(),
            });
        }

        Ok(())
    }

    /// A cycle appears if `id` is already somewhere up `manager`'s reporting
    /// chain.
    fn manager_would_create_cycle(&self, id: &str, manager: &str) -> bool {
        let graph = self.reporting_graph();
        if !graph.contains_node(id) || !graph.contains_node(manager) {
            return false;
        }
        has_path_connecting(&graph, manager, id, None)
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ConstructionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConstructionError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
