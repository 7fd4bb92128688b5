//! Interchangeable pay calculation and sorting rules.

/// Pay calculation strategies, selected by compensation variant.
pub mod pay;
pub use pay::{strategy_for, HourlyPay, PayStrategy, SalariedPay, StrategyMismatch};

/// Sorting strategies for display listings.
pub mod sort;
pub use sort::{ByDepartment, ByLastName, SortKey, SortStrategy};
