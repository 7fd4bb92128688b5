use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Serialize, Serializer};

/// A caller-supplied employee identifier, such as `E001`.
///
/// Identifiers are trimmed of surrounding whitespace and must not be empty.
/// Once assigned, an identifier is never regenerated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmployeeId(NonEmptyString);

impl EmployeeId {
    /// Creates a new `EmployeeId`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdError`] if the string is empty after trimming.
    pub fn new(s: impl Into<String>) -> Result<Self, EmptyIdError> {
        let s = s.into();
        let trimmed = s.trim();
        let value = if trimmed.len() == s.len() {
            s
        } else {
            trimmed.to_string()
        };
        NonEmptyString::new(value)
            .map(Self)
            .map_err(|_| EmptyIdError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = EmptyIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmployeeId {
    type Error = EmptyIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for EmployeeId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for EmployeeId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<str> for EmployeeId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EmployeeId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EmployeeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when an employee ID is empty or whitespace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("employee ID must not be empty")]
pub struct EmptyIdError;

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("E001", "E001"; "plain")]
    #[test_case("  E001 ", "E001"; "trimmed")]
    #[test_case("emp-7", "emp-7"; "case preserved")]
    fn parses_valid_ids(input: &str, expected: &str) {
        let id = EmployeeId::new(input).unwrap();
        assert_eq!(id.as_str(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "whitespace")]
    fn rejects_empty_ids(input: &str) {
        assert_eq!(EmployeeId::new(input), Err(EmptyIdError));
    }

    #[test]
    fn compares_against_str() {
        let id = EmployeeId::try_from("E003").unwrap();
        assert!(id == "E003");
        assert_eq!(id.to_string(), "E003");
    }
}
