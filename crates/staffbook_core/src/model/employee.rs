//! Employee domain model.
//!
//! # Responsibility
//! - Define the record persisted in the `employees` table.
//! - Define the JSON shape accepted by bulk load files.
//!
//! # Invariants
//! - Every instance read from storage carries all columns; there are no
//!   partial projections.
//! - JSON keys use camelCase (`startDate`, `daysOff`); missing keys and
//!   `null` values decode to zero/empty values.

use serde::{Deserialize, Deserializer, Serialize};

/// One employee row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    /// Lookup key. Unique at the storage layer.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nationality: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub department: String,
    /// Free-form reason text (e.g. for days off).
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    /// Stored verbatim; no date parsing is applied.
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub days_off: i64,
}

/// Decodes `null` as the field's zero value, same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Employee {
    /// Creates an employee with the given name and every other field zeroed.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Overwrites every non-key field with the values from `other`.
    ///
    /// `name` is kept, so the record still targets the same row.
    pub fn overwrite_fields_from(&mut self, other: &Employee) {
        self.age = other.age;
        self.gender = other.gender.clone();
        self.nationality = other.nationality.clone();
        self.email = other.email.clone();
        self.department = other.department.clone();
        self.reason = other.reason.clone();
        self.start_date = other.start_date.clone();
        self.days_off = other.days_off;
    }
}
