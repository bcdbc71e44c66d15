// This file is part of discon_params.
//
// Developed for the Vera Rubin Observatory Systems.
// This product includes software developed by the LSST Project
// (https://www.lsst.org).
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::compare::compare;
use crate::enums::ModeFlag;
use crate::error::LoadError;
use crate::loader::{load, parse_configuration, Source};
use crate::record::{FromParameter, ParameterRecord};
use crate::schema::SCHEMA;

/// Immutable set of the controller parameters.
///
/// The set is only built by the loader after the validation. There is no way
/// to change it afterwards, so it can be shared between threads freely.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ConfigurationSet {
    // Records in the schema order.
    records: Vec<ParameterRecord>,
    #[serde(skip)]
    _index: HashMap<String, usize>,
}

impl ConfigurationSet {
    /// Create a new configuration set.
    ///
    /// # Arguments
    /// * `records` - Parameter records in any order. The names should be
    /// unique.
    ///
    /// # Returns
    /// A new configuration set with the records in the schema order.
    pub(crate) fn new(mut records: Vec<ParameterRecord>) -> Self {
        records.sort_by_key(|record| {
            SCHEMA
                .iter()
                .position(|spec| spec.name == record.name)
                .unwrap_or(SCHEMA.len())
        });

        let index = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.name.clone(), idx))
            .collect();

        Self {
            records,
            _index: index,
        }
    }

    /// Load the configuration set from the parameter file.
    ///
    /// # Arguments
    /// * `filepath` - Path of the parameter file.
    ///
    /// # Returns
    /// Configuration set.
    ///
    /// # Errors
    /// IO, parse or schema error.
    pub fn from_file(filepath: &Path) -> Result<Self, LoadError> {
        load(Source::Path(filepath))
    }

    /// Get the record of a parameter.
    ///
    /// # Arguments
    /// * `name` - Canonical name of the parameter.
    ///
    /// # Returns
    /// Record. None if the parameter is not in the set.
    pub fn get(&self, name: &str) -> Option<&ParameterRecord> {
        self._index.get(name).map(|idx| &self.records[*idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self._index.contains_key(name)
    }

    /// Get the typed value of a parameter.
    ///
    /// # Arguments
    /// * `name` - Canonical name of the parameter.
    ///
    /// # Returns
    /// The parameter.
    ///
    /// # Errors
    /// Schema violation if the parameter is missing or has another type.
    pub fn get_parameter<T: FromParameter>(&self, name: &str) -> Result<T, LoadError> {
        let record = self
            .get(name)
            .ok_or_else(|| LoadError::schema_violation(name, "missing parameter"))?;

        T::from_record(record)
    }

    /// Get a mode flag.
    ///
    /// # Arguments
    /// * `name` - Canonical name of the flag.
    ///
    /// # Returns
    /// The flag.
    ///
    /// # Errors
    /// Schema violation if the flag is missing or out of its domain.
    pub fn get_mode<M: ModeFlag>(&self, name: &str) -> Result<M, LoadError> {
        let value: i64 = self.get_parameter(name)?;

        M::from_value(value).ok_or_else(|| {
            LoadError::schema_violation(
                name,
                format!("{value} is not in the domain {:?}", M::domain()),
            )
        })
    }

    /// Iterate the records in the schema order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The two sets have the same values within the tolerance or not. The
    /// comments are ignored.
    ///
    /// # Arguments
    /// * `other` - Other configuration set.
    /// * `tolerance` - Absolute tolerance of the numeric values.
    ///
    /// # Returns
    /// True if there is no difference.
    pub fn approx_eq(&self, other: &ConfigurationSet, tolerance: f64) -> bool {
        compare(self, other, tolerance).is_empty()
    }
}

impl FromStr for ConfigurationSet {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_configuration(s)
    }
}

impl<'a> IntoIterator for &'a ConfigurationSet {
    type Item = &'a ParameterRecord;
    type IntoIter = std::slice::Iter<'a, ParameterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
