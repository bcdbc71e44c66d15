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

use approx::abs_diff_eq;
use serde::Serialize;
use std::fmt;

use crate::config::ConfigurationSet;
use crate::record::ParameterValue;
use crate::schema::SCHEMA;

/// Difference of a parameter between two configuration sets.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ParameterDifference {
    pub name: String,
    // None if the parameter is not in the set.
    pub left: Option<ParameterValue>,
    pub right: Option<ParameterValue>,
}

impl fmt::Display for ParameterDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: &Option<ParameterValue>| match value {
            Some(value) => value.to_string(),
            None => String::from("<missing>"),
        };

        write!(
            f,
            "{}: {} -> {}",
            self.name,
            show(&self.left),
            show(&self.right)
        )
    }
}

/// Compare two configuration sets parameter by parameter. The comments are
/// ignored.
///
/// # Arguments
/// * `left` - First configuration set.
/// * `right` - Second configuration set.
/// * `tolerance` - Absolute tolerance of the numeric values.
///
/// # Returns
/// Differences in the schema order. Empty if the sets match.
pub fn compare(
    left: &ConfigurationSet,
    right: &ConfigurationSet,
    tolerance: f64,
) -> Vec<ParameterDifference> {
    SCHEMA
        .iter()
        .filter_map(|spec| {
            let value_left = left.get(spec.name).map(|record| &record.values);
            let value_right = right.get(spec.name).map(|record| &record.values);

            let is_same = match (value_left, value_right) {
                (Some(a), Some(b)) => is_value_match(a, b, tolerance),
                (None, None) => true,
                _ => false,
            };

            if is_same {
                None
            } else {
                Some(ParameterDifference {
                    name: String::from(spec.name),
                    left: value_left.cloned(),
                    right: value_right.cloned(),
                })
            }
        })
        .collect()
}

/// The two values match within the tolerance or not.
///
/// # Arguments
/// * `a` - First value.
/// * `b` - Second value.
/// * `tolerance` - Absolute tolerance of the numeric values.
///
/// # Returns
/// True if the values match.
fn is_value_match(a: &ParameterValue, b: &ParameterValue, tolerance: f64) -> bool {
    match (a, b) {
        (ParameterValue::Text(text_a), ParameterValue::Text(text_b)) => text_a == text_b,
        _ => match (a.as_f64s(), b.as_f64s()) {
            (Some(values_a), Some(values_b)) => {
                (values_a.len() == values_b.len())
                    && values_a
                        .iter()
                        .zip(values_b.iter())
                        .all(|(x, y)| abs_diff_eq!(x, y, epsilon = tolerance))
            }
            _ => false,
        },
    }
}
