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

use crate::config::ConfigurationSet;
use crate::error::LoadError;
use crate::schema::{paired_arrays, SCHEMA};

// Pairs of (lower, upper) physical bounds.
const BOUNDS: [(&str, &str); 3] = [
    ("PC_MinPit", "PC_MaxPit"),
    ("VS_MinTq", "VS_MaxTq"),
    ("PC_MinRat", "PC_MaxRat"),
];

// Breakpoints of the lookup tables that are interpolated by the controller.
const BREAKPOINTS: [&str; 3] = ["PC_GS_angles", "WE_FOPoles_v", "PS_WindSpeeds"];

/// Validate the cross-field consistency of a parsed configuration set.
///
/// # Arguments
/// * `configuration` - Configuration set.
///
/// # Errors
/// Schema violation naming the first offending field.
pub fn validate(configuration: &ConfigurationSet) -> Result<(), LoadError> {
    check_presence(configuration)?;
    check_counts(configuration)?;
    check_modes(configuration)?;
    check_bounds(configuration)?;
    check_breakpoints(configuration)?;
    check_performance_table_size(configuration)?;

    Ok(())
}

/// Check that all the parameters of the schema are in the set.
fn check_presence(configuration: &ConfigurationSet) -> Result<(), LoadError> {
    match SCHEMA
        .iter()
        .find(|spec| !configuration.contains(spec.name))
    {
        Some(spec) => Err(LoadError::schema_violation(
            spec.name,
            format!("missing parameter ({})", spec.description),
        )),
        None => Ok(()),
    }
}

/// Check that every count field matches the lengths of its paired arrays.
fn check_counts(configuration: &ConfigurationSet) -> Result<(), LoadError> {
    for spec in SCHEMA.iter().filter(|spec| spec.is_count()) {
        let count: i64 = configuration.get_parameter(spec.name)?;
        if count < 1 {
            return Err(LoadError::schema_violation(
                spec.name,
                format!("table size should be at least 1, found {count}"),
            ));
        }

        for array in paired_arrays(spec.name) {
            let length = configuration
                .get(array.name)
                .map(|record| record.values.len())
                .unwrap_or_default();

            if (length as i64) != count {
                return Err(LoadError::schema_violation(
                    array.name,
                    format!(
                        "has {length} values but {} declares {count}",
                        spec.name
                    ),
                ));
            }
        }
    }

    Ok(())
}

/// Check that every mode flag is in its documented domain.
fn check_modes(configuration: &ConfigurationSet) -> Result<(), LoadError> {
    for spec in SCHEMA.iter() {
        if let Some(domain) = spec.domain {
            let value: i64 = configuration.get_parameter(spec.name)?;
            let domain = domain();

            if !domain.contains(&value) {
                return Err(LoadError::schema_violation(
                    spec.name,
                    format!("{value} is not in the domain {domain:?}"),
                ));
            }
        }
    }

    Ok(())
}

/// Check that the lower bounds are not greater than the upper bounds.
fn check_bounds(configuration: &ConfigurationSet) -> Result<(), LoadError> {
    for (name_lower, name_upper) in BOUNDS {
        let lower: f64 = configuration.get_parameter(name_lower)?;
        let upper: f64 = configuration.get_parameter(name_upper)?;

        if lower > upper {
            return Err(LoadError::schema_violation(
                name_upper,
                format!("{name_upper} = {upper} is less than {name_lower} = {lower}"),
            ));
        }
    }

    Ok(())
}

/// Check that the breakpoints of the lookup tables are non-decreasing.
fn check_breakpoints(configuration: &ConfigurationSet) -> Result<(), LoadError> {
    for name in BREAKPOINTS {
        let breakpoints: Vec<f64> = configuration.get_parameter(name)?;

        if let Some(idx) = breakpoints.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(LoadError::schema_violation(
                name,
                format!(
                    "breakpoints should be non-decreasing, found {} after {}",
                    breakpoints[idx + 1],
                    breakpoints[idx]
                ),
            ));
        }
    }

    Ok(())
}

/// Check the declared size of the external rotor performance tables. The
/// referenced file itself is not opened.
fn check_performance_table_size(configuration: &ConfigurationSet) -> Result<(), LoadError> {
    let name = "PerfTableSize";
    let size: Vec<i64> = configuration.get_parameter(name)?;

    if size.iter().any(|value| *value < 1) {
        return Err(LoadError::schema_violation(
            name,
            format!("table sizes should be at least 1, found {size:?}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::read_to_string;

    fn read_fixture() -> String {
        read_to_string("config/DISCON.IN").unwrap()
    }

    /// Replace the value part of a parameter line in the fixture.
    fn replace_value(text: &str, name: &str, value: &str) -> String {
        text.lines()
            .map(|line| {
                let is_target = line
                    .split_once('!')
                    .and_then(|(_, comment)| comment.split_whitespace().next())
                    == Some(name);
                if is_target && !line.trim_start().starts_with('!') {
                    format!("{value} ! {name}")
                } else {
                    String::from(line)
                }
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn validate_text(text: &str) -> Result<(), LoadError> {
        let configuration = ConfigurationSet::new(
            crate::loader::parse_records(text).expect("Fixture should parse."),
        );

        validate(&configuration)
    }

    fn assert_violation(text: &str, field: &str) {
        match validate_text(text).unwrap_err() {
            LoadError::SchemaViolation { field: offending, .. } => assert_eq!(offending, field),
            error => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn test_validate() {
        assert!(validate_text(&read_fixture()).is_ok());
    }

    #[test]
    fn test_check_presence() {
        let text: String = read_fixture()
            .lines()
            .filter(|line| !line.contains("! Fl_Kp"))
            .collect::<Vec<&str>>()
            .join("\n");

        assert_violation(&text, "Fl_Kp");
        assert_eq!(
            validate_text(&text).unwrap_err().to_string(),
            "Schema violation of Fl_Kp: missing parameter (Nacelle velocity proportional feedback gain [s])"
        );
    }

    #[test]
    fn test_check_counts() {
        // 30 entries declared but 29 angles
        let angles: Vec<String> = (0..29).map(|idx| format!("{}", 0.01 * (idx as f64))).collect();
        let text = replace_value(&read_fixture(), "PC_GS_angles", &angles.join(" "));
        assert_violation(&text, "PC_GS_angles");

        // Count changed, arrays unchanged
        let text = replace_value(&read_fixture(), "PC_GS_n", "31");
        assert_violation(&text, "PC_GS_angles");

        // Empty table
        let text = replace_value(&read_fixture(), "VS_n", "0");
        assert_violation(&text, "VS_n");
    }

    #[test]
    fn test_check_modes() {
        let text = replace_value(&read_fixture(), "VS_ControlMode", "5");
        assert_violation(&text, "VS_ControlMode");

        let text = replace_value(&read_fixture(), "F_LPFType", "0");
        assert_violation(&text, "F_LPFType");

        let text = replace_value(&read_fixture(), "Flp_Mode", "-1");
        assert_violation(&text, "Flp_Mode");

        let text = replace_value(&read_fixture(), "PS_Mode", "1");
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn test_check_bounds() {
        let text = replace_value(&read_fixture(), "PC_MaxPit", "-1.0");
        assert_violation(&text, "PC_MaxPit");

        let text = replace_value(&read_fixture(), "VS_MinTq", "50000.0");
        assert_violation(&text, "VS_MaxTq");

        // Equal bounds are consistent
        let text = replace_value(&read_fixture(), "PC_MaxPit", "0.0");
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn test_check_breakpoints() {
        let mut speeds: Vec<String> = (0..30).map(|idx| format!("{}.0", 3 + idx)).collect();
        speeds.swap(3, 4);

        let text = replace_value(&read_fixture(), "PS_WindSpeeds", &speeds.join(" "));
        assert_violation(&text, "PS_WindSpeeds");
    }

    #[test]
    fn test_check_performance_table_size() {
        let text = replace_value(&read_fixture(), "PerfTableSize", "104 0");
        assert_violation(&text, "PerfTableSize");
    }
}
