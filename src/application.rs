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

use log::{info, warn};
use std::path::{Path, PathBuf};
use strum_macros::AsRefStr;

use crate::compare::compare;
use crate::config::ConfigurationSet;
use crate::constants::DEFAULT_TITLE;
use crate::controller_parameters::ControllerParameters;
use crate::error::ToolError;
use crate::format::writer::save_configuration;
use crate::settings::Settings;

/// Action requested on the command line.
#[derive(Debug, Clone, PartialEq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Check {
        file: Option<PathBuf>,
    },
    Show {
        file: Option<PathBuf>,
        is_json: bool,
    },
    Write {
        file: Option<PathBuf>,
        output: PathBuf,
        title: Option<String>,
    },
    Compare {
        left: PathBuf,
        right: PathBuf,
        tolerance: Option<f64>,
    },
}

/// Result of an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    // Text printed to the standard output.
    pub output: String,
    // The action succeeded or not. A comparison with differences does not.
    pub is_success: bool,
}

impl Report {
    fn success(output: String) -> Self {
        Self {
            output,
            is_success: true,
        }
    }
}

/// Run the application.
///
/// # Arguments
/// * `action` - Action to run.
/// * `settings` - Application settings.
///
/// # Returns
/// Report of the action.
///
/// # Errors
/// If a parameter file can not be loaded or written.
pub fn run(action: &Action, settings: &Settings) -> Result<Report, ToolError> {
    info!("Run the {} action.", action.as_ref());

    match action {
        Action::Check { file } => {
            let filepath = get_final_file(file.as_deref(), settings);
            let configuration = ConfigurationSet::from_file(&filepath)?;

            // The typed view should build from any valid set.
            ControllerParameters::from_configuration(&configuration)?;

            Ok(Report::success(format!(
                "{:?} is valid with {} parameters.",
                filepath,
                configuration.len()
            )))
        }
        Action::Show { file, is_json } => {
            let filepath = get_final_file(file.as_deref(), settings);
            let configuration = ConfigurationSet::from_file(&filepath)?;

            Ok(Report::success(show(&configuration, *is_json)?))
        }
        Action::Write {
            file,
            output,
            title,
        } => {
            let filepath = get_final_file(file.as_deref(), settings);
            let configuration = ConfigurationSet::from_file(&filepath)?;

            save_configuration(
                &configuration,
                title.as_deref().unwrap_or(DEFAULT_TITLE),
                output,
            )?;

            Ok(Report::success(format!("Wrote {:?} to {:?}.", filepath, output)))
        }
        Action::Compare {
            left,
            right,
            tolerance,
        } => {
            let tolerance = get_final_tolerance(*tolerance, settings);

            let configuration_left = ConfigurationSet::from_file(left)?;
            let configuration_right = ConfigurationSet::from_file(right)?;

            let differences = compare(&configuration_left, &configuration_right, tolerance);
            if differences.is_empty() {
                return Ok(Report::success(format!(
                    "No differences within the tolerance {tolerance}."
                )));
            }

            warn!(
                "Found {} differences between {:?} and {:?}.",
                differences.len(),
                left,
                right
            );

            Ok(Report {
                output: differences
                    .iter()
                    .map(|difference| difference.to_string())
                    .collect::<Vec<String>>()
                    .join("\n"),
                is_success: false,
            })
        }
    }
}

/// Show the configuration set.
///
/// # Arguments
/// * `configuration` - Configuration set.
/// * `is_json` - Show in the JSON format or not.
///
/// # Returns
/// One "NAME = values" line per parameter, or the JSON document.
///
/// # Errors
/// If the JSON serialization fails.
fn show(configuration: &ConfigurationSet, is_json: bool) -> Result<String, ToolError> {
    if is_json {
        return Ok(serde_json::to_string_pretty(configuration)?);
    }

    Ok(configuration
        .iter()
        .map(|record| format!("{} = {}", record.name, record.values))
        .collect::<Vec<String>>()
        .join("\n"))
}

/// Get the final parameter file.
///
/// # Arguments
/// * `file` - Parameter file from the command line. If the value is None, the
/// file is read from the settings.
/// * `settings` - Application settings.
///
/// # Returns
/// Final parameter file.
fn get_final_file(file: Option<&Path>, settings: &Settings) -> PathBuf {
    match file {
        Some(filepath) => filepath.to_path_buf(),
        None => settings.discon_file.clone(),
    }
}

/// Get the final tolerance of the comparison.
///
/// # Arguments
/// * `tolerance` - Tolerance from the command line. If the value is None, the
/// tolerance is read from the settings.
/// * `settings` - Application settings.
///
/// # Returns
/// Final tolerance.
fn get_final_tolerance(tolerance: Option<f64>, settings: &Settings) -> f64 {
    tolerance.unwrap_or(settings.compare_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs::{read_to_string, write};
    use tempfile::{tempdir, NamedTempFile};

    use crate::error::LoadError;
    use crate::schema::SCHEMA;

    fn create_settings() -> Settings {
        Settings::new(Path::new("config/parameters_app.yaml")).unwrap()
    }

    #[test]
    fn test_get_final_file() {
        let settings = create_settings();

        assert_eq!(
            get_final_file(None, &settings),
            PathBuf::from("config/DISCON.IN")
        );
        assert_eq!(
            get_final_file(Some(Path::new("other.IN")), &settings),
            PathBuf::from("other.IN")
        );
    }

    #[test]
    fn test_get_final_tolerance() {
        let settings = create_settings();

        assert_eq!(get_final_tolerance(None, &settings), 1e-9);
        assert_eq!(get_final_tolerance(Some(0.1), &settings), 0.1);
    }

    #[test]
    fn test_action_name() {
        assert_eq!(Action::Check { file: None }.as_ref(), "check");
        assert_eq!(
            Action::Compare {
                left: PathBuf::new(),
                right: PathBuf::new(),
                tolerance: None
            }
            .as_ref(),
            "compare"
        );
    }

    #[test]
    fn test_run_check() {
        let report = run(&Action::Check { file: None }, &create_settings()).unwrap();

        assert!(report.is_success);
        assert!(report.output.contains("valid with 89 parameters"));
    }

    #[test]
    fn test_run_check_error() {
        let file = NamedTempFile::new().unwrap();
        write(file.path(), "1 ! LoggingLevel\n").unwrap();

        let error = run(
            &Action::Check {
                file: Some(file.path().to_path_buf()),
            },
            &create_settings(),
        )
        .unwrap_err();

        assert!(matches!(
            error,
            ToolError::Load(LoadError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_run_show() {
        let report = run(
            &Action::Show {
                file: None,
                is_json: false,
            },
            &create_settings(),
        )
        .unwrap();

        let lines: Vec<&str> = report.output.lines().collect();
        assert_eq!(lines.len(), SCHEMA.len());
        assert_eq!(lines[0], "LoggingLevel = 1");
        assert!(lines.contains(&"PerfTableSize = 104  72"));
    }

    #[test]
    fn test_run_show_json() {
        let report = run(
            &Action::Show {
                file: None,
                is_json: true,
            },
            &create_settings(),
        )
        .unwrap();

        let document: Value = serde_json::from_str(&report.output).unwrap();
        let records = document["records"].as_array().unwrap();

        assert_eq!(records.len(), SCHEMA.len());
        assert_eq!(records[0]["name"], "LoggingLevel");
        assert_eq!(records[0]["values"], serde_json::json!([1]));
    }

    #[test]
    fn test_run_write_and_compare() {
        let settings = create_settings();
        let directory = tempdir().unwrap();
        let output = directory.path().join("DISCON.IN");

        let report = run(
            &Action::Write {
                file: None,
                output: output.clone(),
                title: Some(String::from("NREL-5MW")),
            },
            &settings,
        )
        .unwrap();
        assert!(report.is_success);
        assert!(read_to_string(&output)
            .unwrap()
            .starts_with("! Controller parameter input file for the NREL-5MW"));

        let report = run(
            &Action::Compare {
                left: settings.discon_file.clone(),
                right: output,
                tolerance: None,
            },
            &settings,
        )
        .unwrap();
        assert!(report.is_success);
    }

    #[test]
    fn test_run_compare_differences() {
        let settings = create_settings();
        let file = NamedTempFile::new().unwrap();
        let text = read_to_string(&settings.discon_file).unwrap().replace(
            "1.570800000000      ! PC_MaxPit",
            "1.5708005 ! PC_MaxPit",
        );
        write(file.path(), text).unwrap();

        let action = |tolerance| Action::Compare {
            left: settings.discon_file.clone(),
            right: file.path().to_path_buf(),
            tolerance,
        };

        let report = run(&action(None), &settings).unwrap();
        assert!(!report.is_success);
        assert_eq!(report.output, "PC_MaxPit: 1.5708 -> 1.5708005");

        assert!(run(&action(Some(1e-6)), &settings).unwrap().is_success);
    }
}
