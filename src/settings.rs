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

use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::utility::{get_config, get_parameter};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // Default controller parameter file.
    pub discon_file: PathBuf,
    // Log file of the command-line tool.
    pub log_file: PathBuf,
    // Absolute tolerance used when comparing two parameter files.
    pub compare_tolerance: f64,
}

impl Settings {
    /// Create a new Settings object.
    ///
    /// # Arguments
    /// * `filepath` - Path of the settings file.
    ///
    /// # Returns
    /// A new Settings object.
    ///
    /// # Errors
    /// If the file can not be read, a key is missing, or the tolerance is
    /// negative.
    pub fn new(filepath: &Path) -> Result<Self, SettingsError> {
        let config = get_config(filepath)?;

        let compare_tolerance: f64 = get_parameter(&config, "compare_tolerance")?;
        if compare_tolerance < 0.0 {
            return Err(SettingsError::InvalidValue {
                key: String::from("compare_tolerance"),
                message: format!("{compare_tolerance} should not be negative"),
            });
        }

        Ok(Self {
            discon_file: get_parameter(&config, "discon_file")?,
            log_file: get_parameter(&config, "log_file")?,
            compare_tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::EPSILON;
    use std::io::Write;
    use tempfile::Builder;

    fn write_settings(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        file
    }

    #[test]
    fn test_new() {
        let settings = Settings::new(Path::new("config/parameters_app.yaml")).unwrap();

        assert_eq!(settings.discon_file, PathBuf::from("config/DISCON.IN"));
        assert_eq!(settings.log_file, PathBuf::from("discon_tool.log"));
        assert_relative_eq!(settings.compare_tolerance, 1e-9, epsilon = EPSILON);
    }

    #[test]
    fn test_new_missing_file() {
        assert!(Settings::new(Path::new("config/wrong.yaml")).is_err());
    }

    #[test]
    fn test_new_missing_key() {
        let file = write_settings("discon_file: DISCON.IN\ncompare_tolerance: 0.1\n");

        assert!(matches!(
            Settings::new(file.path()),
            Err(SettingsError::Config(_))
        ));
    }

    #[test]
    fn test_new_negative_tolerance() {
        let file = write_settings(
            "discon_file: DISCON.IN\nlog_file: tool.log\ncompare_tolerance: -0.1\n",
        );

        match Settings::new(file.path()) {
            Err(SettingsError::InvalidValue { key, .. }) => assert_eq!(key, "compare_tolerance"),
            result => panic!("Unexpected result: {:?}", result),
        }
    }
}
