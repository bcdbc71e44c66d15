use approx::assert_relative_eq;
use config::Config;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Trait for parsing the setting value.
///
/// # Parameters
/// * `Self` - Type of the setting value.
pub trait SettingValue: Sized {
    /// Parse the setting value.
    ///
    /// # Parameters
    /// * `s` - String to parse.
    ///
    /// # Returns
    /// The parsed setting value. None if the string can not be parsed.
    fn parse_value(s: &str) -> Option<Self>;
}

impl SettingValue for String {
    fn parse_value(s: &str) -> Option<Self> {
        Some(s.to_string())
    }
}

impl SettingValue for PathBuf {
    fn parse_value(s: &str) -> Option<Self> {
        if s.is_empty() {
            None
        } else {
            Some(PathBuf::from(s))
        }
    }
}

impl SettingValue for f64 {
    fn parse_value(s: &str) -> Option<Self> {
        s.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

impl SettingValue for bool {
    fn parse_value(s: &str) -> Option<Self> {
        s.parse::<bool>().ok()
    }
}

/// Get the settings from the file.
///
/// # Parameters
/// * `filepath` - Path to the settings file.
///
/// # Returns
/// The settings.
///
/// # Errors
/// If the file can not be found or read.
pub fn get_config(filepath: &Path) -> Result<Config, SettingsError> {
    let name = filepath.to_str().ok_or_else(|| SettingsError::InvalidValue {
        key: String::from("filepath"),
        message: format!("{:?} is not a valid unicode path", filepath),
    })?;

    Ok(Config::builder()
        .add_source(config::File::with_name(name))
        .build()?)
}

/// Get the parameter from the settings.
///
/// # Parameters
/// * `config` - Settings.
/// * `key` - Key to find the parameter in the settings.
///
/// # Returns
/// The parameter.
///
/// # Errors
/// If the key is not found or the value can not be parsed.
pub fn get_parameter<T: SettingValue>(config: &Config, key: &str) -> Result<T, SettingsError> {
    let value = config.get_string(key)?;

    T::parse_value(&value).ok_or_else(|| SettingsError::InvalidValue {
        key: String::from(key),
        message: format!("can not parse {value:?}"),
    })
}

/// Assert that two vectors are equal within a relative tolerance.
///
/// # Parameters
/// * `v1` - First vector.
/// * `v2` - Second vector.
/// * `epsilon` - Relative tolerance.
///
/// # Panics
/// If the two vectors are not equal within the relative tolerance.
pub fn assert_relative_eq_vector(v1: &[f64], v2: &[f64], epsilon: f64) {
    assert_eq!(v1.len(), v2.len());
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_relative_eq!(a, b, epsilon = epsilon);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::EPSILON;

    use super::*;

    const FILEPATH: &str = "config/parameters_app.yaml";

    #[test]
    fn test_get_config() {
        let compare_tolerance = get_config(Path::new(FILEPATH))
            .unwrap()
            .get_float("compare_tolerance")
            .unwrap();

        assert_relative_eq!(compare_tolerance, 1e-9, epsilon = EPSILON);
    }

    #[test]
    fn test_get_config_error() {
        assert!(matches!(
            get_config(Path::new("wrong.yaml")),
            Err(SettingsError::Config(_))
        ));
    }

    #[test]
    fn test_get_parameter() {
        let config = get_config(Path::new(FILEPATH)).unwrap();

        let discon_file: PathBuf = get_parameter(&config, "discon_file").unwrap();
        assert_eq!(discon_file, PathBuf::from("config/DISCON.IN"));

        let log_file: String = get_parameter(&config, "log_file").unwrap();
        assert_eq!(log_file, "discon_tool.log");

        let compare_tolerance: f64 = get_parameter(&config, "compare_tolerance").unwrap();
        assert_relative_eq!(compare_tolerance, 1e-9, epsilon = EPSILON);
    }

    #[test]
    fn test_get_parameter_error() {
        let config = get_config(Path::new(FILEPATH)).unwrap();

        assert!(matches!(
            get_parameter::<String>(&config, "wrong_key"),
            Err(SettingsError::Config(_))
        ));

        match get_parameter::<bool>(&config, "log_file") {
            Err(SettingsError::InvalidValue { key, .. }) => assert_eq!(key, "log_file"),
            result => panic!("Unexpected result: {:?}", result),
        }
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(f64::parse_value("1.0e-9"), Some(1e-9));
        assert_eq!(f64::parse_value("inf"), None);
        assert_eq!(bool::parse_value("true"), Some(true));
        assert_eq!(PathBuf::parse_value(""), None);
    }

    #[test]
    fn test_assert_relative_eq_vector() {
        assert_relative_eq_vector(&vec![1.0, 2.0, 3.0], &vec![1.0, 2.0, 3.0], EPSILON);
    }

    #[test]
    #[should_panic(expected = "`left == right` failed")]
    fn test_assert_relative_eq_vector_panic() {
        assert_relative_eq_vector(&vec![0.0, 0.0], &vec![0.0, 1.0, 0.0], EPSILON);
    }
}
