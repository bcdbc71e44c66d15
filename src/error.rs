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

use std::path::PathBuf;
use thiserror::Error;

/// An error that occurs during the loading of a parameter file. Any error is
/// fatal: no partial configuration is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read the parameter file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Schema violation of {field}: {message}")]
    SchemaViolation { field: String, message: String },
}

impl LoadError {
    /// Create a parse error.
    ///
    /// # Arguments
    /// * `line` - 1-based line number.
    /// * `message` - Description of the error.
    ///
    /// # Returns
    /// Parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a schema violation.
    ///
    /// # Arguments
    /// * `field` - Name of the offending field.
    /// * `message` - Description of the error.
    ///
    /// # Returns
    /// Schema violation.
    pub fn schema_violation(field: &str, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: String::from(field),
            message: message.into(),
        }
    }

    /// The error is a schema violation or not.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation { .. })
    }

    /// The error is a parse error or not.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// An error that occurs during the reading of the application settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot read the settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// An error that occurs when the command-line tool runs an action.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Cannot serialize the configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
