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

use log::{debug, info};
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use crate::config::ConfigurationSet;
use crate::error::LoadError;
use crate::format::parser::parse_lines;
use crate::record::{ParameterRecord, ParameterValue};
use crate::schema::{self, Arity};
use crate::validator::validate;

/// Source of the parameter file.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Path(&'a Path),
    Text(&'a str),
}

/// Load the controller parameters.
///
/// # Arguments
/// * `source` - Path of the parameter file or its content.
///
/// # Returns
/// Validated configuration set.
///
/// # Errors
/// IO error if the file can not be read, parse error for a malformed line,
/// and schema violation for an inconsistent set. No partial set is returned.
pub fn load(source: Source) -> Result<ConfigurationSet, LoadError> {
    let (configuration, origin) = match source {
        Source::Path(filepath) => {
            let text = read_to_string(filepath).map_err(|source| LoadError::Io {
                path: filepath.to_path_buf(),
                source,
            })?;

            (parse_configuration(&text)?, format!("{:?}", filepath))
        }
        Source::Text(text) => (parse_configuration(text)?, String::from("text")),
    };

    info!("Loaded {} parameters from {origin}.", configuration.len());

    Ok(configuration)
}

/// Parse and validate the content of a parameter file.
///
/// # Arguments
/// * `text` - Content of the parameter file.
///
/// # Returns
/// Validated configuration set.
///
/// # Errors
/// Parse error or schema violation.
pub fn parse_configuration(text: &str) -> Result<ConfigurationSet, LoadError> {
    let configuration = ConfigurationSet::new(parse_records(text)?);
    validate(&configuration)?;

    Ok(configuration)
}

/// Parse the content of a parameter file into typed records without the
/// cross-field validation.
///
/// # Arguments
/// * `text` - Content of the parameter file.
///
/// # Returns
/// Records in the file order.
///
/// # Errors
/// Parse error for an unknown or duplicated name, a token of the wrong kind,
/// or a wrong number of tokens of a fixed-size parameter.
pub fn parse_records(text: &str) -> Result<Vec<ParameterRecord>, LoadError> {
    let mut lines_seen: HashMap<&'static str, usize> = HashMap::new();
    let mut records = Vec::new();
    for raw in parse_lines(text)? {
        let spec = schema::find(&raw.name).ok_or_else(|| {
            LoadError::parse(raw.line, format!("unknown parameter {}", raw.name))
        })?;

        if let Some(line_first) = lines_seen.insert(spec.name, raw.line) {
            return Err(LoadError::parse(
                raw.line,
                format!("duplicated parameter {} (first at line {line_first})", spec.name),
            ));
        }

        let values = ParameterValue::from_tokens(spec.kind, &raw.tokens, raw.line)?;
        if let Arity::Fixed(arity) = spec.arity {
            if values.len() != arity {
                return Err(LoadError::parse(
                    raw.line,
                    format!(
                        "{} expects {arity} value(s), found {}",
                        spec.name,
                        values.len()
                    ),
                ));
            }
        }

        debug!("Line {}: {} = {values}", raw.line, spec.name);

        records.push(ParameterRecord {
            name: raw.name,
            values,
            comment: raw.comment,
        });
    }

    Ok(records)
}
