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

use num_traits::NumCast;
use serde::Serialize;
use std::fmt;

use crate::enums::ValueKind;
use crate::error::LoadError;
use crate::format::parser::Token;

/// Typed values of a parameter.
#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum ParameterValue {
    Integers(Vec<i64>),
    Floats(Vec<f64>),
    Text(String),
}

impl ParameterValue {
    /// Convert the tokens of a line to the typed values.
    ///
    /// # Arguments
    /// * `kind` - Kind of the parameter in the schema.
    /// * `tokens` - Tokens of the line.
    /// * `line` - 1-based line number used in the error.
    ///
    /// # Returns
    /// Typed values.
    ///
    /// # Errors
    /// Parse error if a token does not match the kind.
    pub fn from_tokens(kind: ValueKind, tokens: &[Token], line: usize) -> Result<Self, LoadError> {
        if tokens.is_empty() {
            return Err(LoadError::parse(line, "missing the value"));
        }

        match kind {
            ValueKind::Integer => tokens
                .iter()
                .map(|token| parse_integer(token, line))
                .collect::<Result<Vec<i64>, LoadError>>()
                .map(Self::Integers),
            ValueKind::Float => tokens
                .iter()
                .map(|token| parse_float(token, line))
                .collect::<Result<Vec<f64>, LoadError>>()
                .map(Self::Floats),
            ValueKind::Text => match tokens {
                [Token::Quoted(text)] => Ok(Self::Text(text.clone())),
                [Token::Bare(text)] => Err(LoadError::parse(
                    line,
                    format!("expected a double-quoted string, found {text}"),
                )),
                _ => Err(LoadError::parse(
                    line,
                    format!("expected 1 string, found {} tokens", tokens.len()),
                )),
            },
        }
    }

    /// Get the number of values. A string counts as one value.
    pub fn len(&self) -> usize {
        match self {
            Self::Integers(values) => values.len(),
            Self::Floats(values) => values.len(),
            Self::Text(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integers(_) => ValueKind::Integer,
            Self::Floats(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// View the numeric values as floats for uniform handling.
    ///
    /// # Returns
    /// Values. None for a string.
    pub fn as_f64s(&self) -> Option<Vec<f64>> {
        match self {
            Self::Integers(values) => Some(values.iter().map(|value| *value as f64).collect()),
            Self::Floats(values) => Some(values.clone()),
            Self::Text(_) => None,
        }
    }

    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            Self::Integers(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the tokens as written in the parameter file.
    ///
    /// # Returns
    /// Tokens. Floats use the shortest representation that reads back to the
    /// same value.
    pub fn to_tokens(&self) -> Vec<String> {
        match self {
            Self::Integers(values) => values.iter().map(|value| value.to_string()).collect(),
            Self::Floats(values) => values.iter().map(|value| format!("{value:?}")).collect(),
            Self::Text(text) => vec![format!("\"{text}\"")],
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tokens().join("  "))
    }
}

/// Parse an integer token.
fn parse_integer(token: &Token, line: usize) -> Result<i64, LoadError> {
    match token {
        Token::Bare(text) => text
            .parse::<i64>()
            .map_err(|_| LoadError::parse(line, format!("{text} should parse as an integer"))),
        Token::Quoted(text) => Err(LoadError::parse(
            line,
            format!("expected an integer, found the string \"{text}\""),
        )),
    }
}

/// Parse a float token. The Fortran exponent letter (1.0D-3) is accepted.
fn parse_float(token: &Token, line: usize) -> Result<f64, LoadError> {
    match token {
        Token::Bare(text) => {
            let value = text
                .replace(['d', 'D'], "e")
                .parse::<f64>()
                .map_err(|_| LoadError::parse(line, format!("{text} should parse as f64")))?;

            if value.is_finite() {
                Ok(value)
            } else {
                Err(LoadError::parse(line, format!("{text} is not a finite number")))
            }
        }
        Token::Quoted(text) => Err(LoadError::parse(
            line,
            format!("expected a number, found the string \"{text}\""),
        )),
    }
}

/// One named entry of the parameter file.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ParameterRecord {
    // Canonical name.
    pub name: String,
    pub values: ParameterValue,
    // Free text after the name in the comment. Not used by the validation.
    pub comment: String,
}

/// Trait for reading a typed value out of a record.
pub trait FromParameter: Sized {
    /// Read the value.
    ///
    /// # Arguments
    /// * `record` - Parameter record.
    ///
    /// # Returns
    /// The typed value.
    ///
    /// # Errors
    /// Schema violation if the record has another kind or number of values.
    fn from_record(record: &ParameterRecord) -> Result<Self, LoadError>;
}

/// Get the only value of a record.
fn single<T: Clone>(record: &ParameterRecord, values: &[T]) -> Result<T, LoadError> {
    match values {
        [value] => Ok(value.clone()),
        _ => Err(LoadError::schema_violation(
            &record.name,
            format!("expected 1 value, found {}", values.len()),
        )),
    }
}

fn mismatch(record: &ParameterRecord, expected: &str) -> LoadError {
    LoadError::schema_violation(
        &record.name,
        format!(
            "expected {expected}, found {}",
            record.values.kind().as_ref().to_lowercase()
        ),
    )
}

/// Convert an integer of the record to another integer type.
fn cast_integer<T: NumCast>(record: &ParameterRecord, value: i64) -> Result<T, LoadError> {
    num_traits::cast(value).ok_or_else(|| {
        LoadError::schema_violation(&record.name, format!("{value} is out of range"))
    })
}

impl FromParameter for f64 {
    fn from_record(record: &ParameterRecord) -> Result<Self, LoadError> {
        let values = record
            .values
            .as_f64s()
            .ok_or_else(|| mismatch(record, "a number"))?;

        single(record, &values)
    }
}

impl FromParameter for Vec<f64> {
    fn from_record(record: &ParameterRecord) -> Result<Self, LoadError> {
        record
            .values
            .as_f64s()
            .ok_or_else(|| mismatch(record, "numbers"))
    }
}

impl FromParameter for [f64; 2] {
    fn from_record(record: &ParameterRecord) -> Result<Self, LoadError> {
        let values: Vec<f64> = FromParameter::from_record(record)?;

        values.try_into().map_err(|values: Vec<f64>| {
            LoadError::schema_violation(
                &record.name,
                format!("expected 2 values, found {}", values.len()),
            )
        })
    }
}

impl FromParameter for String {
    fn from_record(record: &ParameterRecord) -> Result<Self, LoadError> {
        record
            .values
            .as_text()
            .map(String::from)
            .ok_or_else(|| mismatch(record, "text"))
    }
}

macro_rules! impl_from_parameter_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl FromParameter for $integer {
                fn from_record(record: &ParameterRecord) -> Result<Self, LoadError> {
                    let values = record
                        .values
                        .as_integers()
                        .ok_or_else(|| mismatch(record, "an integer"))?;

                    cast_integer(record, single(record, values)?)
                }
            }

            impl FromParameter for Vec<$integer> {
                fn from_record(record: &ParameterRecord) -> Result<Self, LoadError> {
                    record
                        .values
                        .as_integers()
                        .ok_or_else(|| mismatch(record, "integers"))?
                        .iter()
                        .map(|value| cast_integer(record, *value))
                        .collect()
                }
            }
        )*
    };
}

impl_from_parameter_integer!(i32, i64, u32, usize);
