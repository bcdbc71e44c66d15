use log::info;
use std::fs::write;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::config::ConfigurationSet;
use crate::constants::{
    SECTION_HEADER_PREFIX, SECTION_HEADER_WIDTH, WIDTH_NAME_COLUMN, WIDTH_VALUE_COLUMN,
};
use crate::enums::Section;
use crate::error::LoadError;
use crate::record::ParameterRecord;
use crate::schema::parameters_in;

/// Write the configuration set in the text format of the parameter file.
///
/// # Arguments
/// * `configuration` - Configuration set.
/// * `title` - Name of the turbine used in the first comment line.
///
/// # Returns
/// Content of the parameter file.
pub fn write_configuration(configuration: &ConfigurationSet, title: &str) -> String {
    // The title has to stay on the first comment line.
    let title = title.replace(|c: char| c == '\n' || c == '\r', " ");

    let mut lines = vec![
        format!("! Controller parameter input file for the {title}"),
        format!(
            "!    - File written using {} version {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
    ];

    for section in Section::iter() {
        lines.push(String::new());
        lines.push(format_section_header(section));

        for spec in parameters_in(section) {
            if let Some(record) = configuration.get(spec.name) {
                lines.push(format_record(record));
            }
        }
    }

    let mut content = lines.join("\n");
    content.push('\n');

    content
}

/// Save the configuration set to a parameter file.
///
/// # Arguments
/// * `configuration` - Configuration set.
/// * `title` - Name of the turbine used in the first comment line.
/// * `filepath` - Path of the parameter file.
///
/// # Errors
/// IO error if the file can not be written.
pub fn save_configuration(
    configuration: &ConfigurationSet,
    title: &str,
    filepath: &Path,
) -> Result<(), LoadError> {
    write(filepath, write_configuration(configuration, title)).map_err(|source| {
        LoadError::Io {
            path: filepath.to_path_buf(),
            source,
        }
    })?;

    info!("Saved {} parameters to {:?}.", configuration.len(), filepath);

    Ok(())
}

/// Format the header line of a section.
///
/// # Arguments
/// * `section` - Section.
///
/// # Returns
/// Header line, e.g. "!------- DEBUG -----".
fn format_section_header(section: Section) -> String {
    let header = format!("{SECTION_HEADER_PREFIX} {} ", section.as_ref());
    let width = SECTION_HEADER_WIDTH.max(header.len());

    format!("{header:-<width$}")
}

/// Format a parameter line.
///
/// # Arguments
/// * `record` - Parameter record. The comment is written as it is.
///
/// # Returns
/// Parameter line.
fn format_record(record: &ParameterRecord) -> String {
    let line = format!(
        "{:<width_value$} ! {:<width_name$}",
        record.values.to_string(),
        record.name,
        width_value = WIDTH_VALUE_COLUMN - 1,
        width_name = WIDTH_NAME_COLUMN - 1,
    );

    if record.comment.is_empty() {
        String::from(line.trim_end())
    } else {
        format!("{line} - {}", record.comment)
    }
}
