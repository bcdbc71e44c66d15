// Delimiter that starts the comment of a parameter line.
pub const COMMENT_DELIMITER: char = '!';
pub const QUOTE: char = '"';

// Comment-only lines that begin with this prefix are section headers.
pub const SECTION_HEADER_PREFIX: &str = "!-------";
// Total width of a section header line written by the writer.
pub const SECTION_HEADER_WIDTH: usize = 76;

// Column widths of the value and name fields in a written parameter line.
pub const WIDTH_VALUE_COLUMN: usize = 20;
pub const WIDTH_NAME_COLUMN: usize = 18;

// Name of the turbine in the first line of a written file.
pub const DEFAULT_TITLE: &str = "wind turbine";
pub const FILEPATH_PARAMETERS_APP: &str = "config/parameters_app.yaml";
