//! Text format of the controller parameter file.
pub mod parser;
pub mod writer;
