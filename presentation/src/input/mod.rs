//! Record collection from command-line values and JSON files

pub mod records;
