pub mod file;
pub mod location_table;
pub mod stdin;
