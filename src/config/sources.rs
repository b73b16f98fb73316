//! Settings sources, lowest precedence first: global file, explicit settings file.

pub mod global_file;
pub mod settings_file;
