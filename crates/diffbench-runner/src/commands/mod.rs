pub mod sweep;
pub mod write_input;
