pub mod memory;
pub mod text_file;
