pub mod archive;
pub mod file_ops;
pub mod reporting;
