pub mod duplicate;
pub mod naming;
