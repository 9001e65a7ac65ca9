//! Postman environment parsing and filtering

pub mod merger;
pub mod parser;

pub use merger::compute_accepted_parameters;
pub use parser::load_environment_file;
