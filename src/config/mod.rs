//! Run options: types, TOML loading, and validation

mod parser;
mod types;
mod validation;

pub use parser::load_options;
pub use types::ValidateOptions;
pub use validation::validate;
