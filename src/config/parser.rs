use crate::config::types::ValidateOptions;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses an options file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML options file
///
/// # Returns
///
/// * `Ok(ValidateOptions)` - Successfully loaded and validated options
/// * `Err(ConfigError)` - Failed to load, parse, or validate the options
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitecheck::config::load_options;
///
/// let options = load_options(Path::new("sitecheck.toml")).unwrap();
/// println!("Max depth: {}", options.depth);
/// ```
pub fn load_options(path: &Path) -> Result<ValidateOptions, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let options: ValidateOptions = toml::from_str(&content)?;
    validate(&options)?;
    Ok(options)
}
