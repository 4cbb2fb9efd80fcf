use crate::config::types::ValidateOptions;
use crate::ConfigError;

/// Validates loaded options before a run starts
///
/// The worker pool clamps its limit defensively as well, but a zero
/// concurrency in an options file is almost certainly a mistake, so it is
/// rejected here with a message naming the field.
pub fn validate(options: &ValidateOptions) -> Result<(), ConfigError> {
    if options.concurrency == 0 {
        return Err(ConfigError::Validation(
            "concurrency must be at least 1".to_string(),
        ));
    }

    if options.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    if options.exclude.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::Validation(
            "exclude entries must not be empty strings".to_string(),
        ));
    }

    Ok(())
}
