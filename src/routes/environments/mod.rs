pub mod routes;

const MAX_ENVIRONMENT_NAME_LEN: usize = 128;

/// Environment names must be present and reasonably short.
pub fn validate_environment_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Environment name cannot be empty".to_string());
    }

    if name.len() > MAX_ENVIRONMENT_NAME_LEN {
        return Err(format!(
            "Environment name is too long (Max: {MAX_ENVIRONMENT_NAME_LEN} characters)"
        ));
    }

    Ok(())
}
