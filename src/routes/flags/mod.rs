pub mod routes;

use serde::{Deserialize, Serialize};

// MODELS

#[derive(Debug, Default, Deserialize)]
pub struct EvaluateQuery {
    pub environment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteFlagResponse {
    pub message: String,
}

// HELPER FUNCTIONS

const MAX_FLAG_KEY_LEN: usize = 64;

/// Validating the flag key
pub fn validate_flag_key(key: &str) -> Result<(), String> {
    let Some(first) = key.chars().next() else {
        return Err("Flag key cannot be empty".to_string());
    };

    if key.len() > MAX_FLAG_KEY_LEN {
        return Err(format!("Flag key is too long (Max: {MAX_FLAG_KEY_LEN} characters)"));
    }

    if !first.is_ascii_alphabetic() {
        return Err("Flag key must start with a letter".to_string());
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(
            "Flag key can only contain lowercase letters, numbers, underscores and hyphens"
                .to_string(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_flag_key() {
        assert!(validate_flag_key("new-checkout").is_ok());
        assert!(validate_flag_key("discount_percentage2").is_ok());

        assert!(validate_flag_key("").is_err());
        assert!(validate_flag_key("1st-flag").is_err());
        assert!(validate_flag_key("New-Checkout").is_err());
        assert!(validate_flag_key("new checkout").is_err());
        assert!(validate_flag_key(&"a".repeat(65)).is_err());
        assert!(validate_flag_key(&"a".repeat(64)).is_ok());
    }
}
