use crate::errors::ModelError;

/// Upper bound matching the `string_len(.., 128)` columns.
pub const NAME_MAX_LEN: usize = 128;

/// Card and product names: non-blank, at most [`NAME_MAX_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("name longer than {} characters", NAME_MAX_LEN)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn length_is_counted_in_chars() {
        assert!(validate_name(&"é".repeat(NAME_MAX_LEN)).is_ok());
        assert!(validate_name(&"a".repeat(NAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn regular_names_pass() {
        assert!(validate_name("Gold").is_ok());
    }
}
