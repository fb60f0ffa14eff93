use validator::ValidationError;

pub fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

pub fn validate_owner_id(owner_id: &str) -> Result<(), ValidationError> {
    validate_not_blank(owner_id)?;

    if owner_id.chars().any(|c| c.is_control()) {
        return Err(ValidationError::new("owner_id_control_chars"));
    }

    Ok(())
}
