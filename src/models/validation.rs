use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    MalformedBody,

    #[error("No data")]
    EmptyPayload,

    #[error("Contact is required")]
    MissingContact,
}

/// Trims the contact and rejects it when nothing is left.
pub fn validate_contact(contact: &str) -> Result<String, ValidationError> {
    let contact = contact.trim();

    if contact.is_empty() {
        return Err(ValidationError::MissingContact);
    }

    Ok(contact.to_string())
}
