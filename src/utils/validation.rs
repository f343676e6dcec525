//! Centralized validation and helper functions.

/// Maximum length of a reference name passed to the aligner
pub const MAX_REFERENCE_NAME_LENGTH: usize = 255;

/// Validate that a sequence uses only A/C/G/T/N, in either case.
///
/// # Examples
///
/// ```
/// use libguess::utils::validation::is_valid_residues;
///
/// assert!(is_valid_residues(b"ACGTNacgtn"));
/// assert!(!is_valid_residues(b"ACGU"));
/// assert!(is_valid_residues(b""));
/// ```
#[must_use]
pub fn is_valid_residues(sequence: &[u8]) -> bool {
    sequence
        .iter()
        .all(|b| matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'N'))
}

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Reference name too long: exceeds {MAX_REFERENCE_NAME_LENGTH} characters")]
    ReferenceNameTooLong,
    #[error("Invalid reference name '{0}': contains path traversal or invalid characters")]
    InvalidReferenceName(String),
    #[error("Empty reference name provided")]
    EmptyReferenceName,
}

/// Validate a reference name before it is resolved inside the reference directory.
///
/// The name must be a bare file name: no path separators, no `..`, and no
/// control characters.
///
/// # Errors
///
/// Returns `ValidationError::EmptyReferenceName` if the name is empty,
/// `ValidationError::ReferenceNameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidReferenceName` if it could escape the directory.
pub fn validate_reference_name(name: &str) -> Result<&str, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyReferenceName);
    }

    if name.len() > MAX_REFERENCE_NAME_LENGTH {
        return Err(ValidationError::ReferenceNameTooLong);
    }

    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ValidationError::InvalidReferenceName(name.to_string()));
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidReferenceName(name.escape_default().to_string()));
    }

    Ok(name)
}
