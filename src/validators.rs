/// Input validators
/// - Email: length limits and RFC 5322 simplified format
/// - Chirp body: length limit and profanity masking

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
pub const MAX_CHIRP_LENGTH: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const MASK: &str = "****";

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email regex is valid");
}

/// Validates and normalises (trims) an email address
pub fn is_valid_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("email".to_string()));
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email".to_string(), MAX_EMAIL_LENGTH));
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("email".to_string()));
    }

    Ok(trimmed.to_string())
}

/// Rejects empty passwords; strength is left to the client
pub fn is_valid_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyField("password".to_string()));
    }
    Ok(())
}

/// Validates a chirp body and masks profane words
///
/// Length is counted in characters. Words are split on single spaces and
/// compared case-insensitively, so `"Kerfuffle!"` is left alone.
pub fn clean_chirp(body: &str) -> Result<String, ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyField("chirp".to_string()));
    }

    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong("chirp".to_string(), MAX_CHIRP_LENGTH));
    }

    let cleaned = body
        .split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert_eq!(is_valid_email("walt@breakingbad.com").unwrap(), "walt@breakingbad.com");
        assert_eq!(is_valid_email("  saul@bcs.com ").unwrap(), "saul@bcs.com");
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "   ", "notanemail", "user@", "@example.com", "user@@example.com"] {
            assert!(is_valid_email(email).is_err(), "accepted {:?}", email);
        }
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            is_valid_email(&email),
            Err(ValidationError::TooLong(_, MAX_EMAIL_LENGTH))
        ));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(is_valid_password("").is_err());
        assert!(is_valid_password("secret123").is_ok());
    }

    #[test]
    fn test_clean_chirp_masks_profanity() {
        let cleaned = clean_chirp("I had something interesting for breakfast Kerfuffle sharbert").unwrap();
        assert_eq!(cleaned, "I had something interesting for breakfast **** ****");
    }

    #[test]
    fn test_clean_chirp_keeps_punctuated_words() {
        let cleaned = clean_chirp("Sharbert! is fine").unwrap();
        assert_eq!(cleaned, "Sharbert! is fine");
    }

    #[test]
    fn test_chirp_length_limit() {
        let at_limit = "a".repeat(MAX_CHIRP_LENGTH);
        assert!(clean_chirp(&at_limit).is_ok());

        let too_long = "a".repeat(MAX_CHIRP_LENGTH + 1);
        assert!(matches!(
            clean_chirp(&too_long),
            Err(ValidationError::TooLong(_, MAX_CHIRP_LENGTH))
        ));
    }

    #[test]
    fn test_chirp_length_counts_characters() {
        let accented = "é".repeat(MAX_CHIRP_LENGTH);
        assert!(clean_chirp(&accented).is_ok());
    }

    #[test]
    fn test_empty_chirp_rejected() {
        assert!(clean_chirp("").is_err());
        assert!(clean_chirp("   ").is_err());
    }
}
