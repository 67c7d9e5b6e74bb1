/// Payload checks shared by the handlers
use crate::error::{Result, ServerError};
use chrono::Datelike;

pub const MAX_NAME_LEN: usize = 1000;
pub const MAX_PLAYLIST_NAME_LEN: usize = 50;
pub const MAX_ID_LEN: usize = 50;
pub const MIN_YEAR: i32 = 1900;

/// Non-blank and at most `max` characters
pub fn require_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServerError::invalid_input(format!("\"{field}\" is required")));
    }
    if value.chars().count() > max {
        return Err(ServerError::invalid_input(format!(
            "\"{field}\" must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Between 1900 and the current year
pub fn require_year(year: i32) -> Result<()> {
    let current = chrono::Utc::now().year();
    if !(MIN_YEAR..=current).contains(&year) {
        return Err(ServerError::invalid_input(format!(
            "\"year\" must be between {MIN_YEAR} and {current}"
        )));
    }
    Ok(())
}

/// One `@` with a non-empty local part and a dotted domain
pub fn require_email(field: &str, value: &str) -> Result<()> {
    let plausible = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && !value.contains(char::is_whitespace)
                && domain
                    .split('.')
                    .filter(|part| !part.is_empty())
                    .count()
                    >= 2
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });

    if plausible {
        Ok(())
    } else {
        Err(ServerError::invalid_input(format!(
            "\"{field}\" must be a valid email"
        )))
    }
}
