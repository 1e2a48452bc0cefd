//! Field validation helpers shared by the league entities

use chrono::NaiveDate;
use touchline_common::{Error, Result};
use validator::Validate;

/// Maximum length of display names (competitions, teams)
pub const MAX_NAME_LENGTH: u64 = 100;

/// Run derived `validator` rules and lift failures into a validation error
pub fn validate_input<T: Validate>(input: &T) -> Result<()> {
    input.validate().map_err(|e| {
        tracing::debug!(error = %e, "Input validation failed");
        Error::Validation(format!("Validation failed: {}", e))
    })
}

/// Check that competition dates are consistent when present
///
/// The end date may not precede the start date, and registration must close
/// no later than the start date.
pub fn validate_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    registration_deadline: Option<NaiveDate>,
) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(Error::Validation(
                "End date cannot be before start date".to_string(),
            ));
        }
    }

    if let (Some(start), Some(deadline)) = (start, registration_deadline) {
        if deadline > start {
            return Err(Error::Validation(
                "Registration deadline cannot be after start date".to_string(),
            ));
        }
    }

    Ok(())
}

/// Reject blank strings that pass length checks, e.g. "   "
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} cannot be blank", field)));
    }
    Ok(())
}
