//! Time-window parameters for the distinct-user incident stats.

use crate::error::CoreError;

/// Window used when the caller does not supply one.
pub const DEFAULT_TIME_WINDOW_MINUTES: i64 = 30;

/// Upper bound on the window (ten years); keeps timestamp arithmetic in range.
pub const MAX_TIME_WINDOW_MINUTES: i64 = 10 * 365 * 24 * 60;

/// Parse the raw `time_window` query value.
///
/// A missing value yields [`DEFAULT_TIME_WINDOW_MINUTES`]. Anything that is
/// not a non-negative integer no larger than [`MAX_TIME_WINDOW_MINUTES`] is
/// a validation error.
pub fn parse_time_window(raw: Option<&str>) -> Result<i64, CoreError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TIME_WINDOW_MINUTES);
    };
    let minutes: i64 = raw.trim().parse().map_err(|_| {
        CoreError::Validation(format!("time_window must be an integer, got '{raw}'"))
    })?;
    validate_time_window(minutes)?;
    Ok(minutes)
}

/// Check that a window in minutes is within `[0, MAX_TIME_WINDOW_MINUTES]`.
pub fn validate_time_window(minutes: i64) -> Result<(), CoreError> {
    if !(0..=MAX_TIME_WINDOW_MINUTES).contains(&minutes) {
        return Err(CoreError::Validation(format!(
            "time_window must be between 0 and {MAX_TIME_WINDOW_MINUTES} minutes, got {minutes}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_window_uses_default() {
        assert_eq!(parse_time_window(None).unwrap(), DEFAULT_TIME_WINDOW_MINUTES);
    }

    #[test]
    fn zero_and_positive_windows_parse() {
        assert_eq!(parse_time_window(Some("0")).unwrap(), 0);
        assert_eq!(parse_time_window(Some(" 45 ")).unwrap(), 45);
    }

    #[test]
    fn negative_window_is_rejected() {
        assert!(matches!(
            parse_time_window(Some("-1")),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn non_integer_window_is_rejected() {
        assert!(parse_time_window(Some("abc")).is_err());
        assert!(parse_time_window(Some("1.5")).is_err());
    }

    #[test]
    fn oversized_window_is_rejected() {
        assert!(validate_time_window(MAX_TIME_WINDOW_MINUTES).is_ok());
        assert!(validate_time_window(MAX_TIME_WINDOW_MINUTES + 1).is_err());
    }
}
