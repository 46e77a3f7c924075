use chrono::NaiveDate;

use crate::{CoreError, CoreResult};

/// Airport code inputs are kept upper-case while typing.
pub fn normalize_airport_code(input: &str) -> String {
    input.to_uppercase()
}

pub fn validate_route(origin: &str, destination: &str) -> CoreResult<()> {
    if origin == destination {
        return Err(CoreError::ValidationError(
            "Origin and destination airports cannot be the same".to_string(),
        ));
    }
    Ok(())
}

/// Earliest selectable departure date, formatted for a date input.
pub fn min_departure_date(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}
