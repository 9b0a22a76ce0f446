//! Seat-capacity bounds of a placed table.

use crate::error::CoreError;

/// Most guests a single placed table may seat.
pub const MAX_TABLE_SEATS: i32 = 1000;

/// Resolve the capacity pair written for a table.
///
/// Reservable tables seat at least one guest; `min` defaults to 1 and `max`
/// to `min`. Decorative elements may seat nobody, so their `min` defaults to 0.
pub fn resolve(reservable: bool, min: Option<i32>, max: Option<i32>) -> Result<(i32, i32), CoreError> {
    let floor = if reservable { 1 } else { 0 };
    let min = min.unwrap_or(floor);
    let max = max.unwrap_or(min);

    if min < floor {
        return Err(CoreError::invalid(format!(
            "Minimum capacity must be at least {floor}, got {min}"
        )));
    }
    if min > max {
        return Err(CoreError::invalid(format!(
            "Minimum capacity {min} exceeds maximum capacity {max}"
        )));
    }
    if max > MAX_TABLE_SEATS {
        return Err(CoreError::invalid(format!(
            "Maximum capacity {max} exceeds the {MAX_TABLE_SEATS}-seat limit"
        )));
    }
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn reservable_defaults_to_one_seat() {
        assert_eq!(resolve(true, None, None).unwrap(), (1, 1));
    }

    #[test]
    fn max_defaults_to_min() {
        assert_eq!(resolve(true, Some(4), None).unwrap(), (4, 4));
    }

    #[test]
    fn reservable_zero_rejected() {
        let err = resolve(true, Some(0), Some(2)).unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(msg) if msg.contains("at least 1"));
    }

    #[test]
    fn decorative_may_seat_nobody() {
        assert_eq!(resolve(false, None, None).unwrap(), (0, 0));
    }

    #[test]
    fn inverted_bounds_rejected() {
        assert!(resolve(true, Some(6), Some(4)).is_err());
        assert!(resolve(false, Some(3), Some(1)).is_err());
    }

    #[test]
    fn capacity_above_seat_limit_rejected() {
        let err = resolve(true, Some(2), Some(MAX_TABLE_SEATS + 1)).unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(msg) if msg.contains("limit"));
        assert!(resolve(true, Some(2), Some(MAX_TABLE_SEATS)).is_ok());
    }
}
