//! Canonical month and weekday vocabularies.
//!
//! Filter values and derived day-of-week fields are always expressed in
//! these lowercase names; every lookup is case-insensitive on input and
//! canonical on output.

/// The twelve month names in calendar order. Index + 1 is the month number.
pub const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// The seven weekday names in canonical monday-first order.
pub const DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Sentinel filter value meaning "no filter on this axis".
pub const ALL: &str = "all";

/// Resolve a month name to its 1-based calendar number.
///
/// Case-insensitive. Returns `None` for anything outside the vocabulary.
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .map(|i| (i + 1) as u32)
}

/// Resolve a 1-based month number to its canonical name.
pub fn month_name(number: u32) -> Option<&'static str> {
    if (1..=12).contains(&number) {
        Some(MONTHS[(number - 1) as usize])
    } else {
        None
    }
}

/// Resolve a weekday name to its position in the canonical monday-first
/// ordering (0–6). Case-insensitive.
pub fn day_position(name: &str) -> Option<usize> {
    let lower = name.to_lowercase();
    DAYS.iter().position(|d| *d == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_number_known_names() {
        assert_eq!(month_number("january"), Some(1));
        assert_eq!(month_number("march"), Some(3));
        assert_eq!(month_number("december"), Some(12));
    }

    #[test]
    fn test_month_number_case_insensitive() {
        assert_eq!(month_number("June"), Some(6));
        assert_eq!(month_number("FEBRUARY"), Some(2));
    }

    #[test]
    fn test_month_number_rejects_unknown() {
        assert_eq!(month_number("smarch"), None);
        assert_eq!(month_number(""), None);
        assert_eq!(month_number("all"), None);
    }

    #[test]
    fn test_month_name_round_trip() {
        for (i, name) in MONTHS.iter().enumerate() {
            let number = (i + 1) as u32;
            assert_eq!(month_number(name), Some(number));
            assert_eq!(month_name(number), Some(*name));
        }
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_day_position_canonical_order() {
        assert_eq!(day_position("monday"), Some(0));
        assert_eq!(day_position("Sunday"), Some(6));
        assert_eq!(day_position("funday"), None);
    }
}
