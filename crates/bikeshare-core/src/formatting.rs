//! Display helpers for the report printer.

/// Uppercase the first letter of each whitespace-separated word.
///
/// Mirrors how city, month and day names are shown to the user while the
/// canonical forms stay lowercase internally.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::title_case;
///
/// assert_eq!(title_case("new york city"), "New York City");
/// assert_eq!(title_case("monday"), "Monday");
/// assert_eq!(title_case(""), "");
/// ```
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(987), "987");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a duration given in seconds as a compact `h`/`m`/`s` string.
///
/// Sub-minute durations show seconds only; sub-hour durations show minutes
/// and seconds; anything longer shows all three. Fractional seconds are
/// rounded.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_seconds;
///
/// assert_eq!(format_seconds(42.0), "42s");
/// assert_eq!(format_seconds(120.0), "2m 0s");
/// assert_eq!(format_seconds(3725.0), "1h 2m 5s");
/// assert_eq!(format_seconds(0.4), "0s");
/// ```
pub fn format_seconds(seconds: f64) -> String {
    let total = seconds.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_single_word() {
        assert_eq!(title_case("chicago"), "Chicago");
    }

    #[test]
    fn test_title_case_collapses_extra_whitespace() {
        assert_eq!(title_case("  new   york "), "New York");
    }

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(10_000), "10,000");
        assert_eq!(format_count(100_000), "100,000");
    }

    #[test]
    fn test_format_seconds_rounding() {
        assert_eq!(format_seconds(59.6), "1m 0s");
        assert_eq!(format_seconds(3599.5), "1h 0m 0s");
    }

    #[test]
    fn test_format_seconds_large_total() {
        // A city-wide duration total: 280,871,787 seconds.
        assert_eq!(format_seconds(280_871_787.0), "78019h 56m 27s");
    }
}
