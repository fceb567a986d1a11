//! Centralized display formatting for overlay text.
//!
//! Every string the overlay shows for numbers, clocks and percentages goes
//! through this module so labels stay consistent and honor the
//! European number format setting (swapping `.` and `,`).

/// Glyph shown by the turn timer when the turn has no time limit.
pub const INFINITY_GLYPH: &str = "\u{221E}";

/// Apply European number format by swapping `.` and `,` in a formatted string.
fn europeanize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '.' => result.push(','),
            ',' => result.push('.'),
            _ => result.push(c),
        }
    }
    result
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Two-digit field as produced by a `00` numeric format: zero padded, with
/// a leading minus for negative values (`-5` -> `-05`).
fn two_digits(n: i64) -> String {
    if n < 0 {
        format!("-{:02}", n.unsigned_abs())
    } else {
        format!("{:02}", n)
    }
}

/// Format a second count as a zero-padded `MM:SS` clock.
///
/// Minutes wrap at one hour. Negative inputs are kept signed per field,
/// so callers that want a magnitude must pass the absolute value.
///
/// # Examples
/// ```
/// use hdt_types::formatting::format_clock;
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(75), "01:15");
/// assert_eq!(format_clock(3_605), "00:05");
/// assert_eq!(format_clock(-5), "00:-05");
/// ```
pub fn format_clock(secs: i64) -> String {
    format!("{}:{}", two_digits(secs / 60 % 60), two_digits(secs % 60))
}

/// Format a percentage value with 1 decimal place.
///
/// # Examples
/// ```
/// use hdt_types::formatting::format_pct;
/// assert_eq!(format_pct(42.7, false), "42.7%");
/// assert_eq!(format_pct(42.7, true), "42,7%");
/// ```
pub fn format_pct(n: f64, european: bool) -> String {
    maybe_eu(format!("{:.1}%", n), european)
}

/// Format a percentage from count/total.
///
/// Returns `"0%"` if total is zero.
///
/// # Examples
/// ```
/// use hdt_types::formatting::format_pct_ratio;
/// assert_eq!(format_pct_ratio(3, 10, false), "30.0%");
/// assert_eq!(format_pct_ratio(0, 0, false), "0%");
/// ```
pub fn format_pct_ratio(count: i64, total: i64, european: bool) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format_pct(count as f64 / total as f64 * 100.0, european)
}

/// Chance in percent of drawing one specific card copy out of `deck_count`
/// cards when drawing `draws` cards. An empty deck reads `0%`.
///
/// # Examples
/// ```
/// use hdt_types::formatting::format_draw_chance;
/// assert_eq!(format_draw_chance(1, 30, false), "3.3%");
/// assert_eq!(format_draw_chance(2, 30, false), "6.7%");
/// assert_eq!(format_draw_chance(1, 0, false), "0%");
/// ```
pub fn format_draw_chance(draws: i32, deck_count: i32, european: bool) -> String {
    if deck_count <= 0 {
        return "0%".to_string();
    }
    let chance = (100.0 * draws as f64 / deck_count as f64).min(100.0);
    format_pct(chance, european)
}

/// Win/loss record with win rate, e.g. `"7 - 3 (70.0%)"`.
///
/// # Examples
/// ```
/// use hdt_types::formatting::format_record;
/// assert_eq!(format_record(7, 3, false), "7 - 3 (70.0%)");
/// assert_eq!(format_record(0, 0, false), "0 - 0 (0%)");
/// ```
pub fn format_record(wins: u32, losses: u32, european: bool) -> String {
    let total = i64::from(wins) + i64::from(losses);
    format!(
        "{} - {} ({})",
        wins,
        losses,
        format_pct_ratio(i64::from(wins), total, european)
    )
}

/// Join at most `max` names with `", "`, appending `", ..."` when more
/// names were left out.
///
/// # Examples
/// ```
/// use hdt_types::formatting::join_truncated;
/// let names = ["A", "B", "C", "D"];
/// assert_eq!(join_truncated(&names, 3), "A, B, C, ...");
/// assert_eq!(join_truncated(&names[..2], 3), "A, B");
/// ```
pub fn join_truncated<S: AsRef<str>>(names: &[S], max: usize) -> String {
    let mut text = names
        .iter()
        .take(max)
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > max {
        text.push_str(", ...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(754), "12:34");
        assert_eq!(format_clock(3_600), "00:00");
    }

    #[test]
    fn test_format_clock_negative_fields() {
        assert_eq!(format_clock(-5), "00:-05");
        assert_eq!(format_clock(-65), "-01:-05");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(42.7, false), "42.7%");
        assert_eq!(format_pct(42.7, true), "42,7%");
        assert_eq!(format_pct(100.0, false), "100.0%");
    }

    #[test]
    fn test_format_draw_chance() {
        assert_eq!(format_draw_chance(1, 10, false), "10.0%");
        assert_eq!(format_draw_chance(2, 10, true), "20,0%");
        assert_eq!(format_draw_chance(2, 1, false), "100.0%");
        assert_eq!(format_draw_chance(1, -3, false), "0%");
    }

    #[test]
    fn test_format_record() {
        assert_eq!(format_record(1, 3, false), "1 - 3 (25.0%)");
        assert_eq!(format_record(2, 1, true), "2 - 1 (66,7%)");
    }

    #[test]
    fn test_join_truncated() {
        let empty: [&str; 0] = [];
        assert_eq!(join_truncated(&empty, 3), "");
        assert_eq!(join_truncated(&["Alpha", "Beta", "Gamma"], 3), "Alpha, Beta, Gamma");
        assert_eq!(
            join_truncated(&["Alpha", "Beta", "Gamma", "Delta", "Eps"], 3),
            "Alpha, Beta, Gamma, ..."
        );
    }

    #[test]
    fn test_europeanize() {
        assert_eq!(europeanize("42.7%"), "42,7%");
        assert_eq!(europeanize("1,500"), "1.500");
        assert_eq!(europeanize("500"), "500");
    }
}
