//! Summary counter percentage annotation
//!
//! The results page renders four counters (total plus high/medium/low)
//! as text with a leading integer. Percentages are derived from the
//! counts at render time, never stored.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading integer of a rendered counter, e.g. "12 clauses"
    static ref LEADING_COUNT: Regex = Regex::new(r"^\s*(\d+)").unwrap();
}

/// Parse the leading integer from a rendered counter's text
pub fn parse_leading_count(text: &str) -> Option<u32> {
    LEADING_COUNT
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Markup for a risk-level counter with its share of the total appended,
/// e.g. `3 <span class="percent">(30.0%)</span>`. None when the total is
/// zero, leaving the counter as rendered.
pub fn counter_markup(count: u32, total: u32) -> Option<String> {
    if total == 0 {
        return None;
    }
    let percent = count as f64 / total as f64 * 100.0;
    Some(format!(
        "{} <span class=\"percent\">({:.1}%)</span>",
        count, percent
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_leading_count("12 clauses"), Some(12));
        assert_eq!(parse_leading_count("  7"), Some(7));
        assert_eq!(parse_leading_count("0"), Some(0));
        assert_eq!(parse_leading_count("3 (30.0%)"), Some(3));
    }

    #[test]
    fn rejects_text_without_leading_integer() {
        assert_eq!(parse_leading_count("clauses: 12"), None);
        assert_eq!(parse_leading_count(""), None);
        assert_eq!(parse_leading_count("high risk"), None);
    }

    #[test]
    fn counter_markup_appends_share_of_total() {
        assert_eq!(
            counter_markup(3, 10).as_deref(),
            Some("3 <span class=\"percent\">(30.0%)</span>")
        );
        assert_eq!(
            counter_markup(5, 10).as_deref(),
            Some("5 <span class=\"percent\">(50.0%)</span>")
        );
        assert_eq!(
            counter_markup(2, 10).as_deref(),
            Some("2 <span class=\"percent\">(20.0%)</span>")
        );
    }

    #[test]
    fn zero_total_yields_no_markup() {
        assert_eq!(counter_markup(3, 0), None);
        assert_eq!(counter_markup(0, 0), None);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        assert_eq!(
            counter_markup(1, 3).as_deref(),
            Some("1 <span class=\"percent\">(33.3%)</span>")
        );
        assert_eq!(
            counter_markup(2, 3).as_deref(),
            Some("2 <span class=\"percent\">(66.7%)</span>")
        );
    }

    #[test]
    fn full_share_renders_one_hundred() {
        assert_eq!(
            counter_markup(10, 10).as_deref(),
            Some("10 <span class=\"percent\">(100.0%)</span>")
        );
    }
}
