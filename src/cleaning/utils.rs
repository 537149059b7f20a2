//! Utility functions for common operations

use std::collections::HashMap;

/// Render a float the way the cleaned CSV stores it.
/// Integral values keep a trailing `.0` so the column reads as numeric.
pub fn format_float(value: f64) -> String {
    let rendered = value.to_string();
    if value.is_finite() && !rendered.contains('.') {
        format!("{}.0", rendered)
    } else {
        rendered
    }
}

/// Most frequent value; ties go to the lexicographically smallest
pub fn most_frequent<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_value, a_count), (b_value, b_count)| {
            a_count.cmp(b_count).then_with(|| b_value.cmp(a_value))
        })
        .map(|(value, _)| value.to_string())
}

/// Compare a stored total against a recomputed one with relative tolerance
pub fn totals_match(stored: f64, computed: f64) -> bool {
    (stored - computed).abs() <= crate::TOTAL_TOLERANCE * computed.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(7.0), "7.0");
        assert_eq!(format_float(3.5), "3.5");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_most_frequent() {
        assert_eq!(
            most_frequent(["Cash", "Card", "Cash", "Wallet"]),
            Some("Cash".to_string())
        );

        // Tie between Takeaway and In-store resolves alphabetically
        assert_eq!(
            most_frequent(["Takeaway", "In-store", "Takeaway", "In-store"]),
            Some("In-store".to_string())
        );

        assert_eq!(most_frequent(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_totals_match() {
        assert!(totals_match(7.0, 7.0));
        assert!(totals_match(0.30000000000000004, 0.3));
        assert!(!totals_match(999.0, 7.0));
    }
}
