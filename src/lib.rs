// Library module for testable functions

pub mod cleaning;

/// Relative tolerance when comparing a stored total to a recomputed one
pub const TOTAL_TOLERANCE: f64 = 1e-9;

/// Calculate total spent for a transaction
/// Formula: quantity × price per unit
pub fn calculate_total_spent(quantity: Option<f64>, price_per_unit: Option<f64>) -> Option<f64> {
    match (quantity, price_per_unit) {
        (Some(quantity), Some(price)) => Some(quantity * price),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_spent_calculation() {
        // Test normal case
        let total = calculate_total_spent(Some(2.0), Some(3.5));
        assert_eq!(total, Some(7.0));
    }

    #[test]
    fn test_total_spent_fractional_price() {
        let total = calculate_total_spent(Some(3.0), Some(1.5));
        assert!(total.is_some());
        let total = total.unwrap();
        assert!((total - 4.5).abs() < 0.0001);
    }

    #[test]
    fn test_total_spent_missing_quantity() {
        // Missing quantity (should return None)
        let total = calculate_total_spent(None, Some(3.0));
        assert!(total.is_none());
    }

    #[test]
    fn test_total_spent_missing_price() {
        // Missing price (should return None)
        let total = calculate_total_spent(Some(2.0), None);
        assert!(total.is_none());
    }
}
