//! Tip calculator arithmetic.

/// Tip for `total_bill` at `tip_percentage` percent.
///
/// Bills of one or less yield no tip.
pub fn tip_amount(total_bill: f64, tip_percentage: u32) -> f64 {
    if total_bill > 1.0 {
        total_bill * f64::from(tip_percentage) / 100.0
    } else {
        0.0
    }
}

/// Share of bill plus tip for each of `split_by` people.
///
/// Returns zero for bills of one or less and for a zero split.
pub fn per_person(total_bill: f64, tip_percentage: u32, split_by: u32) -> f64 {
    if total_bill <= 1.0 || split_by == 0 {
        return 0.0;
    }
    (total_bill + tip_amount(total_bill, tip_percentage)) / f64::from(split_by)
}

#[cfg(test)]
mod tests {
    use super::{per_person, tip_amount};

    #[test]
    fn tip_is_percentage_of_bill() {
        assert!((tip_amount(100.0, 15) - 15.0).abs() < f64::EPSILON);
        assert_eq!(tip_amount(1.0, 20), 0.0);
        assert_eq!(tip_amount(-5.0, 20), 0.0);
    }

    #[test]
    fn per_person_splits_bill_and_tip() {
        assert!((per_person(100.0, 20, 4) - 30.0).abs() < 1e-9);
        assert_eq!(per_person(100.0, 20, 0), 0.0);
        assert_eq!(per_person(0.5, 20, 2), 0.0);
    }
}
