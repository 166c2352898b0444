//! Difference metrics for rank comparison.

use serde::{Deserialize, Serialize};

/// How the difference between two abundances is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMetric {
    /// `|f1 - f2|`, where `f` is the count as a fraction of the tree total.
    #[default]
    AbsoluteFraction,
    /// `(c1 - c2) / c1` on raw counts: the share of the first tree's count
    /// missing from the second. Negative for gains.
    RelativeLoss,
}

impl DiffMetric {
    /// Score one name given its raw count and tree total on both sides.
    ///
    /// For [`DiffMetric::RelativeLoss`] a name absent from the first tree
    /// scores negative infinity when the second tree has it, and zero when
    /// neither does.
    pub fn score(&self, count1: f64, total1: f64, count2: f64, total2: f64) -> f64 {
        match self {
            DiffMetric::AbsoluteFraction => fraction_delta(count1, total1, count2, total2).abs(),
            DiffMetric::RelativeLoss => {
                if count1 > 0.0 {
                    (count1 - count2) / count1
                } else if count2 > 0.0 {
                    f64::NEG_INFINITY
                } else {
                    0.0
                }
            }
        }
    }

    /// Tolerance used when none is configured.
    pub fn default_tolerance(&self) -> f64 {
        match self {
            DiffMetric::AbsoluteFraction => 0.01,
            DiffMetric::RelativeLoss => 0.0,
        }
    }

    /// Whether rows carry raw counts as their primary measure.
    pub fn uses_raw_counts(&self) -> bool {
        matches!(self, DiffMetric::RelativeLoss)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiffMetric::AbsoluteFraction => "diff",
            DiffMetric::RelativeLoss => "loss",
        }
    }
}

/// Share of `total` held by `count`, or zero when the total is not positive.
pub(crate) fn fraction(count: f64, total: f64) -> f64 {
    if total > 0.0 { count / total } else { 0.0 }
}

/// Signed difference `count1/total1 - count2/total2`.
///
/// Taken over the common denominator `total1 * total2`, so 40/100 against
/// 60/200 yields exactly `0.1`.
pub(crate) fn fraction_delta(count1: f64, total1: f64, count2: f64, total2: f64) -> f64 {
    if total1 > 0.0 && total2 > 0.0 {
        (count1 * total2 - count2 * total1) / (total1 * total2)
    } else {
        fraction(count1, total1) - fraction(count2, total2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_fraction() {
        let score = DiffMetric::AbsoluteFraction.score(40.0, 100.0, 60.0, 200.0);
        assert_eq!(score, 0.1);
        let swapped = DiffMetric::AbsoluteFraction.score(60.0, 200.0, 40.0, 100.0);
        assert_eq!(score, swapped);
    }

    #[test]
    fn test_fraction_delta_is_signed() {
        assert_eq!(fraction_delta(40.0, 100.0, 60.0, 200.0), 0.1);
        assert_eq!(fraction_delta(60.0, 200.0, 40.0, 100.0), -0.1);
        assert_eq!(fraction_delta(5.0, 0.0, 10.0, 20.0), -0.5);
        assert_eq!(fraction_delta(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_fraction_of_zero_total() {
        assert_eq!(fraction(3.0, 0.0), 0.0);
        assert_eq!(fraction(3.0, 4.0), 0.75);
    }

    #[test]
    fn test_relative_loss() {
        let metric = DiffMetric::RelativeLoss;
        assert_eq!(metric.score(100.0, 0.0, 25.0, 0.0), 0.75);
        assert_eq!(metric.score(100.0, 0.0, 150.0, 0.0), -0.5);
        assert_eq!(metric.score(100.0, 0.0, 0.0, 0.0), 1.0);
        assert_eq!(metric.score(0.0, 0.0, 5.0, 0.0), f64::NEG_INFINITY);
        assert_eq!(metric.score(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DiffMetric::default(), DiffMetric::AbsoluteFraction);
        assert_eq!(DiffMetric::AbsoluteFraction.default_tolerance(), 0.01);
        assert_eq!(DiffMetric::RelativeLoss.default_tolerance(), 0.0);
        assert!(DiffMetric::RelativeLoss.uses_raw_counts());
    }
}
