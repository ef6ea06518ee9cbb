//! Inflection point of a grade-recovery curve.

use std::cmp::Reverse;

use itertools::{izip, Itertools};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Point where recovery leads mass by the widest margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflectionPoint {
    pub index: usize,
    pub cumulative_weight_fraction: f64,
    pub cumulative_recovery: f64,
}

impl InflectionPoint {
    pub fn enrichment(&self) -> f64 {
        self.cumulative_recovery - self.cumulative_weight_fraction
    }
}

/// Pointwise `recovery - mass`; zero everywhere on the no-enrichment diagonal.
pub fn enrichment(cumulative_weight_fraction: &[f64], cumulative_recovery: &[f64]) -> Vec<f64> {
    izip!(cumulative_weight_fraction, cumulative_recovery)
        .map(|(x, y)| y - x)
        .collect()
}

/// Discrete argmax of the enrichment curve. Ties go to the earliest row.
pub fn inflection_point(
    cumulative_weight_fraction: &[f64],
    cumulative_recovery: &[f64],
) -> Option<InflectionPoint> {
    let index = enrichment(cumulative_weight_fraction, cumulative_recovery)
        .into_iter()
        .position_min_by_key(|d| Reverse(OrderedFloat(*d)))?;

    Some(InflectionPoint {
        index,
        cumulative_weight_fraction: cumulative_weight_fraction[index],
        cumulative_recovery: cumulative_recovery[index],
    })
}

/// Formats a fraction of 1.0 as a percentage with three significant figures.
pub fn format_percent(fraction: f64) -> String {
    let value = fraction * 100.0;
    if value == 0.0 || !value.is_finite() {
        return format!("{:.2}%", value);
    }

    let magnitude = value.abs().log10().floor() as i32;
    let mut decimals = (2 - magnitude).max(0) as usize;
    // 99.96 rounds up to 100.0, which would be four figures
    let rounded: f64 = format!("{:.*}", decimals, value)
        .parse()
        .unwrap_or(value);
    if decimals > 0 && rounded.abs() >= 10f64.powi(magnitude + 1) {
        decimals -= 1;
    }
    format!("{:.*}%", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_widest_gap() {
        let x = [0.1, 0.4, 0.8, 1.0];
        let y = [0.3, 0.8, 0.95, 1.0];
        let point = inflection_point(&x, &y).unwrap();
        assert_eq!(point.index, 1);
        assert_eq!(point.cumulative_weight_fraction, 0.4);
        assert_eq!(point.cumulative_recovery, 0.8);
        assert!((point.enrichment() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn ties_go_to_first_row() {
        let x = [0.25, 0.5, 0.75, 1.0];
        let y = [0.5, 0.75, 1.0, 1.0];
        assert_eq!(inflection_point(&x, &y).unwrap().index, 0);
    }

    #[test]
    fn empty_curve_has_no_inflection() {
        assert!(inflection_point(&[], &[]).is_none());
    }

    #[test]
    fn percent_has_three_significant_figures() {
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
        assert_eq!(format_percent(0.05), "5.00%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(0.9996), "100%");
        assert_eq!(format_percent(0.001234), "0.123%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
