//! Constitutional heterogeneity of a resource.
//!
//! Each fraction contributes its squared deviation from the overall grade,
//! weighted by its share of the total mass. The resource-level value is the
//! sum of those contributions scaled by the number of fractions.

use itertools::izip;

use crate::error::{HeterogeneityError, Result};
use crate::fraction::FractionTable;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Heterogeneity {
    /// Per-fraction contribution, in table order.
    pub distribution: Vec<f64>,
    pub constitutional: f64,
}

pub fn constitutional_heterogeneity(table: &FractionTable) -> Result<Heterogeneity> {
    let overall_grade = table.overall_grade();
    let total_weight = table.total_weight;
    if overall_grade == 0.0 {
        return Err(HeterogeneityError::DegenerateInput("overall grade is zero"));
    }
    if total_weight == 0.0 {
        return Err(HeterogeneityError::DegenerateInput("total weight is zero"));
    }

    let den = overall_grade * total_weight;
    let distribution = izip!(&table.grade, &table.weight)
        .map(|(grade, weight)| ((grade - overall_grade) * weight / den).powi(2))
        .collect::<Vec<_>>();

    let constitutional = table.len() as f64 * distribution.iter().sum::<f64>();
    if !constitutional.is_finite() {
        return Err(HeterogeneityError::DegenerateInput("heterogeneity is not finite"));
    }

    Ok(Heterogeneity {
        distribution,
        constitutional,
    })
}
