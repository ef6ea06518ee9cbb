//! Fraction rows and the cumulative statistics computed over them.

use std::cmp::Reverse;

use itertools::{izip, Itertools};
use ordered_float::OrderedFloat;
use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};

use crate::error::{HeterogeneityError, Result};

/// Column names of the augmented fraction table.
pub mod columns {
    pub const WEIGHT: &str = "weight";
    pub const GRADE: &str = "grade";
    pub const CUMULATIVE_WEIGHT: &str = "cumulative_weight";
    pub const TOTAL_WEIGHT: &str = "total_weight";
    pub const WEIGHT_FRACTION: &str = "weight_fraction";
    pub const CUMULATIVE_WEIGHT_FRACTION: &str = "cumulative_weight_fraction";
    pub const YIELD: &str = "yield";
    pub const CUMULATIVE_YIELD: &str = "cumulative_yield";
    pub const CUMULATIVE_GRADE: &str = "cumulative_grade";
    pub const TOTAL_YIELD: &str = "total_yield";
    pub const RECOVERY: &str = "recovery";
    pub const CUMULATIVE_RECOVERY: &str = "cumulative_recovery";
    pub const DISTRIBUTION_HETEROGENEITY: &str = "distribution_heterogeneity";
}

/// One weight/grade measurement of a resource.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Fraction {
    pub weight: f64,
    pub grade: f64,
}

impl Fraction {
    pub fn new(weight: f64, grade: f64) -> Self {
        Self { weight, grade }
    }

    /// Value-bearing mass of the fraction (weight × grade).
    pub fn metal(&self) -> f64 {
        self.weight * self.grade
    }
}

/// Pairs up weights and grades, rejecting mismatched lengths and values that
/// would poison the cumulative sums.
pub fn fractions_from(weights: &[f64], grades: &[f64]) -> Result<Vec<Fraction>> {
    if weights.len() != grades.len() {
        return Err(HeterogeneityError::LengthMismatch {
            weights: weights.len(),
            grades: grades.len(),
        });
    }

    izip!(weights, grades)
        .enumerate()
        .map(|(index, (&weight, &grade))| {
            if !weight.is_finite() || weight < 0.0 || !grade.is_finite() {
                return Err(HeterogeneityError::InvalidFraction {
                    index,
                    weight,
                    grade,
                });
            }
            Ok(Fraction::new(weight, grade))
        })
        .collect()
}

/// Orders fractions by descending grade. Equal grades keep their input order.
pub fn sort_by_grade(fractions: Vec<Fraction>) -> Vec<Fraction> {
    fractions
        .into_iter()
        .sorted_by_key(|f| Reverse(OrderedFloat(f.grade)))
        .collect()
}

fn running_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Column-wise cumulative statistics over grade-sorted fractions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FractionTable {
    pub weight: Vec<f64>,
    pub grade: Vec<f64>,
    pub cumulative_weight: Vec<f64>,
    pub total_weight: f64,
    pub weight_fraction: Vec<f64>,
    pub cumulative_weight_fraction: Vec<f64>,
    pub metal: Vec<f64>,
    pub cumulative_metal: Vec<f64>,
    pub cumulative_grade: Vec<f64>,
    pub total_metal: f64,
    pub recovery: Vec<f64>,
    pub cumulative_recovery: Vec<f64>,
}

impl FractionTable {
    pub fn len(&self) -> usize {
        self.weight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }

    /// Weighted mean grade over every fraction.
    pub fn overall_grade(&self) -> f64 {
        self.cumulative_grade.last().copied().unwrap_or(0.0)
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let n = self.len();
        DataFrame::new(vec![
            Series::new(columns::WEIGHT, &self.weight),
            Series::new(columns::GRADE, &self.grade),
            Series::new(columns::CUMULATIVE_WEIGHT, &self.cumulative_weight),
            Series::new(columns::TOTAL_WEIGHT, vec![self.total_weight; n]),
            Series::new(columns::WEIGHT_FRACTION, &self.weight_fraction),
            Series::new(
                columns::CUMULATIVE_WEIGHT_FRACTION,
                &self.cumulative_weight_fraction,
            ),
            Series::new(columns::YIELD, &self.metal),
            Series::new(columns::CUMULATIVE_YIELD, &self.cumulative_metal),
            Series::new(columns::CUMULATIVE_GRADE, &self.cumulative_grade),
            Series::new(columns::TOTAL_YIELD, vec![self.total_metal; n]),
            Series::new(columns::RECOVERY, &self.recovery),
            Series::new(columns::CUMULATIVE_RECOVERY, &self.cumulative_recovery),
        ])
    }
}

/// Computes every derived column over `sorted`, which must already be in
/// descending grade order.
pub fn compute_statistics(sorted: &[Fraction]) -> Result<FractionTable> {
    if sorted.is_empty() {
        return Err(HeterogeneityError::DegenerateInput("no fractions"));
    }

    let weight = sorted.iter().map(|f| f.weight).collect::<Vec<_>>();
    let grade = sorted.iter().map(|f| f.grade).collect::<Vec<_>>();

    let cumulative_weight = running_sum(&weight);
    let total_weight: f64 = weight.iter().sum();
    if total_weight == 0.0 {
        return Err(HeterogeneityError::DegenerateInput("total weight is zero"));
    }
    if !total_weight.is_finite() {
        return Err(HeterogeneityError::DegenerateInput("total weight overflows"));
    }
    let weight_fraction = weight.iter().map(|w| w / total_weight).collect::<Vec<_>>();
    let cumulative_weight_fraction = running_sum(&weight_fraction);

    let metal = sorted.iter().map(Fraction::metal).collect::<Vec<_>>();
    let cumulative_metal = running_sum(&metal);
    // Leading zero-weight fractions have no mass yet; report their own grade.
    let cumulative_grade = izip!(&cumulative_metal, &cumulative_weight, &grade)
        .map(|(m, w, g)| if *w == 0.0 { *g } else { m / w })
        .collect::<Vec<_>>();

    let total_metal: f64 = metal.iter().sum();
    if total_metal == 0.0 {
        return Err(HeterogeneityError::DegenerateInput("total yield is zero"));
    }
    if !total_metal.is_finite() {
        return Err(HeterogeneityError::DegenerateInput("total yield overflows"));
    }
    let recovery = metal.iter().map(|m| m / total_metal).collect::<Vec<_>>();
    let cumulative_recovery = running_sum(&recovery);

    Ok(FractionTable {
        weight,
        grade,
        cumulative_weight,
        total_weight,
        weight_fraction,
        cumulative_weight_fraction,
        metal,
        cumulative_metal,
        cumulative_grade,
        total_metal,
        recovery,
        cumulative_recovery,
    })
}
