use itertools::izip;
use polars::prelude::{DataFrame, NamedFrom, Series as Column};
use serde::Serialize;
use tracing::debug;

use crate::curve::{self, format_percent, InflectionPoint};
use crate::error::{HeterogeneityError, Result};
use crate::fraction::{columns, compute_statistics, fractions_from, sort_by_grade};
use crate::heterogeneity::constitutional_heterogeneity;
use crate::surface::{
    Annotation, AxisSpec, LineKind, PanelAxes, Series, SeriesColor, Surface, YAxis,
};

const QUARTER_TICKS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Scalar statistics of a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub id: String,
    pub fractions: usize,
    pub total_weight: f64,
    pub total_yield: f64,
    pub overall_grade: f64,
    pub heterogeneity: f64,
    pub inflection: InflectionPoint,
}

/// A mineral resource described by weight/grade fractions.
///
/// Every statistic is computed once in [`Resource::new`]; the table is sorted by
/// descending grade and never changes afterwards.
#[derive(Clone, Debug)]
pub struct Resource {
    id: String,
    info: DataFrame,
    columns: Vec<String>,
    total_weight: f64,
    total_yield: f64,
    overall_grade: f64,
    heterogeneity: f64,
}

impl Resource {
    pub fn new(id: impl Into<String>, weights: &[f64], grades: &[f64]) -> Result<Self> {
        let id = id.into();
        let sorted = sort_by_grade(fractions_from(weights, grades)?);
        let table = compute_statistics(&sorted)?;
        let het = constitutional_heterogeneity(&table)?;

        let mut info = table.to_dataframe()?;
        info.with_column(Column::new(
            columns::DISTRIBUTION_HETEROGENEITY,
            het.distribution,
        ))?;

        let columns = info
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();

        debug!(
            id = %id,
            fractions = table.len(),
            heterogeneity = het.constitutional,
            "computed resource statistics"
        );

        Ok(Self {
            id,
            info,
            columns,
            total_weight: table.total_weight,
            total_yield: table.total_metal,
            overall_grade: table.overall_grade(),
            heterogeneity: het.constitutional,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Constitutional heterogeneity of the resource.
    pub fn heterogeneity(&self) -> f64 {
        self.heterogeneity
    }

    pub fn len(&self) -> usize {
        self.info.height()
    }

    pub fn is_empty(&self) -> bool {
        self.info.height() == 0
    }

    /// The augmented fraction table, sorted by descending grade.
    pub fn table(&self) -> &DataFrame {
        &self.info
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self
            .info
            .column(name)?
            .f64()?
            .into_no_null_iter()
            .collect())
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn total_yield(&self) -> f64 {
        self.total_yield
    }

    /// Mass-weighted mean grade over every fraction.
    pub fn overall_grade(&self) -> f64 {
        self.overall_grade
    }

    pub fn inflection_point(&self) -> Result<InflectionPoint> {
        let x = self.column(columns::CUMULATIVE_WEIGHT_FRACTION)?;
        let y = self.column(columns::CUMULATIVE_RECOVERY)?;
        curve::inflection_point(&x, &y).ok_or(HeterogeneityError::DegenerateInput("no fractions"))
    }

    pub fn summary(&self) -> Result<ResourceSummary> {
        Ok(ResourceSummary {
            id: self.id.clone(),
            fractions: self.len(),
            total_weight: self.total_weight,
            total_yield: self.total_yield,
            overall_grade: self.overall_grade,
            heterogeneity: self.heterogeneity,
            inflection: self.inflection_point()?,
        })
    }

    /// Draws cumulative grade (primary axis) and cumulative recovery (secondary
    /// axis) against cumulative mass, with the no-enrichment diagonal, the
    /// enrichment curve and guides to its maximum.
    pub fn render_grade_recovery_curve<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        let x = self.column(columns::CUMULATIVE_WEIGHT_FRACTION)?;
        let grade = self.column(columns::CUMULATIVE_GRADE)?;
        let recovery = self.column(columns::CUMULATIVE_RECOVERY)?;
        let inflection = curve::inflection_point(&x, &recovery)
            .ok_or(HeterogeneityError::DegenerateInput("no fractions"))?;

        let fraction_axis = |label: String| AxisSpec {
            label,
            range: Some((0.0, 1.0)),
            ticks: QUARTER_TICKS.to_vec(),
            percent: true,
        };
        surface.set_axes(PanelAxes {
            x: fraction_axis("Cumulative Mass %".to_string()),
            primary: AxisSpec {
                label: format!("Cumulative {} Grade", self.id),
                ..Default::default()
            },
            secondary: Some(fraction_axis(format!("Cumulative {} Recovery", self.id))),
        });

        let points = |y: &[f64]| izip!(&x, y).map(|(x, y)| (*x, *y)).collect::<Vec<_>>();

        surface.add_series(
            Series::new(YAxis::Primary, points(&grade), SeriesColor::Blue, LineKind::Dashed)
                .with_label(self.id.as_str())
                .with_alpha(0.2)
                .with_markers(),
        );

        surface.add_series(
            Series::new(
                YAxis::Secondary,
                vec![(0.0, 0.0), (1.0, 1.0)],
                SeriesColor::Grey,
                LineKind::DashDot,
            )
            .with_alpha(0.2),
        );

        surface.add_series(
            Series::new(YAxis::Secondary, points(&recovery), SeriesColor::Red, LineKind::Dashed)
                .with_label(format!("{} recovery", self.id))
                .with_alpha(0.2)
                .with_markers(),
        );

        let enrichment = curve::enrichment(&x, &recovery);
        surface.add_series(
            Series::new(YAxis::Secondary, points(&enrichment), SeriesColor::Red, LineKind::Dotted)
                .with_alpha(0.2),
        );

        let x_max = inflection.cumulative_weight_fraction;
        let y_max = inflection.cumulative_recovery;
        surface.add_series(
            Series::new(
                YAxis::Secondary,
                vec![(x_max, 0.0), (x_max, y_max)],
                SeriesColor::Black,
                LineKind::Dotted,
            )
            .with_alpha(0.35),
        );
        surface.add_annotation(Annotation {
            axis: YAxis::Secondary,
            text: format_percent(x_max),
            anchor: (x_max, 0.0),
            offset: (5, 10),
            vertical: true,
        });

        surface.add_series(
            Series::new(
                YAxis::Secondary,
                vec![(x_max, y_max), (1.0, y_max)],
                SeriesColor::Black,
                LineKind::Dotted,
            )
            .with_alpha(0.35),
        );
        surface.add_annotation(Annotation {
            axis: YAxis::Secondary,
            text: format_percent(y_max),
            anchor: (1.0, y_max),
            offset: (-35, -15),
            vertical: false,
        });

        debug!(id = %self.id, index = inflection.index, "rendered grade-recovery curve");
        Ok(())
    }
}
