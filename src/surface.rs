//! Backend-neutral drawing surface.
//!
//! Curve renderers describe what to draw through [`Surface`]. [`Panel`] records
//! those instructions so they can be inspected directly or replayed onto a
//! plotting backend by [`Figure`](crate::figure::Figure).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YAxis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesColor {
    Blue,
    Red,
    Grey,
    Black,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub axis: YAxis,
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: SeriesColor,
    pub line: LineKind,
    pub alpha: f64,
    pub markers: bool,
}

impl Series {
    pub fn new(axis: YAxis, points: Vec<(f64, f64)>, color: SeriesColor, line: LineKind) -> Self {
        Self {
            axis,
            label: None,
            points,
            color,
            line,
            alpha: 1.0,
            markers: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }
}

/// Text pinned to a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub axis: YAxis,
    pub text: String,
    pub anchor: (f64, f64),
    // pixels, positive y is up
    pub offset: (i32, i32),
    pub vertical: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSpec {
    pub label: String,
    /// Fixed range; `None` fits the plotted data.
    pub range: Option<(f64, f64)>,
    pub ticks: Vec<f64>,
    /// Format tick values as percentages of 1.0.
    pub percent: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelAxes {
    pub x: AxisSpec,
    pub primary: AxisSpec,
    pub secondary: Option<AxisSpec>,
}

pub trait Surface {
    fn set_title(&mut self, title: &str);
    fn set_axes(&mut self, axes: PanelAxes);
    fn add_series(&mut self, series: Series);
    fn add_annotation(&mut self, annotation: Annotation);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    title: Option<String>,
    axes: PanelAxes,
    series: Vec<Series>,
    annotations: Vec<Annotation>,
}

impl Panel {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn axes(&self) -> &PanelAxes {
        &self.axes
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn series_on(&self, axis: YAxis) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |s| s.axis == axis)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.annotations.is_empty()
    }

    /// Range of `axis`: the fixed range if one is set, otherwise the extent of
    /// its series padded by 5%.
    pub fn y_range(&self, axis: YAxis) -> (f64, f64) {
        let spec = match axis {
            YAxis::Primary => Some(&self.axes.primary),
            YAxis::Secondary => self.axes.secondary.as_ref(),
        };
        if let Some((lo, hi)) = spec.and_then(|s| s.range) {
            return (lo, hi);
        }

        let (lo, hi) = self
            .series_on(axis)
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .filter(|y| y.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return (0.0, 1.0);
        }
        if (hi - lo).abs() < 1e-12 {
            return (lo - 0.5, hi + 0.5);
        }
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    }
}

impl Surface for Panel {
    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_axes(&mut self, axes: PanelAxes) {
        self.axes = axes;
    }

    fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_records_in_order() {
        let mut panel = Panel::default();
        panel.set_title("ID: test");
        panel.add_series(Series::new(
            YAxis::Primary,
            vec![(0.0, 1.0), (1.0, 3.0)],
            SeriesColor::Blue,
            LineKind::Dashed,
        ));
        panel.add_series(Series::new(
            YAxis::Secondary,
            vec![(0.0, 0.0), (1.0, 1.0)],
            SeriesColor::Grey,
            LineKind::DashDot,
        ));

        assert_eq!(panel.title(), Some("ID: test"));
        assert_eq!(panel.series().len(), 2);
        assert_eq!(panel.series_on(YAxis::Secondary).count(), 1);
        assert!(panel.annotations().is_empty());
    }

    #[test]
    fn y_range_prefers_fixed_range() {
        let mut panel = Panel::default();
        panel.set_axes(PanelAxes {
            secondary: Some(AxisSpec {
                range: Some((0.0, 1.0)),
                ..Default::default()
            }),
            ..Default::default()
        });
        panel.add_series(Series::new(
            YAxis::Primary,
            vec![(0.0, 2.0), (1.0, 12.0)],
            SeriesColor::Blue,
            LineKind::Solid,
        ));

        assert_eq!(panel.y_range(YAxis::Secondary), (0.0, 1.0));
        let (lo, hi) = panel.y_range(YAxis::Primary);
        assert!((lo - 1.5).abs() < 1e-12);
        assert!((hi - 12.5).abs() < 1e-12);
    }

    #[test]
    fn flat_series_gets_a_usable_range() {
        let mut panel = Panel::default();
        panel.add_series(Series::new(
            YAxis::Primary,
            vec![(0.0, 5.0), (1.0, 5.0)],
            SeriesColor::Blue,
            LineKind::Solid,
        ));
        assert_eq!(panel.y_range(YAxis::Primary), (4.5, 5.5));
    }
}
