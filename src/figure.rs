//! Multi-panel figure and its plotters backend.

use std::path::Path;

use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::config::PlotConfig;
use crate::error::{HeterogeneityError, Result};
use crate::surface::{AxisSpec, LineKind, Panel, SeriesColor, YAxis};

/// A titled stack of panels addressed by index `0..len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    title: String,
    panels: Vec<Panel>,
    config: PlotConfig,
}

impl Figure {
    pub fn new(title: impl Into<String>, panels: usize, config: PlotConfig) -> Self {
        Self {
            title: title.into(),
            panels: vec![Panel::default(); panels],
            config,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn panel(&self, index: usize) -> Result<&Panel> {
        let len = self.panels.len();
        self.panels
            .get(index)
            .ok_or(HeterogeneityError::PanelOutOfRange { index, len })
    }

    pub fn panel_mut(&mut self, index: usize) -> Result<&mut Panel> {
        let len = self.panels.len();
        self.panels
            .get_mut(index)
            .ok_or(HeterogeneityError::PanelOutOfRange { index, len })
    }

    /// Pixel size of the whole figure.
    pub fn size(&self) -> (u32, u32) {
        self.config.figure_size(self.panels.len())
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(render_error)?;
        let body = root
            .titled(
                &self.title,
                (self.config.font_family.as_str(), self.config.title_font_size),
            )
            .map_err(render_error)?;

        let areas = body.split_evenly((self.panels.len().max(1), 1));
        for (i, (panel, area)) in self.panels.iter().zip(areas.iter()).enumerate() {
            debug!(panel = i, series = panel.series().len(), "drawing panel");
            draw_panel(panel, area, &self.config).map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
        Ok(())
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let root = SVGBackend::new(path, self.size()).into_drawing_area();
        self.draw(&root)?;
        info!(path = %path.display(), panels = self.panels.len(), "wrote figure");
        Ok(())
    }

    pub fn to_svg_string(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size()).into_drawing_area();
            self.draw(&root)?;
        }
        Ok(svg)
    }
}

fn render_error<E: std::fmt::Display>(err: E) -> HeterogeneityError {
    HeterogeneityError::Render(err.to_string())
}

fn plot_color(color: SeriesColor) -> RGBColor {
    match color {
        SeriesColor::Blue => BLUE,
        SeriesColor::Red => RED,
        SeriesColor::Grey => RGBColor(128, 128, 128),
        SeriesColor::Black => BLACK,
    }
}

/// Dash length and gap in pixels; `None` draws a solid line.
fn dash_size(line: LineKind) -> Option<(i32, i32)> {
    match line {
        LineKind::Solid => None,
        LineKind::Dashed => Some((8, 5)),
        LineKind::DashDot => Some((10, 3)),
        LineKind::Dotted => Some((2, 3)),
    }
}

fn format_tick(spec: &AxisSpec, value: f64) -> String {
    if spec.percent {
        format!("{:.0}%", value * 100.0)
    } else {
        format!("{:.2}", value)
    }
}

macro_rules! draw_on_axis {
    ($chart:ident, $axis:expr, $elements:expr) => {
        match $axis {
            YAxis::Primary => $chart.draw_series($elements).map(|_| ())?,
            YAxis::Secondary => $chart.draw_secondary_series($elements).map(|_| ())?,
        }
    };
}

fn draw_panel<DB: DrawingBackend>(
    panel: &Panel,
    area: &DrawingArea<DB, Shift>,
    config: &PlotConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let axes = panel.axes();
    let (x_lo, x_hi) = axes.x.range.unwrap_or((0.0, 1.0));
    let (y_lo, y_hi) = panel.y_range(YAxis::Primary);
    let (s_lo, s_hi) = panel.y_range(YAxis::Secondary);
    let font = (config.font_family.as_str(), config.font_size);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60);
    if let Some(title) = panel.title() {
        builder.caption(title, font);
    }
    let mut chart = builder
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?
        .set_secondary_coord(x_lo..x_hi, s_lo..s_hi);

    chart
        .configure_mesh()
        .x_desc(axes.x.label.as_str())
        .y_desc(axes.primary.label.as_str())
        .x_labels(axes.x.ticks.len().max(2))
        .x_label_formatter(&|v| format_tick(&axes.x, *v))
        .y_label_formatter(&|v| format_tick(&axes.primary, *v))
        .label_style(font)
        .draw()?;

    if let Some(secondary) = &axes.secondary {
        chart
            .configure_secondary_axes()
            .y_desc(secondary.label.as_str())
            .y_labels(secondary.ticks.len().max(2))
            .y_label_formatter(&|v| format_tick(secondary, *v))
            .label_style(font)
            .draw()?;
    }

    for series in panel.series() {
        let color = plot_color(series.color);
        let style = color.mix(series.alpha).stroke_width(1);
        let points = series.points.clone();

        match dash_size(series.line) {
            None => {
                draw_on_axis!(
                    chart,
                    series.axis,
                    std::iter::once(PathElement::new(points, style))
                );
            }
            Some((size, spacing)) => {
                draw_on_axis!(
                    chart,
                    series.axis,
                    std::iter::once(DashedPathElement::new(points, size, spacing, style))
                );
            }
        }

        if series.markers {
            let markers = series
                .points
                .iter()
                .map(|p| Circle::new(*p, config.marker_size, color.filled()))
                .collect::<Vec<_>>();
            draw_on_axis!(chart, series.axis, markers);
        }
    }

    for annotation in panel.annotations() {
        let mut text_font = font.into_font();
        if annotation.vertical {
            text_font = text_font.transform(FontTransform::Rotate270);
        }
        let label = EmptyElement::at(annotation.anchor)
            + Text::new(
                annotation.text.clone(),
                (annotation.offset.0, -annotation.offset.1),
                text_font,
            );
        draw_on_axis!(chart, annotation.axis, std::iter::once(label));
    }

    Ok(())
}
