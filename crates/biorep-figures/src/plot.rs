//! Weighted healthy/unhealthy density plots with the patient's score marked.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use rand::Rng;

use biorep_core::models::biomarker::BiomarkerModel;
use biorep_core::models::language::Language;
use biorep_core::models::population::ReferencePopulation;

use crate::error::FigureError;
use crate::fonts::{self, FONT};
use crate::kde::GaussianKde;
use crate::settings::{PercentileBand, Prevalence};
use crate::stats::{linspace, round_to_step, tick_spacing, trim_to_band};

/// Number of x positions each density curve is evaluated at.
pub const GRID_POINTS: usize = 1000;

const PLOT_SIZE: (u32, u32) = (1600, 1200);
const TITLE_PX: u32 = 48;
const AXIS_PX: u32 = 40;
const TICK_PX: u32 = 34;
const CURVE_WIDTH: u32 = 6;
const MARKER_WIDTH: u32 = 7;
const MARKER_DASHES: usize = 24;

/// Inputs for one model's figure.
#[derive(Debug, Clone)]
pub struct DistributionInput<'a> {
    pub model: BiomarkerModel,
    pub population: &'a ReferencePopulation,
    pub patient_score: f64,
    pub prevalence: Prevalence,
    /// Set when the groups are trimmed to an inner percentile band.
    pub band: Option<PercentileBand>,
    pub bandwidth: f64,
    pub axis_step: f64,
}

/// Evaluated curves and axis layout, independent of any drawing backend.
#[derive(Debug, Clone)]
pub struct DistributionCurves {
    pub x_min: f64,
    pub x_max: f64,
    pub tick_spacing: f64,
    pub grid: Vec<f64>,
    /// Healthy density scaled by its prevalence.
    pub healthy: Vec<f64>,
    /// Unhealthy density scaled by its prevalence.
    pub unhealthy: Vec<f64>,
    pub patient_score: f64,
    pub trimmed_lower_pct: Option<u32>,
}

impl DistributionCurves {
    pub fn y_max(&self) -> f64 {
        let peak = self
            .healthy
            .iter()
            .chain(self.unhealthy.iter())
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        if peak > 0.0 { peak } else { 1.0 }
    }

    pub fn tick_count(&self) -> usize {
        ((self.x_max - self.x_min) / self.tick_spacing).round() as usize + 1
    }
}

/// Localised figure text.
#[derive(Debug, Clone)]
pub struct PlotLabels {
    pub title: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub healthy: &'static str,
    pub unhealthy: String,
    pub marker: &'static str,
    /// Height of the marker label as a fraction of the y axis.
    pub marker_height: f64,
}

impl PlotLabels {
    pub fn new(language: Language, model: BiomarkerModel) -> Self {
        match language {
            Language::De => Self {
                title: "Verteilung der Proteom-Scores",
                x_axis: "Proteom-Score",
                y_axis: "Häufigkeit",
                healthy: "Gesund",
                unhealthy: model.name().to_string(),
                marker: "Aktueller Score",
                marker_height: 0.80,
            },
            Language::En => Self {
                title: "Distribution of Proteom Scores",
                x_axis: "Proteom Score",
                y_axis: "Frequency",
                healthy: "Healthy",
                unhealthy: model.name().to_string(),
                marker: "Actual Score",
                marker_height: 0.85,
            },
        }
    }
}

/// Fit both groups and evaluate their weighted densities on a shared grid.
///
/// Axis bounds come from the untrimmed pooled data; trimming only affects
/// the density estimates.
pub fn compute_curves<R: Rng + ?Sized>(
    input: &DistributionInput<'_>,
    rng: &mut R,
) -> Result<DistributionCurves, FigureError> {
    let pooled: Vec<f64> = input.population.pooled().collect();
    if pooled.is_empty() {
        return Err(FigureError::EmptyReference {
            model: input.model.name().to_string(),
        });
    }
    let raw_min = pooled.iter().copied().fold(f64::INFINITY, f64::min);
    let raw_max = pooled.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let x_min = round_to_step(raw_min, input.axis_step, true);
    let mut x_max = round_to_step(raw_max, input.axis_step, false);
    if x_max <= x_min {
        x_max = x_min + input.axis_step;
    }
    let grid = linspace(x_min, x_max, GRID_POINTS);

    let (healthy, unhealthy) = match input.band {
        Some(band) => (
            trim_to_band(&input.population.healthy, band.lower as f64, band.upper as f64),
            trim_to_band(&input.population.unhealthy, band.lower as f64, band.upper as f64),
        ),
        None => (
            input.population.healthy.clone(),
            input.population.unhealthy.clone(),
        ),
    };

    let density = |samples: &[f64], weight: f64, rng: &mut R| -> Vec<f64> {
        if samples.is_empty() {
            return vec![0.0; grid.len()];
        }
        let kde = GaussianKde::fit(samples, input.bandwidth, rng);
        kde.evaluate_all(&grid).into_iter().map(|y| y * weight).collect()
    };
    let healthy = density(&healthy, input.prevalence.healthy, rng);
    let unhealthy = density(&unhealthy, input.prevalence.unhealthy, rng);

    Ok(DistributionCurves {
        x_min,
        x_max,
        tick_spacing: tick_spacing(x_min, x_max, input.axis_step),
        grid,
        healthy,
        unhealthy,
        patient_score: input.patient_score,
        trimmed_lower_pct: input.band.map(|b| b.lower),
    })
}

/// Draw the figure to a PNG at `path`.
///
/// If text cannot be drawn (no usable font was found), the figure is
/// drawn again without text so a PNG is still produced.
pub fn render_png(
    curves: &DistributionCurves,
    labels: &PlotLabels,
    path: &Path,
) -> Result<(), FigureError> {
    fonts::ensure_font(None);
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();

    if let Err(e) = draw_chart(&root, curves, Some(labels)) {
        tracing::warn!(path = %path.display(), error = %e, "figure text unavailable, drawing curves only");
        draw_chart(&root, curves, None).map_err(|e| FigureError::Render(e.to_string()))?;
    }

    root.present()
        .map_err(|e| FigureError::Render(e.to_string()))?;
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    curves: &DistributionCurves,
    labels: Option<&PlotLabels>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let y_top = curves.y_max() * 1.05;

    let mut builder = ChartBuilder::on(root);
    builder.margin(40);
    if let Some(labels) = labels {
        builder
            .caption(labels.title, (FONT, TITLE_PX))
            .x_label_area_size(110)
            .y_label_area_size(150);
    }
    let mut chart = builder.build_cartesian_2d(curves.x_min..curves.x_max, 0.0..y_top)?;

    if let Some(labels) = labels {
        chart
            .configure_mesh()
            .x_desc(labels.x_axis)
            .y_desc(labels.y_axis)
            .x_labels(curves.tick_count())
            .x_label_formatter(&|v: &f64| format!("{v:.1}"))
            .label_style((FONT, TICK_PX))
            .axis_desc_style((FONT, AXIS_PX))
            .bold_line_style(BLACK.mix(0.3))
            .light_line_style(TRANSPARENT)
            .draw()?;
    }

    let points = |ys: &[f64]| -> Vec<(f64, f64)> {
        curves.grid.iter().copied().zip(ys.iter().copied()).collect()
    };

    let healthy = chart.draw_series(LineSeries::new(
        points(&curves.healthy),
        GREEN.stroke_width(CURVE_WIDTH),
    ))?;
    if let Some(labels) = labels {
        healthy
            .label(labels.healthy)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], GREEN.stroke_width(CURVE_WIDTH)));
    }

    let unhealthy = chart.draw_series(LineSeries::new(
        points(&curves.unhealthy),
        RED.stroke_width(CURVE_WIDTH),
    ))?;
    if let Some(labels) = labels {
        unhealthy
            .label(labels.unhealthy.clone())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], RED.stroke_width(CURVE_WIDTH)));
    }

    // Dashed vertical marker at the patient's score.
    let x = curves.patient_score;
    let dash = y_top / (MARKER_DASHES * 2) as f64;
    chart.draw_series((0..MARKER_DASHES).map(|i| {
        let y0 = dash * (2 * i) as f64;
        PathElement::new(vec![(x, y0), (x, y0 + dash)], BLUE.stroke_width(MARKER_WIDTH))
    }))?;

    if let Some(labels) = labels {
        let offset = 0.05 * (curves.x_max - curves.x_min);
        let style = (FONT, TICK_PX)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLUE);
        chart.draw_series(std::iter::once(Text::new(
            labels.marker,
            (x - offset, y_top * labels.marker_height),
            style,
        )))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT, TICK_PX))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}
