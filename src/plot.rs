// petrors-logs/src/plot.rs

use crate::depth::valid_data_range;
use crate::lithology::Lithology;
use crate::params::Cutoffs;
use crate::stats::{valid_values, PropertySummary};
use crate::well::{Sample, WellDataset};
use log::debug;
use plotly::color::NamedColor;
use plotly::common::{DashType, Fill, Line, Marker, MarkerSymbol, Mode, Title};
use plotly::layout::{Axis, AxisType, GridPattern, Layout, LayoutGrid};
use plotly::{Plot, Scatter};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

pub const TRACKS: usize = 8;

/// Display limits of the resistivity track, in ohm-m.
///
/// Narrow data is given a decade of headroom on both sides, wide data a
/// factor of two; the result never leaves [0.1, 10000].
pub fn resistivity_limits(values: &[f64]) -> (f64, f64) {
    let shown: Vec<f64> = values.iter().copied().filter(|v| *v > 0.1).collect();
    if shown.is_empty() {
        return (0.1, 1000.);
    }
    let (min, max) = match PropertySummary::of(&shown) {
        PropertySummary {
            min: Some(min),
            max: Some(max),
            ..
        } => (min, max),
        _ => return (0.1, 1000.),
    };
    let factor = if max / min < 100. { 10. } else { 2. };
    ((min / factor).max(0.1), (max * factor).min(10_000.))
}

fn x_axis_id(track: usize) -> String {
    if track == 1 {
        "x".to_string()
    } else {
        format!("x{}", track)
    }
}

fn with_x_axis(layout: Layout, track: usize, axis: Axis) -> Layout {
    match track {
        1 => layout.x_axis(axis),
        2 => layout.x_axis2(axis),
        3 => layout.x_axis3(axis),
        4 => layout.x_axis4(axis),
        5 => layout.x_axis5(axis),
        6 => layout.x_axis6(axis),
        7 => layout.x_axis7(axis),
        _ => layout.x_axis8(axis),
    }
}

fn curve_trace(
    track: usize,
    name: &str,
    depths: &[f64],
    values: Vec<Option<f64>>,
    color: NamedColor,
) -> Box<Scatter<Option<f64>, f64>> {
    Scatter::new(values, depths.to_vec())
        .name(name)
        .mode(Mode::Lines)
        .line(Line::new().color(color).width(1.2))
        .x_axis(&x_axis_id(track))
        .y_axis("y")
}

fn cutoff_trace(
    track: usize,
    name: &str,
    value: f64,
    top: f64,
    bottom: f64,
) -> Box<Scatter<f64, f64>> {
    Scatter::new(vec![value, value], vec![top, bottom])
        .name(name)
        .mode(Mode::Lines)
        .line(
            Line::new()
                .color(NamedColor::Black)
                .dash(DashType::Dash)
                .width(1.0),
        )
        .show_legend(false)
        .x_axis(&x_axis_id(track))
        .y_axis("y")
}

/// Eight-track log of a processed well: GR, RHOB, NPHI, RT, PHI_E, VSH, the
/// pay flag and the lithology column, on a shared depth axis limited to the
/// span that carries data.
pub fn make_log_plot(dataset: &WellDataset, cutoffs: &Cutoffs) -> Result<Plot, LogPlotError> {
    let (top, bottom) = valid_data_range(dataset).ok_or(LogPlotError::EmptyDataset)?;
    let samples = dataset.samples();
    let depths = dataset.depths();
    let column = |f: fn(&Sample) -> Option<f64>| -> Vec<Option<f64>> {
        samples.iter().map(f).collect()
    };
    let mut plot = Plot::new();

    plot.add_trace(curve_trace(
        1,
        "GR",
        &depths,
        column(|s| s.gamma_ray),
        NamedColor::Green,
    ));
    plot.add_trace(curve_trace(
        2,
        "RHOB",
        &depths,
        column(|s| s.bulk_density),
        NamedColor::Red,
    ));
    plot.add_trace(curve_trace(
        3,
        "NPHI",
        &depths,
        column(|s| s.neutron_porosity),
        NamedColor::Blue,
    ));
    let resistivity: Vec<Option<f64>> = samples
        .iter()
        .map(|s| s.resistivity_deep.filter(|rt| *rt > 0.1))
        .collect();
    let (rt_min, rt_max) = resistivity_limits(&valid_values(resistivity.clone()));
    plot.add_trace(curve_trace(4, "RT", &depths, resistivity, NamedColor::DarkRed));
    plot.add_trace(
        curve_trace(
            5,
            "PHI_E",
            &depths,
            column(|s| s.porosity_effective),
            NamedColor::DarkCyan,
        )
        .fill(Fill::ToZeroX),
    );
    plot.add_trace(cutoff_trace(5, "PHI cutoff", cutoffs.phi, top, bottom));
    plot.add_trace(
        curve_trace(6, "VSH", &depths, column(|s| s.shale_volume), NamedColor::Brown)
            .fill(Fill::ToZeroX),
    );
    plot.add_trace(cutoff_trace(6, "VSH cutoff", cutoffs.vsh, top, bottom));
    let pay: Vec<Option<f64>> = samples
        .iter()
        .map(|s| Some(if s.is_pay { 1. } else { 0. }))
        .collect();
    plot.add_trace(
        curve_trace(7, "NET PAY", &depths, pay, NamedColor::LimeGreen).fill(Fill::ToZeroX),
    );

    let mut by_lithology: BTreeMap<Lithology, Vec<f64>> = BTreeMap::new();
    for sample in samples {
        if let Some(lithology) = sample.lithology {
            by_lithology.entry(lithology).or_default().push(sample.depth_ft);
        }
    }
    for (lithology, lithology_depths) in by_lithology {
        let trace = Scatter::new(vec![0.5; lithology_depths.len()], lithology_depths)
            .name(lithology.label())
            .mode(Mode::Markers)
            .marker(
                Marker::new()
                    .color(lithology.color())
                    .symbol(MarkerSymbol::Square)
                    .size(8),
            )
            .x_axis(&x_axis_id(TRACKS))
            .y_axis("y");
        plot.add_trace(trace);
    }

    let track_axes = [
        Axis::new().title(Title::new("GR (API)")).range(vec![0., 150.]),
        Axis::new().title(Title::new("RHOB (g/cc)")).range(vec![2.95, 1.95]),
        Axis::new().title(Title::new("NPHI (v/v)")).range(vec![0.45, -0.15]),
        Axis::new()
            .title(Title::new("RT (ohm-m)"))
            .type_(AxisType::Log)
            .range(vec![rt_min.log10(), rt_max.log10()]),
        Axis::new().title(Title::new("PHI_E (v/v)")).range(vec![-0.02, 0.45]),
        Axis::new().title(Title::new("VSH (v/v)")).range(vec![0., 1.]),
        Axis::new().title(Title::new("NET PAY")).range(vec![-0.5, 1.5]),
        Axis::new().title(Title::new("LITHOLOGY")).range(vec![0., 1.]),
    ];
    let mut layout = Layout::new()
        .title(Title::new(&format!("Petrophysical log - {}", dataset.name())))
        .grid(
            LayoutGrid::new()
                .rows(1)
                .columns(TRACKS)
                .pattern(GridPattern::Coupled),
        )
        .y_axis(
            Axis::new()
                .title(Title::new("Depth (ft)"))
                .range(vec![bottom, top]),
        )
        .height(1000);
    for (index, axis) in track_axes.into_iter().enumerate() {
        layout = with_x_axis(layout, index + 1, axis);
    }
    plot.set_layout(layout);
    debug!(
        "Log plot for {}: depth {:.1}-{:.1} ft, RT {:.2}-{:.2} ohm-m",
        dataset.name(),
        top,
        bottom,
        rt_min,
        rt_max
    );
    Ok(plot)
}

/// Renders the log plot as a standalone HTML file.
pub fn write_log_plot(
    path: &Path,
    dataset: &WellDataset,
    cutoffs: &Cutoffs,
) -> Result<(), LogPlotError> {
    let plot = make_log_plot(dataset, cutoffs)?;
    std::fs::write(path, plot.to_html())?;
    log::info!("Wrote log plot of {} to {}", dataset.name(), path.display());
    Ok(())
}

#[derive(Error, Debug)]
pub enum LogPlotError {
    #[error("Cannot plot a well without samples")]
    EmptyDataset,
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::Curve;

    #[test]
    fn test_resistivity_limits() {
        assert_eq!(resistivity_limits(&[]), (0.1, 1000.));
        assert_eq!(resistivity_limits(&[0.05, 0.1]), (0.1, 1000.));
        // max/min < 100: a decade each side
        assert_eq!(resistivity_limits(&[2., 20.]), (0.2, 200.));
        // wide data: factor of two, clipped
        let (low, high) = resistivity_limits(&[0.5, 8000.]);
        assert_eq!(low, 0.25);
        assert_eq!(high, 10_000.);
        // unordered input, NaN and sub-0.1 readings are ignored
        assert_eq!(resistivity_limits(&[50., f64::NAN, 0.05, 5.]), (0.5, 500.));
    }

    #[test]
    fn test_empty_dataset_cannot_be_plotted() {
        let dataset = WellDataset::from_samples("EMPTY", vec![]);
        assert!(matches!(
            make_log_plot(&dataset, &Cutoffs::default()),
            Err(LogPlotError::EmptyDataset)
        ));
    }

    #[test]
    fn test_log_plot_tracks() {
        let mut samples: Vec<Sample> = (0..4)
            .map(|i| {
                Sample::new(1000. + i as f64)
                    .with(Curve::GammaRay, 40. + i as f64)
                    .with(Curve::Resistivity, 10.)
            })
            .collect();
        samples[0].lithology = Some(Lithology::Sandstone);
        samples[1].lithology = Some(Lithology::Shale);
        let dataset = WellDataset::from_samples("PLOT-1", samples);
        let json = make_log_plot(&dataset, &Cutoffs::default())
            .unwrap()
            .to_json();
        assert!(json.contains("\"type\":\"log\""));
        assert!(json.contains("SANDSTONE"));
        assert!(json.contains("SHALE"));
        assert!(json.contains("PHI cutoff"));
        assert!(json.contains("\"xaxis\":\"x8\""));
    }
}
