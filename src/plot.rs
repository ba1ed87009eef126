use super::*;

use plotters::{coord::Shift, prelude::*};

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 20;
const AXIS_NAME_SIZE: u32 = 16;

//
// Runner
//

#[derive(clap::Args)]
pub struct Args {
    /// Acceleration logs, one subplot each. Overrides the configured list.
    files: Vec<PathBuf>,

    /// RON file holding a `PlotConfig`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum)]
    range_mode: Option<RangeMode>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Writes the effective configuration to this path.
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(PlotConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => cfg::read_from_file(path)?,
            None => PlotConfig::default(),
        };
        if !self.files.is_empty() {
            config.files = self.files;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(range_mode) = self.range_mode {
            config.range_mode = range_mode;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate()?;
        Ok((config, self.save_config))
    }
}

pub fn run(args: Args) -> Result<()> {
    let timer = Instant::now();
    let (config, save_config) = args.into_config()?;
    debug!(
        "Plotting {} files at {}x{}, line color {:.3}",
        config.files.len(),
        config.width,
        config.height,
        config.line_color
    );
    if let Some(path) = save_config {
        cfg::write_to_file(&path, &config)?;
        info!("Wrote config to {}", path.display());
    }

    // Parse everything before drawing anything.
    let sets = config
        .files
        .iter()
        .map(|file| SampleSet::read(file, config.range_mode))
        .collect::<Result<Vec<_>>>()?;
    for set in &sets {
        if set.is_empty() {
            warn!("{} has no acceleration samples", set.name());
        }
        info!("{}: {set}", set.name());
    }

    write_svg(&config.output, &sets, &config)?;
    info!(
        "Wrote {} in {} seconds",
        config.output.display(),
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}

//
// Rendering
//

pub fn write_svg(path: &Path, sets: &[SampleSet], config: &PlotConfig) -> Result<()> {
    let svg = render_svg(sets, config)?;
    File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?
        .write_all(svg.as_bytes())?;
    Ok(())
}

pub fn render_svg(sets: &[SampleSet], config: &PlotConfig) -> Result<String> {
    ensure!(!sets.is_empty(), "Nothing to plot");
    let mut output_svg = String::new();
    {
        let root = SVGBackend::with_string(&mut output_svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, sets.len()));
        for (panel, set) in panels.iter().zip(sets) {
            draw_sample_set(panel, set, config)?;
        }
        root.present()?;
    }
    Ok(output_svg)
}

fn draw_sample_set(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    set: &SampleSet,
    config: &PlotConfig,
) -> Result<()> {
    let [x_span, y_span, z_span] =
        Axis::ALL.map(|axis| span(set.range(axis), set.values(axis)));
    debug!(
        "Plotting {} with x={x_span:?}, y={y_span:?}, z={z_span:?}",
        set.name()
    );

    let mut chart = ChartBuilder::on(area)
        .caption(set.name(), (FONT, CAPTION_SIZE))
        .margin(10)
        .build_cartesian_3d(x_span.clone(), y_span.clone(), z_span.clone())?;
    chart.with_projection(|mut projection| {
        projection.yaw = 0.6;
        projection.pitch = 0.3;
        projection.scale = 0.8;
        projection.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style((FONT, 12))
        .draw()?;

    let points = set
        .points()
        .filter(|point| point.coords.iter().all(|&value| plottable(value)))
        .map(|point| (point.x, point.y, point.z))
        .collect::<Vec<_>>();
    if points.len() < set.len() {
        warn!(
            "{}: skipped {} samples that can't be plotted",
            set.name(),
            set.len() - points.len()
        );
    }

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        config.line_color.into_plotters(),
    ))?;

    let reds = Reds::default();
    let radius = config.point_radius;
    chart.draw_series(points.iter().map(|&(x, y, z)| {
        let color = reds.map(x, &x_span).into_plotters();
        Circle::new((x, y, z), radius, color.filled())
    }))?;

    // Axis names at the far end of each axis.
    let axis_names = [
        (Axis::X, (x_span.end, y_span.start, z_span.start)),
        (Axis::Y, (x_span.start, y_span.end, z_span.start)),
        (Axis::Z, (x_span.start, y_span.start, z_span.end)),
    ];
    chart.draw_series(axis_names.into_iter().map(|(axis, position)| {
        Text::new(axis.name(), position, (FONT, AXIS_NAME_SIZE).into_font())
    }))?;

    Ok(())
}

/// Largest magnitude drawn. Anything past it, or not finite, is left out of
/// both the extents and the series.
const PLOT_LIMIT: f64 = 1e100;

fn plottable(value: f64) -> bool {
    value.is_finite() && value.abs() <= PLOT_LIMIT
}

/// Chart extent for one axis. Starts from the tracked range, ordered, and
/// grows to contain every plottable value so legacy ranges can't clip points.
/// Flat extents are padded, an axis with nothing to draw spans `-1..1`.
fn span(range: Option<AxisRange>, values: &[f64]) -> Range<f64> {
    let tracked = range
        .map(AxisRange::ordered)
        .filter(|range| plottable(range.min()) && plottable(range.max()));
    let range = values
        .iter()
        .copied()
        .filter(|&value| plottable(value))
        .fold(tracked, |range, value| {
            Some(range.map_or(AxisRange::point(value), |range| range.add(value)))
        });
    let Some(range) = range else {
        return -1.0..1.0;
    };
    let (min, max) = (range.min(), range.max());
    if max - min > f64::EPSILON {
        min..max
    } else {
        let pad = 0.5 * min.abs().max(1.0);
        (min - pad)..(max + pad)
    }
}

//
// Tests
//
