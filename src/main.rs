use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use petrors_logs::export::{output_stem, write_well_to_path, write_wells_to_path};
use petrors_logs::las::LasFile;
use petrors_logs::plot::write_log_plot;
use petrors_logs::report::WellSummary;
use petrors_logs::{
    ArchieParameters, ArchiePreset, CalculationParameters, CalculationParametersBuilder, Cutoffs,
    WellDataset, WellProcessor, WellProcessorBuilder,
};
use pretty_env_logger;
use std::process::ExitCode;
use std::{error::Error, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Petrophysical evaluation of LAS well logs",
    long_about = None,
    version = env!("PETRORS_LOGS_VERSION")
)]
struct Cli {
    #[clap(subcommand)]
    mode: Modes,
}

#[derive(Subcommand, Debug)]
enum Modes {
    /// Compute VSH, porosity, saturation, permeability, lithology and net pay
    Process(ProcessCliOpts),
    /// Print the dominant matrix of a well
    DetectMatrix(DetectMatrixCliOpts),
}

#[derive(Args, Debug)]
struct ProcessCliOpts {
    /// LAS 2.0 files, processed one after another
    #[clap(required = true)]
    las_paths: Vec<PathBuf>,

    /// Directory receiving <WELL>_results.csv and <WELL>_log.html
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write an HTML log plot per well
    #[clap(long, action)]
    plot: bool,

    /// Consolidated CSV with every processed well
    #[clap(long)]
    combined: Option<PathBuf>,

    #[command(flatten)]
    parameters: ParameterOpts,
}

#[derive(Args, Debug)]
struct DetectMatrixCliOpts {
    las_path: PathBuf,

    #[command(flatten)]
    parameters: ParameterOpts,
}

#[derive(Args, Debug)]
struct ParameterOpts {
    /// Archie preset forced over the detected matrix defaults
    #[clap(long)]
    archie_preset: Option<ArchiePresetKind>,

    /// Tortuosity factor A; forces the Archie constants
    #[clap(long)]
    archie_a: Option<f64>,

    /// Cementation exponent M; forces the Archie constants
    #[clap(long)]
    archie_m: Option<f64>,

    /// Saturation exponent N; forces the Archie constants
    #[clap(long)]
    archie_n: Option<f64>,

    /// Formation water resistivity (ohm-m)
    #[clap(long, default_value = "0.05")]
    rw: f64,

    /// Pore fluid density (g/cc)
    #[clap(long, default_value = "1.0")]
    rho_fluid: f64,

    /// Shale density (g/cc)
    #[clap(long, default_value = "2.7")]
    rho_shale: f64,

    /// Minimum effective porosity of pay (fraction)
    #[clap(long, default_value = "0.06")]
    phi_cutoff: f64,

    /// Maximum shale volume of pay (fraction)
    #[clap(long, default_value = "0.50")]
    vsh_cutoff: f64,

    /// Maximum water saturation of pay (fraction)
    #[clap(long, default_value = "0.70")]
    sw_cutoff: f64,

    /// Median filter window, odd
    #[clap(long, default_value = "5")]
    smoothing_window: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ArchiePresetKind {
    Sandstone,
    ConsolidatedSandstone,
    Limestone,
    Dolomite,
    VuggyCarbonate,
}

impl From<ArchiePresetKind> for ArchiePreset {
    fn from(kind: ArchiePresetKind) -> Self {
        match kind {
            ArchiePresetKind::Sandstone => ArchiePreset::Sandstone,
            ArchiePresetKind::ConsolidatedSandstone => ArchiePreset::ConsolidatedSandstone,
            ArchiePresetKind::Limestone => ArchiePreset::Limestone,
            ArchiePresetKind::Dolomite => ArchiePreset::Dolomite,
            ArchiePresetKind::VuggyCarbonate => ArchiePreset::VuggyCarbonate,
        }
    }
}

impl ParameterOpts {
    fn calculation_parameters(&self) -> Result<CalculationParameters, Box<dyn Error>> {
        Ok(CalculationParametersBuilder::default()
            .rw(self.rw)
            .rho_fluid(self.rho_fluid)
            .rho_shale(self.rho_shale)
            .cutoffs(Cutoffs::new(self.phi_cutoff, self.vsh_cutoff, self.sw_cutoff))
            .build()?)
    }

    /// A preset or any single constant replaces the matrix defaults.
    fn archie_override(&self) -> Option<ArchieParameters> {
        let preset = self
            .archie_preset
            .map(|kind| ArchiePreset::from(kind).parameters());
        if preset.is_none()
            && self.archie_a.is_none()
            && self.archie_m.is_none()
            && self.archie_n.is_none()
        {
            return None;
        }
        let base = preset.unwrap_or_default();
        Some(ArchieParameters::new(
            self.archie_a.unwrap_or(base.a),
            self.archie_m.unwrap_or(base.m),
            self.archie_n.unwrap_or(base.n),
        ))
    }

    fn processor(&self) -> Result<WellProcessor, Box<dyn Error>> {
        let parameters = self.calculation_parameters()?;
        let archie_override = self.archie_override();
        let mut builder = WellProcessorBuilder::default();
        builder.parameters(&parameters);
        builder.smoothing_window(&self.smoothing_window);
        if let Some(archie) = archie_override.as_ref() {
            builder.archie_override(archie);
        }
        Ok(builder.build()?)
    }
}

fn process_file(
    path: &PathBuf,
    processor: &WellProcessor,
    opts: &ProcessCliOpts,
) -> Result<WellDataset, Box<dyn Error>> {
    let las = LasFile::try_from(path)?;
    let mut dataset = WellDataset::from_las(&las)?;
    let report = processor.process(&mut dataset);
    println!("{}\n", report);
    println!("{}\n", WellSummary::of(&dataset));
    let stem = output_stem(dataset.name());
    let csv_path = opts.output_dir.join(format!("{}_results.csv", stem));
    write_well_to_path(&csv_path, &dataset)?;
    if opts.plot {
        let plot_path = opts.output_dir.join(format!("{}_log.html", stem));
        write_log_plot(&plot_path, &dataset, &report.parameters.cutoffs)?;
    }
    Ok(dataset)
}

fn run_process(opts: &ProcessCliOpts) -> Result<(), Box<dyn Error>> {
    let processor = opts.parameters.processor()?;
    std::fs::create_dir_all(&opts.output_dir)?;
    let mut processed = Vec::with_capacity(opts.las_paths.len());
    for path in &opts.las_paths {
        match process_file(path, &processor, opts) {
            Ok(dataset) => processed.push(dataset),
            Err(e) => eprintln!("Error: {}: {}", path.display(), e),
        }
    }
    if processed.is_empty() {
        return Err("none of the LAS files could be processed".into());
    }
    let failed = opts.las_paths.len() - processed.len();
    if failed > 0 {
        warn!("{} of {} files skipped", failed, opts.las_paths.len());
    }
    if let Some(combined) = &opts.combined {
        write_wells_to_path(combined, &processed)?;
    }
    Ok(())
}

fn run_detect_matrix(opts: &DetectMatrixCliOpts) -> Result<(), Box<dyn Error>> {
    let processor = opts.parameters.processor()?;
    let las = LasFile::try_from(&opts.las_path)?;
    let mut dataset = WellDataset::from_las(&las)?;
    let report = processor.process(&mut dataset);
    println!(
        "{}: {} ({:.2} g/cc)",
        report.well_name, report.matrix, report.matrix_density
    );
    Ok(())
}

fn entrypoint() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match &cli.mode {
        Modes::Process(opts) => run_process(opts)?,
        Modes::DetectMatrix(opts) => run_detect_matrix(opts)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
