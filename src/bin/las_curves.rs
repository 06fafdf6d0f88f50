use clap::Parser;
use petrors_logs::curves::{Curve, CurveResolution};
use petrors_logs::las::LasFile;
use pretty_env_logger;
use std::process::ExitCode;
use std::{error::Error, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    about = "List the curves of a LAS file and how they map to canonical names",
    long_about = None,
    version = env!("PETRORS_LOGS_VERSION")
)]
struct Cli {
    las_path: PathBuf,
}

fn entrypoint() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let las = LasFile::try_from(&cli.las_path)?;
    println!("Well: {}", las.well_name());
    println!("Rows: {}", las.nrows());
    for (index, curve) in las.curves().iter().enumerate() {
        let valid = las.column(index).iter().flatten().count();
        println!(
            "{:>3} {:<12} {:<8} {:>7} valid  {}",
            index, curve.mnemonic, curve.unit, valid, curve.description
        );
    }
    let resolution = match CurveResolution::resolve(&las.mnemonics()) {
        Some(resolution) => resolution,
        None => return Err("LAS file has no curves".into()),
    };
    println!();
    println!("DEPTH_FT <- {}", las.curves()[resolution.depth].mnemonic);
    for curve in Curve::ALL {
        match resolution.index_of(curve) {
            Some(index) => println!(
                "{:<8} <- {}",
                curve.mnemonic(),
                las.curves()[index].mnemonic
            ),
            None => println!("{:<8} <- (not found)", curve.mnemonic()),
        }
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
