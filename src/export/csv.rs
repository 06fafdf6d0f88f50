// petrors-logs/src/export/csv.rs

use super::errors::ExportError;
use crate::well::{Sample, WellDataset};
use csv::Writer;
use log::info;
use std::io::Write;
use std::path::Path;

pub const HEADER: [&str; 13] = [
    "DEPTH_FT",
    "GR",
    "RHOB",
    "NPHI",
    "RT",
    "VSH",
    "PHI_T",
    "PHI_E",
    "SW",
    "PERM",
    "LITOLOGIA",
    "RHO_MATRIX",
    "IS_PAY",
];

pub const COMBINED_HEADER: [&str; 14] = [
    "WELL",
    "DEPTH_FT",
    "GR",
    "RHOB",
    "NPHI",
    "RT",
    "VSH",
    "PHI_T",
    "PHI_E",
    "SW",
    "PERM",
    "LITOLOGIA",
    "RHO_MATRIX",
    "IS_PAY",
];

fn field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn record(sample: &Sample) -> [String; 13] {
    [
        sample.depth_ft.to_string(),
        field(sample.gamma_ray),
        field(sample.bulk_density),
        field(sample.neutron_porosity),
        field(sample.resistivity_deep),
        field(sample.shale_volume),
        field(sample.porosity_total),
        field(sample.porosity_effective),
        field(sample.water_saturation),
        field(sample.permeability),
        sample
            .lithology
            .map(|l| l.label().to_string())
            .unwrap_or_default(),
        field(sample.matrix_density),
        sample.is_pay.to_string(),
    ]
}

/// Writes one processed well. Missing values are empty fields.
pub fn write_well<W: Write>(writer: W, dataset: &WellDataset) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for sample in dataset.samples() {
        writer.write_record(record(sample))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes several wells into one table with a leading `WELL` column.
pub fn write_wells<W: Write>(writer: W, datasets: &[WellDataset]) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(COMBINED_HEADER)?;
    for dataset in datasets {
        for sample in dataset.samples() {
            writer.write_record(
                std::iter::once(dataset.name().to_string()).chain(record(sample)),
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_well_to_path(path: &Path, dataset: &WellDataset) -> Result<(), ExportError> {
    write_well(std::fs::File::create(path)?, dataset)?;
    info!(
        "Wrote {} rows of {} to {}",
        dataset.len(),
        dataset.name(),
        path.display()
    );
    Ok(())
}

pub fn write_wells_to_path(path: &Path, datasets: &[WellDataset]) -> Result<(), ExportError> {
    write_wells(std::fs::File::create(path)?, datasets)?;
    info!("Wrote {} wells to {}", datasets.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::Curve;
    use crate::lithology::Lithology;

    fn dataset(name: &str) -> WellDataset {
        let mut pay = Sample::new(1000.5)
            .with(Curve::GammaRay, 35.0)
            .with(Curve::BulkDensity, 2.3);
        pay.porosity_effective = Some(0.18);
        pay.lithology = Some(Lithology::Sandstone);
        pay.matrix_density = Some(2.65);
        pay.is_pay = true;
        WellDataset::from_samples(name, vec![pay, Sample::new(1001.0)])
    }

    #[test]
    fn test_single_well_csv() {
        let mut buffer = Vec::new();
        write_well(&mut buffer, &dataset("W-1")).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "DEPTH_FT,GR,RHOB,NPHI,RT,VSH,PHI_T,PHI_E,SW,PERM,LITOLOGIA,RHO_MATRIX,IS_PAY"
        );
        assert_eq!(lines[1], "1000.5,35,2.3,,,,,0.18,,,SANDSTONE,2.65,true");
        assert_eq!(lines[2], "1001,,,,,,,,,,,,false");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_combined_csv_prefixes_well() {
        let mut buffer = Vec::new();
        write_wells(&mut buffer, &[dataset("A"), dataset("B")]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("WELL,DEPTH_FT,"));
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("A,1000.5,"));
        assert!(lines[4].starts_with("B,1001,"));
    }
}
